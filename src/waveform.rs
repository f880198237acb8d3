//! Pulse shapes launched towards the interface.
//!
//! A [`Waveform`] turns a (possibly complex) wavenumber, a position and a time
//! into the complex instantaneous field of a wave travelling through one
//! medium. The same shaping function is evaluated for the incident, reflected
//! and transmitted components, see [`crate::field::InterfaceField`].
//!
//! Each waveform also describes how it is best shown: which pair of media,
//! which time window and which vertical range.

use std::f64::consts::PI;

use ndarray::Array1;
use num_complex::Complex;

use crate::constants::{DEFAULT_RMS, DEFAULT_WIDTH};
use crate::errors::{positive, WaveError};
use crate::medium::Medium;
use crate::wave::Wave;


/// Unit step that takes the half-maximum value at the transition.
pub fn heaviside(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 0.0 {
        1.0
    } else {
        0.5
    }
}

/// Time window `[start, stop]` sampled at `count` evenly spaced instants [s].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSampling {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl TimeSampling {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    pub fn samples(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.stop, self.count)
    }
}

/// A pulse shape that can be propagated through either medium.
pub trait Waveform: Send + Sync {
    /// Short name, used in titles and on the command line.
    fn name(&self) -> &'static str;

    /// Complex field at position `z` and time `t` of a wave with wavenumber
    /// `k`. Incident components are evaluated at `-z`, reflected ones at `+z`.
    fn shape(&self, wave: &Wave, k: Complex<f64>, z: f64, t: f64) -> Complex<f64>;

    /// Media that show the waveform off well.
    fn default_media(&self) -> (Medium, Medium);

    /// Time window covering the interesting part of the motion.
    fn time_sampling(&self, wave: &Wave) -> TimeSampling;

    /// Vertical plotting range `(min, max)` [V/m].
    fn plot_range(&self, wave: &Wave) -> (f64, f64);
}

/// Continuous sinusoidal wave.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sine;

impl Waveform for Sine {
    fn name(&self) -> &'static str {
        "sine"
    }

    fn shape(&self, wave: &Wave, k: Complex<f64>, z: f64, t: f64) -> Complex<f64> {
        let j = Complex::<f64>::i();
        wave.amplitude() * (j * k * z).exp() * (j * wave.angular_frequency() * t).exp()
    }

    fn default_media(&self) -> (Medium, Medium) {
        (Medium::vacuum(), Medium::from_parts(2.0, 1.0, 0.81))
    }

    /// One period, as seen in medium 1.
    fn time_sampling(&self, wave: &Wave) -> TimeSampling {
        let medium1 = wave.medium1();
        let period = wave.wavelength(medium1) / wave.phase_velocity(medium1);
        TimeSampling::new(0.0, period, 45)
    }

    fn plot_range(&self, wave: &Wave) -> (f64, f64) {
        let a = wave.amplitude().norm();
        (-2.0 * a, 2.0 * a)
    }
}

/// Gaussian pulse with RMS spread `rms`, expressed in radians of the phase
/// argument `ωt + βz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    rms: f64,
}

impl Gaussian {
    pub fn new(rms: f64) -> Result<Self, WaveError> {
        if !positive(rms) {
            return Err(WaveError::InvalidShape { name: "rms", value: rms });
        }
        Ok(Self { rms })
    }

    pub fn rms(&self) -> f64 {
        self.rms
    }

    /// Field magnitude at the centre of the pulse.
    pub fn peak(&self, wave: &Wave) -> f64 {
        wave.amplitude().norm() / (self.rms * (2.0 * PI).sqrt())
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self { rms: DEFAULT_RMS }
    }
}

impl Waveform for Gaussian {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn shape(&self, wave: &Wave, k: Complex<f64>, z: f64, t: f64) -> Complex<f64> {
        let x = wave.angular_frequency() * t + k.re * z;
        let envelope = (-(x * x) / (2.0 * self.rms * self.rms)).exp() / (self.rms * (2.0 * PI).sqrt());
        wave.amplitude() * envelope * (-k.im * z).exp()
    }

    fn default_media(&self) -> (Medium, Medium) {
        (Medium::vacuum(), Medium::from_parts(1.5, 1.0, 0.21))
    }

    fn time_sampling(&self, _wave: &Wave) -> TimeSampling {
        TimeSampling::new(-0.8e-9, 1e-9, 160)
    }

    fn plot_range(&self, wave: &Wave) -> (f64, f64) {
        let peak = self.peak(wave);
        (-peak, 1.2 * peak)
    }
}

/// Rectangular pulse of half-width `width`, expressed in radians of the phase
/// argument `ωt + βz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    width: f64,
}

impl Rect {
    pub fn new(width: f64) -> Result<Self, WaveError> {
        if !positive(width) {
            return Err(WaveError::InvalidShape {
                name: "width",
                value: width,
            });
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Normalised pulse level at phase argument `x`: 1 inside, 0 outside,
    /// 1/2 on either edge.
    pub fn level(&self, x: f64) -> f64 {
        heaviside(x + self.width) - heaviside(x - self.width)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl Waveform for Rect {
    fn name(&self) -> &'static str {
        "rect"
    }

    fn shape(&self, wave: &Wave, k: Complex<f64>, z: f64, t: f64) -> Complex<f64> {
        let x = wave.angular_frequency() * t + k.re * z;
        wave.amplitude() * self.level(x) * (-k.im * z).exp()
    }

    fn default_media(&self) -> (Medium, Medium) {
        (Medium::vacuum(), Medium::from_parts(2.0, 1.0, 0.81))
    }

    fn time_sampling(&self, _wave: &Wave) -> TimeSampling {
        TimeSampling::new(-0.8e-9, 3e-9, 160)
    }

    fn plot_range(&self, wave: &Wave) -> (f64, f64) {
        let peak = wave.amplitude().norm();
        (-peak, 1.2 * peak)
    }
}
