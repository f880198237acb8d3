//! Superposition of incident, reflected and transmitted fields.
//!
//! The same composition law holds for every [`Waveform`]:
//!
//! - incident, in medium 1: `Re[f(k1, -z, t)]`
//! - reflected, in medium 1: `Re[Γ·f(k1, z, t)]`
//! - total, in medium 1: incident + reflected
//! - transmitted, in medium 2: `Re[τ·f(k2, -z, t)]`
//!
//! [`Wave::animate`] samples these four curves over a grid spanning three
//! wavelengths of medium 1 on each side of the interface, one [`Frame`] per
//! time sample.

use std::path::Path;

use ndarray::Array1;
use num_complex::Complex;
use rayon::prelude::*;

use crate::constants::{DOMAIN_WAVELENGTHS, GRID_POINTS};
use crate::errors::WaveError;
use crate::medium::Medium;
use crate::wave::Wave;
use crate::waveform::Waveform;

#[cfg(test)]
mod tests {

    use super::*;
    use crate::waveform::{Gaussian, Rect, Sine};

    fn shapes() -> Vec<Box<dyn Waveform>> {
        vec![
            Box::new(Sine),
            Box::new(Gaussian::new(1.3).unwrap()),
            Box::new(Rect::new(4.0).unwrap()),
        ]
    }

    #[test]
    fn grid_spans_three_wavelengths() {
        let wave = Wave::default();
        let grid = Grid::new(&wave);
        let lambda = wave.wavelength(&Medium::vacuum());
        assert_eq!(grid.z1.len(), GRID_POINTS);
        assert_eq!(grid.z2.len(), GRID_POINTS);
        assert!((grid.z1[0] + 3.0 * lambda).abs() < 1e-12);
        assert!(grid.z1[GRID_POINTS - 1].abs() < 1e-12);
        assert_eq!(grid.z2[0], 0.0);
        assert!((grid.z2[GRID_POINTS - 1] - 3.0 * lambda).abs() < 1e-12);
    }

    #[test]
    fn no_reflection_at_null_interface() {
        let medium = Medium::new(2.0, 1.0, 0.81).unwrap();
        for shape in shapes() {
            let mut wave = Wave::default();
            wave.add_mediums(medium, medium);
            let field = InterfaceField::new(&wave, shape.as_ref());
            assert_eq!(field.gamma(), Complex::new(0.0, 0.0));
            assert_eq!(field.tau(), Complex::new(1.0, 0.0));

            let times = shape.time_sampling(&wave).samples();
            let animation = wave.animate(shape.as_ref(), &times, (-1.0, 1.0));
            for frame in &animation.frames {
                assert!(frame.reflected.iter().all(|&e| e == 0.0));
                assert_eq!(frame.incident, frame.total);
            }
        }
    }

    #[test]
    fn field_is_continuous_across_interface() {
        let mut wave = Wave::default();
        wave.add_mediums(Medium::vacuum(), Medium::new(4.0, 2.5, 0.3).unwrap());
        for shape in shapes() {
            let field = InterfaceField::new(&wave, shape.as_ref());
            for t in shape.time_sampling(&wave).samples() {
                let left = field.total(0.0, t);
                let right = field.transmitted(0.0, t);
                assert!((left - right).abs() < 1e-9, "{}: {} vs {}", shape.name(), left, right);
            }
        }
    }

    #[test]
    fn total_is_sum_of_components() {
        let mut wave = Wave::default();
        wave.add_mediums(Medium::vacuum(), Medium::new(2.0, 1.0, 0.81).unwrap());
        let animation = wave.demo_animation(&Sine);
        for frame in &animation.frames {
            let sum = &frame.incident + &frame.reflected;
            for (a, b) in sum.iter().zip(frame.total.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn lossy_transmission_decays() {
        let mut wave = Wave::default();
        wave.add_mediums(Medium::vacuum(), Medium::new(2.0, 1.0, 0.81).unwrap());
        let sine = Sine;
        let field = InterfaceField::new(&wave, &sine);
        let delta = wave.skin_depth(wave.medium2());
        let envelope = |z: f64| {
            (0..64)
                .map(|i| field.transmitted(z, i as f64 / (64.0 * wave.frequency())).abs())
                .fold(0.0, f64::max)
        };
        let ratio = envelope(delta) / envelope(0.0);
        assert!((ratio - (-1.0f64).exp()).abs() < 0.01, "ratio {}", ratio);
    }

    #[test]
    fn demo_animation_uses_waveform_defaults() {
        let wave = Wave::default();
        let gaussian = Gaussian::default();
        let animation = wave.demo_animation(&gaussian);
        assert_eq!(animation.len(), 160);
        assert_eq!(animation.ylim, gaussian.plot_range(&wave));
        assert_eq!(animation.name, "gaussian");
        assert_eq!(animation.frames[0].time, -0.8e-9);
        assert_eq!(animation.frames[0].transmitted.len(), GRID_POINTS);
    }

    #[test]
    fn saving_is_unimplemented() {
        let animation = Wave::default().demo_animation(&Sine);
        assert_eq!(
            animation.save("wave.mp4"),
            Err(WaveError::Unimplemented("saving animations to a file"))
        );
    }
}

/// Spatial sampling of both half-spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Positions in medium 1, from `-3λ1` to the interface.
    pub z1: Array1<f64>,
    /// Positions in medium 2, from the interface to `+3λ1`.
    pub z2: Array1<f64>,
}

impl Grid {
    pub fn new(wave: &Wave) -> Self {
        let extent = DOMAIN_WAVELENGTHS * wave.wavelength(wave.medium1());
        Self {
            z1: Array1::linspace(-extent, 0.0, GRID_POINTS),
            z2: Array1::linspace(0.0, extent, GRID_POINTS),
        }
    }

    /// Plotted interval `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        let min = self.z1.first().copied().unwrap_or(0.0);
        let max = self.z2.last().copied().unwrap_or(0.0);
        (min, max)
    }
}

/// Field components at one instant, sampled over a [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    /// Incident field over `z1`.
    pub incident: Array1<f64>,
    /// Reflected field over `z1`.
    pub reflected: Array1<f64>,
    /// Total field over `z1`.
    pub total: Array1<f64>,
    /// Transmitted field over `z2`.
    pub transmitted: Array1<f64>,
}

/// A waveform applied to the interface configured on a [`Wave`].
///
/// Wavenumbers and coefficients are evaluated once on construction.
pub struct InterfaceField<'a, W: Waveform + ?Sized> {
    wave: &'a Wave,
    waveform: &'a W,
    k1: Complex<f64>,
    k2: Complex<f64>,
    gamma: Complex<f64>,
    tau: Complex<f64>,
}

impl<'a, W: Waveform + ?Sized> InterfaceField<'a, W> {
    pub fn new(wave: &'a Wave, waveform: &'a W) -> Self {
        Self {
            wave,
            waveform,
            k1: wave.wavenumber(wave.medium1()),
            k2: wave.wavenumber(wave.medium2()),
            gamma: wave.gamma(),
            tau: wave.tau(),
        }
    }

    pub fn gamma(&self) -> Complex<f64> {
        self.gamma
    }

    pub fn tau(&self) -> Complex<f64> {
        self.tau
    }

    pub fn incident(&self, z: f64, t: f64) -> f64 {
        self.waveform.shape(self.wave, self.k1, -z, t).re
    }

    pub fn reflected(&self, z: f64, t: f64) -> f64 {
        (self.gamma * self.waveform.shape(self.wave, self.k1, z, t)).re
    }

    pub fn total(&self, z: f64, t: f64) -> f64 {
        self.incident(z, t) + self.reflected(z, t)
    }

    pub fn transmitted(&self, z: f64, t: f64) -> f64 {
        (self.tau * self.waveform.shape(self.wave, self.k2, -z, t)).re
    }

    /// Samples all four components at time `t`.
    pub fn frame(&self, grid: &Grid, t: f64) -> Frame {
        let incident = grid.z1.mapv(|z| self.incident(z, t));
        let reflected = grid.z1.mapv(|z| self.reflected(z, t));
        let total = &incident + &reflected;
        Frame {
            time: t,
            incident,
            reflected,
            total,
            transmitted: grid.z2.mapv(|z| self.transmitted(z, t)),
        }
    }
}

/// Precomputed frames of one waveform, ready to be redrawn in a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: &'static str,
    pub medium1: Medium,
    pub medium2: Medium,
    pub grid: Grid,
    pub ylim: (f64, f64),
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Writing animations to disk is not supported.
    pub fn save(&self, _path: impl AsRef<Path>) -> Result<(), WaveError> {
        Err(WaveError::Unimplemented("saving animations to a file"))
    }
}

impl Wave {
    /// Samples the field of `waveform` at each of `times` [s].
    ///
    /// `ylim` is the vertical range the renderer should use.
    pub fn animate<W: Waveform + ?Sized>(
        &self,
        waveform: &W,
        times: &Array1<f64>,
        ylim: (f64, f64),
    ) -> Animation {
        let grid = Grid::new(self);
        let field = InterfaceField::new(self, waveform);
        tracing::debug!(
            waveform = waveform.name(),
            frames = times.len(),
            gamma = %field.gamma(),
            tau = %field.tau(),
            "sampling animation"
        );

        let frames = times
            .to_vec()
            .into_par_iter()
            .map(|t| field.frame(&grid, t))
            .collect();

        Animation {
            name: waveform.name(),
            medium1: **self.medium1(),
            medium2: **self.medium2(),
            grid,
            ylim,
            frames,
        }
    }

    /// Samples `waveform` over its own time window and plotting range.
    pub fn demo_animation<W: Waveform + ?Sized>(&self, waveform: &W) -> Animation {
        let times = waveform.time_sampling(self).samples();
        self.animate(waveform, &times, waveform.plot_range(self))
    }
}
