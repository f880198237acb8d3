//! Human-readable summary of a configured interface.
//!
//! A [`Report`] gathers the loss classification, equivalent constants,
//! wavenumbers, coefficients, skin depths and power densities of both media
//! into one value that can be printed or serialized.

use std::fmt;

use num_complex::Complex;
use serde::Serialize;

use crate::medium::{Medium, MediumKind};
use crate::wave::Wave;


/// Number of significant digits used when printing a report.
const DIGITS: usize = 4;

/// Formats a float with four significant digits, switching to scientific
/// notation for very small or large magnitudes.
pub struct Sig(pub f64);

impl fmt::Display for Sig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return write!(f, "nan");
        }
        if x.is_infinite() {
            return write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" });
        }
        if x == 0.0 {
            return write!(f, "0");
        }

        // exponent after rounding to the requested precision
        let sci = format!("{:.*e}", DIGITS - 1, x);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if exponent < -4 || exponent >= DIGITS as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                trim_zeros(mantissa),
                sign,
                exponent.abs()
            )
        } else {
            let decimals = (DIGITS as i32 - 1 - exponent).max(0) as usize;
            write!(f, "{}", trim_zeros(&format!("{:.*}", decimals, x)))
        }
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a complex number as `a+bj` with four significant digits per part.
pub struct SigComplex(pub Complex<f64>);

impl fmt::Display for SigComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Complex { re, im } = self.0;
        let sign = if im.is_sign_negative() { '-' } else { '+' };
        write!(f, "{}{}{}j", Sig(re), sign, Sig(im.abs()))
    }
}

/// Derived quantities of one medium, evaluated at the wave's frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediumReport {
    pub medium: Medium,
    pub loss_tangent: f64,
    pub kind: MediumKind,
    pub permeability: f64,
    pub permittivity: Complex<f64>,
    pub impedance: Complex<f64>,
    pub wavenumber: Complex<f64>,
    pub skin_depth: f64,
    pub phase_velocity: f64,
    pub wavelength: f64,
}

impl MediumReport {
    fn new(wave: &Wave, medium: &Medium) -> Self {
        let omega = wave.angular_frequency();
        let (loss_tangent, kind) = medium.classify(omega);
        Self {
            medium: *medium,
            loss_tangent,
            kind,
            permeability: medium.equivalent_permeability(),
            permittivity: medium.equivalent_permittivity(omega),
            impedance: medium.characteristic_impedance(omega),
            wavenumber: wave.wavenumber(medium),
            skin_depth: wave.skin_depth(medium),
            phase_velocity: wave.phase_velocity(medium),
            wavelength: wave.wavelength(medium),
        }
    }
}

/// Diagnostic summary of a wave and its pair of media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub frequency: f64,
    pub amplitude: Complex<f64>,
    pub media: [MediumReport; 2],
    pub gamma: Complex<f64>,
    pub tau: Complex<f64>,
    pub incident_power: f64,
    pub transmitted_power: f64,
}

impl Report {
    pub fn new(wave: &Wave) -> Self {
        let (medium1, medium2) = (wave.medium1(), wave.medium2());
        Self {
            frequency: wave.frequency(),
            amplitude: wave.amplitude(),
            media: [
                MediumReport::new(wave, medium1),
                MediumReport::new(wave, medium2),
            ],
            gamma: wave.gamma(),
            tau: wave.tau(),
            incident_power: wave.incident_power_density(medium1),
            transmitted_power: wave.transmitted_power_density(medium1, medium2),
        }
    }

    /// Fraction of the incident power density that crosses the interface, in percent.
    pub fn transmitted_percent(&self) -> f64 {
        100.0 * (1.0 - self.gamma.norm_sqr())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.media.iter().enumerate() {
            let n = i + 1;
            writeln!(
                f,
                "U_{n} := σ_{n}/(ω·ε_0·ε_r_{n}) = {}  ==> medium {n} is a(n) {}",
                Sig(m.loss_tangent),
                m.kind
            )?;
        }
        for (i, m) in self.media.iter().enumerate() {
            writeln!(f, "μ_eq_{} = {}", i + 1, Sig(m.permeability))?;
        }
        for (i, m) in self.media.iter().enumerate() {
            writeln!(f, "ε_eq_{} = {}", i + 1, SigComplex(m.permittivity))?;
        }
        for (i, m) in self.media.iter().enumerate() {
            writeln!(f, "ζ_eq_{} = {}", i + 1, SigComplex(m.impedance))?;
        }
        for (i, m) in self.media.iter().enumerate() {
            writeln!(f, "k_{} = {}", i + 1, SigComplex(m.wavenumber))?;
        }
        for (i, m) in self.media.iter().enumerate() {
            writeln!(
                f,
                "v_{n} = {}  λ_{n} = {}",
                Sig(m.phase_velocity),
                Sig(m.wavelength),
                n = i + 1
            )?;
        }
        writeln!(
            f,
            "Γ_e = {} = {} ∠ {}",
            SigComplex(self.gamma),
            Sig(self.gamma.norm()),
            Sig(self.gamma.arg())
        )?;
        writeln!(
            f,
            "τ_e = {} = {} ∠ {}",
            SigComplex(self.tau),
            Sig(self.tau.norm()),
            Sig(self.tau.arg())
        )?;
        for (i, m) in self.media.iter().enumerate() {
            writeln!(f, "δ_{} = {}", i + 1, Sig(m.skin_depth))?;
        }
        writeln!(f, "S_i = {}", Sig(self.incident_power))?;
        write!(
            f,
            "S_t = {} = {}% S_i",
            Sig(self.transmitted_power),
            Sig(self.transmitted_percent())
        )
    }
}
