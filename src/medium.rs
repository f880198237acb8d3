//! Linear, isotropic, homogeneous media.
//!
//! A [`Medium`] is described by its relative permittivity, relative
//! permeability and conductivity. At a given angular frequency the conduction
//! current is folded into an equivalent complex permittivity, from which the
//! characteristic impedance and the loss classification follow.

use std::fmt;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    GOOD_CONDUCTOR_THRESHOLD, INSULATOR_THRESHOLD, VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY,
};
use crate::errors::{positive, WaveError};


/// Electromagnetic behaviour of a medium at a given frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediumKind {
    GoodConductor,
    Dielectric,
    Insulator,
}

impl MediumKind {
    /// Classifies a medium from its loss tangent `u`.
    pub fn from_loss_tangent(u: f64) -> Self {
        if u >= GOOD_CONDUCTOR_THRESHOLD {
            MediumKind::GoodConductor
        } else if u >= INSULATOR_THRESHOLD {
            MediumKind::Dielectric
        } else {
            MediumKind::Insulator
        }
    }
}

impl fmt::Display for MediumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediumKind::GoodConductor => "Good conductor",
            MediumKind::Dielectric => "Dielectric",
            MediumKind::Insulator => "Insulator",
        };
        write!(f, "{}", name)
    }
}

/// A homogeneous medium filling one half-space.
///
/// Values are validated on construction, so every derived quantity is finite
/// for any positive angular frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MediumParams")]
pub struct Medium {
    permittivity: f64,
    permeability: f64,
    conductivity: f64,
}

/// Unvalidated medium parameters, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MediumParams {
    pub permittivity: f64,
    #[serde(default = "default_permeability")]
    pub permeability: f64,
    #[serde(default)]
    pub conductivity: f64,
}

fn default_permeability() -> f64 {
    1.0
}

impl TryFrom<MediumParams> for Medium {
    type Error = WaveError;

    fn try_from(params: MediumParams) -> Result<Self, Self::Error> {
        Medium::new(params.permittivity, params.permeability, params.conductivity)
    }
}

impl Medium {
    /// Creates a medium from its relative permittivity `eps_r`, relative
    /// permeability `mu_r` and conductivity `sigma` [S/m].
    pub fn new(eps_r: f64, mu_r: f64, sigma: f64) -> Result<Self, WaveError> {
        if !positive(eps_r) {
            return Err(WaveError::InvalidPermittivity(eps_r));
        }
        if !positive(mu_r) {
            return Err(WaveError::InvalidPermeability(mu_r));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(WaveError::InvalidConductivity(sigma));
        }
        Ok(Self {
            permittivity: eps_r,
            permeability: mu_r,
            conductivity: sigma,
        })
    }

    /// Free space.
    pub const fn vacuum() -> Self {
        Self::from_parts(1.0, 1.0, 0.0)
    }

    /// Builds a medium from constants already known to be valid.
    pub(crate) const fn from_parts(eps_r: f64, mu_r: f64, sigma: f64) -> Self {
        Self {
            permittivity: eps_r,
            permeability: mu_r,
            conductivity: sigma,
        }
    }

    pub fn relative_permittivity(&self) -> f64 {
        self.permittivity
    }

    pub fn relative_permeability(&self) -> f64 {
        self.permeability
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn is_lossless(&self) -> bool {
        self.conductivity == 0.0
    }

    /// Equivalent permittivity [F/m] at angular frequency `omega`.
    ///
    /// The conduction current enters as the imaginary part `-σ/ω`, which is
    /// exactly zero for a lossless medium.
    pub fn equivalent_permittivity(&self, omega: f64) -> Complex<f64> {
        Complex::new(
            VACUUM_PERMITTIVITY * self.permittivity,
            -self.conductivity / omega,
        )
    }

    /// Equivalent permeability [H/m].
    pub fn equivalent_permeability(&self) -> f64 {
        VACUUM_PERMEABILITY * self.permeability
    }

    /// Characteristic impedance [Ω] at angular frequency `omega`.
    ///
    /// Principal square root, so the resistive part is never negative.
    pub fn characteristic_impedance(&self, omega: f64) -> Complex<f64> {
        (Complex::from(self.equivalent_permeability()) / self.equivalent_permittivity(omega)).sqrt()
    }

    /// Loss tangent `σ/(ω·ε0·εr)` and the resulting classification.
    ///
    /// The `ε0` factor keeps `U` dimensionless, so the thresholds compare a
    /// conduction current with a displacement current.
    pub fn classify(&self, omega: f64) -> (f64, MediumKind) {
        let u = self.conductivity / (omega * VACUUM_PERMITTIVITY * self.permittivity);
        (u, MediumKind::from_loss_tangent(u))
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::vacuum()
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ε_r={}, μ_r={}, σ={}>",
            self.permittivity, self.permeability, self.conductivity
        )
    }
}
