//! Error types for the interface engine.

use thiserror::Error;

/// Errors raised by the medium, wave and waveform constructors, and by
/// features that are not available yet.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaveError {
    #[error("frequency must be positive and finite, got {0} Hz")]
    InvalidFrequency(f64),
    #[error("amplitude must be finite, got {0}")]
    InvalidAmplitude(String),
    #[error("relative permittivity must be positive and finite, got {0}")]
    InvalidPermittivity(f64),
    #[error("relative permeability must be positive and finite, got {0}")]
    InvalidPermeability(f64),
    #[error("conductivity must be non-negative and finite, got {0} S/m")]
    InvalidConductivity(f64),
    #[error("{name} must be positive and finite, got {value}")]
    InvalidShape { name: &'static str, value: f64 },
    #[error("unimplemented: {0}")]
    Unimplemented(&'static str),
}

/// Checks that `value` is strictly positive and finite.
pub(crate) fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
