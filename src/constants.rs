//! Physical constants and fixed numerical parameters.

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ [F/m].
pub const VACUUM_PERMITTIVITY: f64 = 8.854187817620389e-12;
/// Vacuum permeability μ₀ [H/m].
pub const VACUUM_PERMEABILITY: f64 = 4.0 * PI * 1e-7;

/// Loss tangent at or above which a medium behaves as a good conductor.
pub const GOOD_CONDUCTOR_THRESHOLD: f64 = 1e2;
/// Loss tangent below which a medium behaves as an insulator.
pub const INSULATOR_THRESHOLD: f64 = 1e-2;

/// Default carrier frequency [Hz].
pub const DEFAULT_FREQUENCY: f64 = 1.8e9;
/// Default field amplitude [V/m].
pub const DEFAULT_AMPLITUDE: f64 = 10.0;
/// Default RMS spread of the gaussian pulse, in units of the phase argument.
pub const DEFAULT_RMS: f64 = 2.20;
/// Default half-width of the rectangular pulse, in units of the phase argument.
pub const DEFAULT_WIDTH: f64 = 6.5;

/// Extent of the plotted domain on each side of the interface, in wavelengths of medium 1.
pub const DOMAIN_WAVELENGTHS: f64 = 3.0;
/// Number of spatial samples on each side of the interface.
pub const GRID_POINTS: usize = 300;
/// Delay between animation frames [ms].
pub const FRAME_INTERVAL_MS: u64 = 40;
