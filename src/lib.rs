pub mod constants;
pub mod errors;
pub mod field;
pub mod medium;
#[cfg(feature = "visualization")]
pub mod plot;
pub mod report;
pub mod settings;
pub mod wave;
pub mod waveform;
