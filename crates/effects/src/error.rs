// ---------------------------------------------------------------------------
// FxError: validation and configuration failures for effect requests
// ---------------------------------------------------------------------------

use std::fmt;

use crate::targets::LightId;

/// Which flicker range a `NegativeRange` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAxis {
    X,
    Y,
    Alpha,
}

impl fmt::Display for RangeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeAxis::X => write!(f, "x"),
            RangeAxis::Y => write!(f, "y"),
            RangeAxis::Alpha => write!(f, "alpha"),
        }
    }
}

/// Errors that can occur when starting an effect or loading configuration.
///
/// Runtime failures (a target vanishing mid-effect, stopping something twice)
/// are not errors: they are handled inside the effect's own tick/termination
/// path and never reach the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FxError {
    /// Update rate is non-finite, not positive, or above the configured maximum.
    InvalidRate(f32),
    /// A flicker range was negative.
    NegativeRange { axis: RangeAxis, value: i32 },
    /// Rumble intensity was negative.
    NegativeIntensity(i32),
    /// Duration is negative or non-finite.
    InvalidDuration(f32),
    /// The light did not resolve when the effect was started.
    UnknownLight(LightId),
    /// Configuration could not be parsed.
    Config(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::InvalidRate(rate) => write!(f, "Invalid update rate: {rate} Hz"),
            FxError::NegativeRange { axis, value } => {
                write!(f, "Negative {axis} range: {value}")
            }
            FxError::NegativeIntensity(value) => write!(f, "Negative rumble intensity: {value}"),
            FxError::InvalidDuration(secs) => write!(f, "Invalid duration: {secs}s"),
            FxError::UnknownLight(id) => write!(f, "Unknown light: {id}"),
            FxError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for FxError {}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        FxError::Config(e.to_string())
    }
}
