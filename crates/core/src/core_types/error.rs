//! Error types for the wave tank engine.

use thiserror::Error;

/// Result type for wave tank operations.
pub type Result<T> = std::result::Result<T, WaveTankError>;

/// Errors raised by configuration entry points.
///
/// The per-step hot path never produces these: misplaced sources are skipped
/// silently. Every operation that returns an error leaves the engine state
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveTankError {
    /// Boundary type name was not one of `reflective`, `absorbing`, `open`.
    #[error("Invalid boundary type '{0}'. Choose 'reflective', 'absorbing', or 'open'")]
    InvalidBoundaryType(String),

    /// A numeric parameter was out of its valid range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name (e.g. `"depth"`, `"resolution"`)
        name: &'static str,
        /// What was wrong with the value
        reason: String,
    },

    /// Slit id does not refer to a configured slit.
    #[error("Unknown slit id {0}")]
    UnknownSlit(usize),
}

impl WaveTankError {
    /// Error for a float parameter that must be finite and strictly positive.
    pub fn not_positive(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter {
            name,
            reason: format!("must be finite and positive, got {value}"),
        }
    }

    /// Ensure `value` is finite and strictly positive.
    pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<f32> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::not_positive(name, value))
        }
    }
}
