//! Error types for parameter and model validation.

use rc_core::CoreError;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Validation failures. Raised before integration; values are never clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Missing required parameter: {field}")]
    Missing { field: &'static str },

    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Parameter {field} = {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Inconsistent parameters: {what}")]
    Inconsistent { what: String },

    #[error("Resistive torque '{label}' returned {value} at t={t} s: {reason}")]
    Strategy {
        label: String,
        t: f64,
        value: f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ModelError {
    /// Name of the offending field, when the error refers to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::NonFinite { field, .. }
            | Self::OutOfRange { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Check `value` is finite and inside `[min, max]`.
pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> ModelResult<f64> {
    if !value.is_finite() {
        return Err(ModelError::NonFinite { field, value });
    }
    if value < min || value > max {
        return Err(ModelError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
