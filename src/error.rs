//! # Errors
//!
//! Validation failures raised by constructors and `update` calls. Numerical
//! boundary values (zero failure rate, zero available time) are not errors.

use thiserror::Error;

/// Errors from the grounding risk engine.
#[derive(Debug, Error)]
pub enum GroundingRiskError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{entity} requires at least one {item}")]
    EmptyCollection {
        entity: &'static str,
        item: &'static str,
    },

    #[error("Invalid restart-time distribution: {0}")]
    Distribution(String),

    #[error("Length mismatch: {probabilities} probabilities vs {consequences} consequences")]
    LengthMismatch {
        probabilities: usize,
        consequences: usize,
    },

    #[error("No parameters for equipment `{0}`")]
    UnknownEquipment(String),

    #[error("Invalid study configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for grounding risk operations.
pub type Result<T> = std::result::Result<T, GroundingRiskError>;

impl GroundingRiskError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject NaN, infinities and negative values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GroundingRiskError::invalid(name, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(GroundingRiskError::invalid(name, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

/// Reject NaN, infinities, zero and negative values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GroundingRiskError::invalid(name, format!("must be finite and > 0, got {value}")));
    }
    Ok(value)
}

/// Reject anything outside the closed unit interval.
pub(crate) fn ensure_probability(name: &'static str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GroundingRiskError::invalid(name, format!("must lie in [0, 1], got {value}")));
    }
    Ok(value)
}
