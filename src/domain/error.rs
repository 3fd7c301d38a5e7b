//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid option values.
///
/// Outline structure never produces an error: blank lines are skipped and
/// odd indentation rounds down to the nearest level.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("option {option} out of range: {value} (allowed {min}..={max})")]
    OptionOutOfRange {
        option: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("invalid value for {option}: {value:?} ({reason})")]
    InvalidOption {
        option: &'static str,
        value: String,
        reason: String,
    },
}

impl DomainError {
    pub(crate) fn out_of_range<T: ToString>(option: &'static str, value: T, min: T, max: T) -> Self {
        Self::OptionOutOfRange {
            option,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn invalid(option: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
