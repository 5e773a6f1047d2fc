//! Error types for summary operations.
//!
//! This module defines [`SummaryError`] which covers every failure the core can
//! report to its caller: rejected arguments, source fetch failures, records that
//! break the data contract, and cache backend problems.

use thiserror::Error;

/// Errors that can occur while building a summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// An argument was rejected before any fetch took place.
    #[error("Invalid {name}: {value}")]
    InvalidArgument {
        /// Name of the offending argument (e.g. `days`).
        name: &'static str,
        /// The rejected value, rendered for display.
        value: String,
    },

    /// The record source failed to deliver a day's records.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A record violated the data contract (e.g. a negative purchase amount).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl SummaryError {
    /// Builds an [`SummaryError::InvalidArgument`] for `name` carrying `value`.
    pub fn invalid_argument(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
        }
    }

    /// Returns true if the error was raised before touching the source.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result type alias using [`SummaryError`].
pub type Result<T> = std::result::Result<T, SummaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display_carries_value() {
        let err = SummaryError::invalid_argument("days", -3);
        assert_eq!(err.to_string(), "Invalid days: -3");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_fetch_is_not_invalid_argument() {
        assert!(!SummaryError::Fetch("boom".to_string()).is_invalid_argument());
    }
}
