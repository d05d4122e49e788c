//! Error type shared by the parser and both simulation engines.

use thiserror::Error;

/// Failure reported before any simulation loop starts.
///
/// Validation is all-or-nothing: a rejected request never yields a partial trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A capacity, quantum or burst time was not positive, a sequence was empty, or a
    /// token in the raw text was not an integer.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The declared number of processes differs from the number of burst times supplied.
    #[error("process count mismatch: declared {declared} processes but {actual} burst times were given")]
    CountMismatch { declared: usize, actual: usize },
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod error_tests {
    use super::SimError;

    #[test]
    fn messages_name_the_failure() {
        let err = SimError::invalid("quantum must be at least 1, got 0");
        assert_eq!(err.to_string(), "invalid input: quantum must be at least 1, got 0");

        let err = SimError::CountMismatch {
            declared: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("declared 4"));
        assert!(err.to_string().contains("3 burst times"));
    }
}
