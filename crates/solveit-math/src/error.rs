//! Error types for the root-finding engine.
//!
//! Only malformed inputs are errors. Everything that can happen once the
//! iteration has started (divergence, vanishing derivatives, evaluation
//! failures) is reported as an [`Outcome`](crate::Outcome).

use thiserror::Error;

/// A specialized Result type for engine operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that reject a run before any iteration takes place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Tolerance is not a usable positive number.
    #[error("Invalid tolerance: {value}. Must be finite and positive.")]
    InvalidTolerance {
        /// The rejected tolerance.
        value: f64,
    },

    /// Iteration budget of zero.
    #[error("Invalid iteration budget: must allow at least one iteration")]
    ZeroIterations,

    /// A bracket whose endpoints coincide.
    #[error("Empty bracket: [{lower}, {upper}]")]
    EmptyBracket {
        /// Lower endpoint.
        lower: f64,
        /// Upper endpoint.
        upper: f64,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Failure raised by a function while it is being evaluated.
///
/// Malformed expressions and points outside a function's natural domain
/// (division by zero, logarithm of a non-positive number, ...) surface as
/// this error. Drivers turn it into [`Outcome::DomainError`](crate::Outcome::DomainError).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EvaluationError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl EvaluationError {
    /// Creates a new evaluation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates the error reported for NaN or infinite values.
    #[must_use]
    pub fn non_finite(what: &str, x: f64, value: f64) -> Self {
        Self::new(format!("{what}({x}) is not finite: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::invalid_input("x0 must be finite");
        assert_eq!(err.to_string(), "Invalid input: x0 must be finite");

        let err = MathError::EmptyBracket {
            lower: 1.0,
            upper: 1.0,
        };
        assert!(err.to_string().contains("[1, 1]"));
    }

    #[test]
    fn test_non_finite_message() {
        let err = EvaluationError::non_finite("f", 0.0, f64::INFINITY);
        assert_eq!(err.to_string(), "f(0) is not finite: inf");
    }
}
