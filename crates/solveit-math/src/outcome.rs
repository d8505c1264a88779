//! Terminal states of a driver run.

use std::fmt;

use serde::Serialize;

use crate::error::EvaluationError;
use crate::solvers::MethodId;
use crate::trace::Trace;

/// How a driver run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The tolerance was met or an exact root was hit.
    Converged {
        /// The root approximation.
        root: f64,
        /// Iterations performed to reach it.
        iterations: usize,
    },
    /// The iteration budget ran out before the tolerance was met.
    MaxIterationsReached {
        /// The last approximation computed.
        last_approx: f64,
    },
    /// The bracket endpoints do not have opposite signs.
    InvalidBracket,
    /// The derivative (or secant slope) vanished.
    ZeroDerivative,
    /// `f(xi) == f(xs)`, so no false-position intercept exists.
    DegenerateBracket,
    /// A function could not be evaluated or the iteration overflowed.
    DomainError {
        /// Description of the failure.
        message: String,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Returns the root if the run converged.
    pub fn root(&self) -> Option<f64> {
        match self {
            Self::Converged { root, .. } => Some(*root),
            _ => None,
        }
    }

    /// Short, stable label for the outcome kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Converged { .. } => "converged",
            Self::MaxIterationsReached { .. } => "max_iterations_reached",
            Self::InvalidBracket => "invalid_bracket",
            Self::ZeroDerivative => "zero_derivative",
            Self::DegenerateBracket => "degenerate_bracket",
            Self::DomainError { .. } => "domain_error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged { root, iterations } => {
                write!(f, "{root} is a root approximation (after {iterations} iterations)")
            }
            Self::MaxIterationsReached { last_approx } => {
                write!(f, "Failed after the maximum number of iterations (last approximation: {last_approx})")
            }
            Self::InvalidBracket => f.write_str("Invalid bracket: f(xi) and f(xs) have the same sign"),
            Self::ZeroDerivative => f.write_str("The derivative vanished; the method cannot continue"),
            Self::DegenerateBracket => f.write_str("Degenerate bracket: f(xi) == f(xs)"),
            Self::DomainError { message } => write!(f, "Evaluation failed: {message}"),
        }
    }
}

impl From<EvaluationError> for Outcome {
    fn from(err: EvaluationError) -> Self {
        Self::DomainError {
            message: err.message,
        }
    }
}

/// Trace and outcome produced together by one driver invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Method that produced this solution.
    pub method: MethodId,
    /// Every iteration, in order.
    pub trace: Trace,
    /// How the run ended.
    pub outcome: Outcome,
    /// Convergence order estimate (Newton-type methods only).
    pub order_estimate: Option<f64>,
}

impl Solution {
    /// Creates a solution without an order estimate.
    pub fn new(method: MethodId, trace: Trace, outcome: Outcome) -> Self {
        Self {
            method,
            trace,
            outcome,
            order_estimate: None,
        }
    }

    /// Returns true if the run converged.
    pub fn is_converged(&self) -> bool {
        self.outcome.is_converged()
    }

    /// Returns the root if the run converged.
    pub fn root(&self) -> Option<f64> {
        self.outcome.root()
    }

    /// Iterations used to converge, if the run converged.
    pub fn iterations(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Converged { iterations, .. } => Some(iterations),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let converged = Outcome::Converged {
            root: 1.5,
            iterations: 4,
        };
        assert!(converged.is_converged());
        assert_eq!(converged.root(), Some(1.5));
        assert_eq!(converged.label(), "converged");

        let failed = Outcome::MaxIterationsReached { last_approx: 3.0 };
        assert!(!failed.is_converged());
        assert_eq!(failed.root(), None);
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let json = serde_json::to_value(Outcome::DomainError {
            message: "ln of a negative number".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "domain_error");
        assert_eq!(json["message"], "ln of a negative number");

        let json = serde_json::to_value(Outcome::InvalidBracket).unwrap();
        assert_eq!(json["status"], "invalid_bracket");
    }

    #[test]
    fn test_display() {
        let outcome = Outcome::Converged {
            root: 2.0,
            iterations: 3,
        };
        assert!(outcome.to_string().contains("after 3 iterations"));
        assert!(Outcome::DegenerateBracket.to_string().contains("f(xi) == f(xs)"));
    }
}
