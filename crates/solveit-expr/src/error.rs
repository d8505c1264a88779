//! Error types for expression parsing and evaluation.

use thiserror::Error;

/// A specialized Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while compiling or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The text is not a well-formed expression.
    #[error("Could not parse expression: {0}")]
    Parse(String),

    /// The expression refers to a variable other than `x` or a known constant.
    #[error("Unknown variable '{0}'. Only 'x', 'pi' and 'e' are available.")]
    UnknownVariable(String),

    /// The expression calls a function that is not supported.
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// A function was applied outside its domain.
    #[error("{0}")]
    Domain(String),

    /// The expression evaluated to NaN or infinity.
    #[error("expression is not finite at x = {x}: {value}")]
    NonFinite {
        /// Point of evaluation.
        x: f64,
        /// The offending value.
        value: f64,
    },

    /// Any other evaluation failure, e.g. a non-numeric result.
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

impl From<ExprError> for solveit_math::EvaluationError {
    fn from(err: ExprError) -> Self {
        Self::new(err.to_string())
    }
}
