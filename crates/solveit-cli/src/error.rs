//! CLI error types.

use solveit_expr::ExprError;
use solveit_math::MathError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Text that is not a number.
    #[error("Invalid number: '{0}'. Use digits with '.' or ',' as the decimal separator.")]
    InvalidNumber(String),

    /// An expression argument that does not compile.
    #[error("Invalid {label}: {source}")]
    InvalidExpression {
        /// Which argument was rejected.
        label: &'static str,
        /// Why it was rejected.
        #[source]
        source: ExprError,
    },

    /// Inputs rejected by the engine.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
