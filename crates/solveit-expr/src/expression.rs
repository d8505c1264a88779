//! Compiled expressions.

use std::fmt;
use std::str::FromStr;

use evalexpr::{build_operator_tree, EvalexprError, Node};
use solveit_math::{EvaluationError, Objective};

use crate::error::{ExprError, ExprResult};
use crate::functions::{context_at, is_constant, is_function};
use crate::literal::normalize;

/// Name of the free variable.
pub const VARIABLE: &str = "x";

/// A parsed expression in the variable `x`.
///
/// The operator tree is built once by [`Expression::parse`]. Evaluation only
/// reads it, so one expression can serve any number of concurrent runs.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    tree: Node,
}

impl Expression {
    /// Compiles `text`, rejecting unknown variables and functions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solveit_expr::Expression;
    ///
    /// let f = Expression::parse("exp(-x) - x").unwrap();
    /// assert!((f.evaluate(0.0).unwrap() - 1.0).abs() < 1e-15);
    ///
    /// assert!(Expression::parse("y + 1").is_err());
    /// ```
    pub fn parse(text: &str) -> ExprResult<Self> {
        let source = text.trim();
        if source.is_empty() {
            return Err(ExprError::Parse("expression is empty".into()));
        }

        let tree = build_operator_tree(&normalize(source))
            .map_err(|e| ExprError::Parse(e.to_string()))?;

        if let Some(name) = tree
            .iter_variable_identifiers()
            .find(|name| *name != VARIABLE && !is_constant(name))
        {
            return Err(ExprError::UnknownVariable(name.to_string()));
        }
        if let Some(name) = tree.iter_function_identifiers().find(|name| !is_function(name)) {
            return Err(ExprError::UnknownFunction(name.to_string()));
        }

        log::debug!("compiled expression '{source}'");
        Ok(Self {
            source: source.to_string(),
            tree,
        })
    }

    /// The expression as written, trimmed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression at `x`.
    pub fn evaluate(&self, x: f64) -> ExprResult<f64> {
        let context = context_at(VARIABLE, x).map_err(|e| ExprError::Evaluation(e.to_string()))?;

        let value = self
            .tree
            .eval_number_with_context(&context)
            .map_err(|e| match e {
                EvalexprError::CustomMessage(message) => ExprError::Domain(message),
                other => ExprError::Evaluation(other.to_string()),
            })?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::NonFinite { x, value })
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl FromStr for Expression {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Objective for Expression {
    fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        self.evaluate(x).map_err(EvaluationError::from)
    }
}
