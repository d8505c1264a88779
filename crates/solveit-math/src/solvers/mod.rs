//! Root-finding drivers.
//!
//! This module provides one driver per method:
//!
//! - [`fixed_point`]: Iterates `x = g(x)`
//! - [`bisection`]: Halves a sign-changing bracket
//! - [`regula_falsi`]: Narrows a bracket with the secant intercept
//! - [`secant`]: Derivative-free open method from two seeds
//! - [`newton_raphson`]: Quadratic convergence when the derivative is available
//! - [`multiple_roots`]: Modified Newton for roots of multiplicity > 1
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Fixed point | Linear | Needs `\|g'\| < 1` | Iteration map `g` |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Regula falsi | Superlinear, may stall | Guaranteed | Bracket |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Multiple roots | Quadratic on repeated roots | May diverge | Derivatives |
//!
//! Every driver returns a [`Solution`] holding the full [`Trace`](crate::Trace)
//! and a classified [`Outcome`](crate::Outcome). Only malformed inputs produce
//! an `Err`.
//!
//! # Example
//!
//! ```rust
//! use solveit_math::solvers::{run, MethodInputs, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let df = |x: f64| 2.0 * x;
//! let inputs = MethodInputs::Newton { f: &f, df: Some(&df), x0: 1.0 };
//!
//! let solution = run(&inputs, &SolverConfig::new(1e-8, 20)).unwrap();
//! assert!(solution.is_converged());
//! ```

mod bracket;
mod fixed_point;
mod multiple_roots;
mod newton;
mod secant;

pub use bracket::{bisection, regula_falsi};
pub use fixed_point::fixed_point;
pub use multiple_roots::multiple_roots;
pub use newton::newton_raphson;
pub use secant::secant;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, MathError, MathResult};
use crate::metric::ErrorMode;
use crate::objective::Objective;
use crate::outcome::{Outcome, Solution};
use crate::trace::Trace;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default tolerance in significant-figures mode.
pub const DEFAULT_SIGNIFICANT_FIGURES: f64 = 6.0;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default magnitude below which a Newton-type denominator counts as zero.
pub const DEFAULT_DERIVATIVE_GUARD: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence, interpreted by `error_mode`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Error convention.
    pub error_mode: ErrorMode,
    /// Newton-type denominators smaller than this are treated as zero.
    pub derivative_guard: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            error_mode: ErrorMode::default(),
            derivative_guard: DEFAULT_DERIVATIVE_GUARD,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration using absolute error.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the error convention.
    #[must_use]
    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Sets the zero-derivative guard.
    #[must_use]
    pub fn with_derivative_guard(mut self, derivative_guard: f64) -> Self {
        self.derivative_guard = derivative_guard;
        self
    }

    /// Checks the configuration before a run.
    pub fn validate(&self) -> MathResult<()> {
        self.error_mode.validate_tolerance(self.tolerance)?;
        if self.max_iterations == 0 {
            return Err(MathError::ZeroIterations);
        }
        if !self.derivative_guard.is_finite() || self.derivative_guard < 0.0 {
            return Err(MathError::invalid_input(format!(
                "derivative guard must be finite and non-negative, got {}",
                self.derivative_guard
            )));
        }
        Ok(())
    }

    /// Returns true when `error` meets the tolerance.
    pub(crate) fn accepts(&self, error: f64) -> bool {
        self.error_mode.is_satisfied(error, self.tolerance)
    }

    /// Returns true when `value` is too small to divide by.
    pub(crate) fn is_vanishing(&self, value: f64) -> bool {
        value == 0.0 || value.abs() < self.derivative_guard
    }
}

/// Identifies a root-finding method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodId {
    /// Fixed-point iteration.
    FixedPoint,
    /// Bisection.
    Bisection,
    /// Regula falsi (false position).
    RegulaFalsi,
    /// Secant method.
    Secant,
    /// Newton-Raphson.
    Newton,
    /// Multiple roots (modified Newton).
    MultipleRoots,
}

impl MethodId {
    /// All methods, in presentation order.
    pub const ALL: [MethodId; 6] = [
        MethodId::FixedPoint,
        MethodId::Bisection,
        MethodId::RegulaFalsi,
        MethodId::Secant,
        MethodId::Newton,
        MethodId::MultipleRoots,
    ];

    /// Stable identifier, e.g. `"regula-falsi"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixedPoint => "fixed-point",
            Self::Bisection => "bisection",
            Self::RegulaFalsi => "regula-falsi",
            Self::Secant => "secant",
            Self::Newton => "newton",
            Self::MultipleRoots => "multiple-roots",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FixedPoint => "Fixed Point",
            Self::Bisection => "Bisection",
            Self::RegulaFalsi => "Regula Falsi",
            Self::Secant => "Secant",
            Self::Newton => "Newton-Raphson",
            Self::MultipleRoots => "Multiple Roots",
        }
    }

    /// Returns true for methods that start from a sign-changing bracket.
    pub fn is_bracketing(self) -> bool {
        matches!(self, Self::Bisection | Self::RegulaFalsi)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MethodId {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| MathError::invalid_input(format!("unknown method: {s}")))
    }
}

/// Inputs for one driver invocation, one variant per method.
#[derive(Clone, Copy)]
pub enum MethodInputs<'a> {
    /// Fixed-point iteration `x = g(x)`; `f` is only reported.
    FixedPoint {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// Iteration map.
        g: &'a dyn Objective,
        /// Initial guess.
        x0: f64,
    },
    /// Bisection on `[xi, xs]`.
    Bisection {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// Lower endpoint.
        xi: f64,
        /// Upper endpoint.
        xs: f64,
    },
    /// False position on `[xi, xs]`.
    RegulaFalsi {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// Lower endpoint.
        xi: f64,
        /// Upper endpoint.
        xs: f64,
    },
    /// Secant method from two seeds.
    Secant {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// First seed.
        x0: f64,
        /// Second seed.
        x1: f64,
    },
    /// Newton-Raphson; central differences stand in for a missing `df`.
    Newton {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// Derivative of `f`.
        df: Option<&'a dyn Objective>,
        /// Initial guess.
        x0: f64,
    },
    /// Modified Newton for repeated roots.
    MultipleRoots {
        /// Function whose root is sought.
        f: &'a dyn Objective,
        /// First derivative of `f`.
        df: Option<&'a dyn Objective>,
        /// Second derivative of `f` (Schröder variant only).
        d2f: Option<&'a dyn Objective>,
        /// Known multiplicity; `None` selects the Schröder variant.
        multiplicity: Option<u32>,
        /// Initial guess.
        x0: f64,
    },
}

impl MethodInputs<'_> {
    /// Method these inputs are for.
    pub fn method(&self) -> MethodId {
        match self {
            Self::FixedPoint { .. } => MethodId::FixedPoint,
            Self::Bisection { .. } => MethodId::Bisection,
            Self::RegulaFalsi { .. } => MethodId::RegulaFalsi,
            Self::Secant { .. } => MethodId::Secant,
            Self::Newton { .. } => MethodId::Newton,
            Self::MultipleRoots { .. } => MethodId::MultipleRoots,
        }
    }
}

impl fmt::Debug for MethodInputs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FixedPoint { x0, .. } | Self::Newton { x0, .. } => {
                write!(f, "{}(x0 = {x0})", self.method().as_str())
            }
            Self::Bisection { xi, xs, .. } | Self::RegulaFalsi { xi, xs, .. } => {
                write!(f, "{}([{xi}, {xs}])", self.method().as_str())
            }
            Self::Secant { x0, x1, .. } => write!(f, "secant(x0 = {x0}, x1 = {x1})"),
            Self::MultipleRoots {
                x0, multiplicity, ..
            } => write!(f, "multiple-roots(x0 = {x0}, k = {multiplicity:?})"),
        }
    }
}

/// Runs the driver selected by `inputs`.
pub fn run(inputs: &MethodInputs<'_>, config: &SolverConfig) -> MathResult<Solution> {
    log::debug!("running {:?}", inputs);
    match *inputs {
        MethodInputs::FixedPoint { f, g, x0 } => fixed_point(f, g, x0, config),
        MethodInputs::Bisection { f, xi, xs } => bisection(f, xi, xs, config),
        MethodInputs::RegulaFalsi { f, xi, xs } => regula_falsi(f, xi, xs, config),
        MethodInputs::Secant { f, x0, x1 } => secant(f, x0, x1, config),
        MethodInputs::Newton { f, df, x0 } => newton_raphson(f, df, x0, config),
        MethodInputs::MultipleRoots {
            f,
            df,
            d2f,
            multiplicity,
            x0,
        } => multiple_roots(f, df, d2f, multiplicity, x0, config),
    }
}

/// Runs independent problems in parallel.
///
/// Results are returned in input order.
#[cfg(feature = "parallel")]
pub fn run_batch(problems: &[(MethodInputs<'_>, SolverConfig)]) -> Vec<MathResult<Solution>> {
    use rayon::prelude::*;

    problems
        .par_iter()
        .map(|(inputs, config)| run(inputs, config))
        .collect()
}

/// Wraps a finished iteration into a [`Solution`], logging how it ended.
///
/// Evaluation failures become [`Outcome::DomainError`] and keep the trace
/// recorded up to that point.
pub(crate) fn finish(
    method: MethodId,
    trace: Trace,
    result: Result<Outcome, EvaluationError>,
) -> Solution {
    let outcome = result.unwrap_or_else(Outcome::from);
    match &outcome {
        Outcome::Converged { root, iterations } => {
            log::info!("{method}: converged to {root} after {iterations} iterations");
        }
        other => log::warn!("{method}: {other} ({} records)", trace.len()),
    }
    Solution::new(method, trace, outcome)
}

/// Rejects an iterate that overflowed or became NaN.
pub(crate) fn finite_iterate(x: f64) -> Result<f64, EvaluationError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(EvaluationError::new(format!(
            "iteration diverged to a non-finite value ({x})"
        )))
    }
}

/// Rejects NaN and infinite starting values.
pub(crate) fn ensure_finite(name: &str, value: f64) -> MathResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "{name} must be finite, got {value}"
        )))
    }
}
