//! # SolveIT Math
//!
//! Root-finding engine for single-variable nonlinear equations.
//!
//! This crate provides:
//!
//! - **Solvers**: Fixed point, Bisection, Regula Falsi, Secant, Newton-Raphson
//!   and Multiple Roots drivers
//! - **Error Metric**: Absolute, relative and significant-figure error conventions
//! - **Trace**: An auditable, append-only record of every iteration
//! - **Outcome**: A classified terminal state for every run
//!
//! ## Design Philosophy
//!
//! - **Pure Runs**: A driver invocation shares no state with any other
//! - **Classified Failures**: Non-convergence is an [`Outcome`], never a panic
//! - **Pluggable Functions**: Anything implementing [`Objective`] can be solved
//!
//! ## Example
//!
//! ```rust
//! use solveit_math::prelude::*;
//!
//! let f = |x: f64| x * x - 2.0;
//! let config = SolverConfig::default().with_tolerance(1e-10);
//!
//! let solution = bisection(&f, 0.0, 2.0, &config).unwrap();
//! assert!((solution.root().unwrap() - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod metric;
pub mod objective;
pub mod outcome;
pub mod solvers;
pub mod trace;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{EvaluationError, MathError, MathResult};
    pub use crate::metric::{compute_error, ErrorMode};
    pub use crate::objective::{CentralDifference, Objective, SecondCentralDifference};
    pub use crate::outcome::{Outcome, Solution};
    pub use crate::solvers::{
        bisection, fixed_point, multiple_roots, newton_raphson, regula_falsi, run, secant,
        MethodId, MethodInputs, SolverConfig,
    };
    pub use crate::trace::{IterationRecord, Trace};
}

pub use error::{EvaluationError, MathError, MathResult};
pub use metric::ErrorMode;
pub use objective::Objective;
pub use outcome::{Outcome, Solution};
pub use solvers::{run, MethodId, MethodInputs, SolverConfig};
pub use trace::{IterationRecord, Trace};
