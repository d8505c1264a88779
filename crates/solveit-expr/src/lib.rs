//! # SolveIT Expr
//!
//! Compiles textual expressions in one variable `x` into functions the
//! root-finding drivers can evaluate.
//!
//! ```rust
//! use solveit_expr::Expression;
//! use solveit_math::solvers::{bisection, SolverConfig};
//!
//! let f: Expression = "x^2 - 2".parse().unwrap();
//! let solution = bisection(&f, 0.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
//! assert!((solution.root().unwrap() - 2f64.sqrt()).abs() < 1e-9);
//! ```
//!
//! Parsing is done once; every evaluation builds a fresh evaluation context,
//! so an [`Expression`] can be shared between threads and reused freely.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod expression;
mod functions;
mod literal;

pub use error::{ExprError, ExprResult};
pub use expression::{Expression, VARIABLE};
pub use functions::{CONSTANTS, FUNCTIONS};
