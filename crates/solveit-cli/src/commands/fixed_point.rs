//! Fixed-point command implementation.
//!
//! Iterates `x = g(x)` and reports convergence in terms of `f`.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::fixed_point;

use crate::commands::{parse_expression, parse_number, report, SolveArgs};
use crate::Context;

/// Arguments for the fixed-point command.
#[derive(Args, Debug)]
pub struct FixedPointArgs {
    /// Function f(x) whose root is sought
    #[arg(short, long)]
    pub function: String,

    /// Iteration map g(x)
    #[arg(short = 'g', long = "map")]
    pub map: String,

    /// Initial guess
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub x0: f64,

    #[command(flatten)]
    pub solve: SolveArgs,
}

/// Execute the fixed-point command.
pub fn execute(args: FixedPointArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;
    let g = parse_expression("iteration map", &args.map)?;

    let solution = fixed_point(&f, &g, args.x0, &args.solve.solver_config(ctx))?;
    report(&f, &solution, &args.solve, ctx)
}
