//! Secant command implementation.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::secant;

use crate::commands::{parse_expression, parse_number, report, SolveArgs};
use crate::Context;

/// Arguments for the secant command.
#[derive(Args, Debug)]
pub struct SecantArgs {
    /// Function f(x) whose root is sought
    #[arg(short, long)]
    pub function: String,

    /// First initial guess
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub x0: f64,

    /// Second initial guess
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub x1: f64,

    #[command(flatten)]
    pub solve: SolveArgs,
}

/// Execute the secant command.
pub fn execute(args: SecantArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;

    let solution = secant(&f, args.x0, args.x1, &args.solve.solver_config(ctx))?;
    report(&f, &solution, &args.solve, ctx)
}
