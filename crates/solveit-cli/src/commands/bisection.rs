//! Bisection command implementation.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::bisection;

use crate::commands::{parse_expression, parse_number, report, SolveArgs};
use crate::Context;

/// Arguments for the bisection command.
#[derive(Args, Debug)]
pub struct BisectionArgs {
    /// Function f(x) whose root is sought
    #[arg(short, long)]
    pub function: String,

    /// Lower end of the bracket
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub xi: f64,

    /// Upper end of the bracket
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub xs: f64,

    #[command(flatten)]
    pub solve: SolveArgs,
}

/// Execute the bisection command.
pub fn execute(args: BisectionArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;

    let solution = bisection(&f, args.xi, args.xs, &args.solve.solver_config(ctx))?;
    report(&f, &solution, &args.solve, ctx)
}
