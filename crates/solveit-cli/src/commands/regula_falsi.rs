//! Regula falsi command implementation.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::regula_falsi;

use crate::commands::{parse_expression, parse_number, report, SolveArgs};
use crate::Context;

/// Arguments for the regula falsi command.
#[derive(Args, Debug)]
pub struct RegulaFalsiArgs {
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

/// Execute the regula falsi command.
pub fn execute(args: RegulaFalsiArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;

    let solution = regula_falsi(&f, args.xi, args.xs, &args.solve.solver_config(ctx))?;
    report(&f, &solution, &args.solve, ctx)
}
