//! Newton-Raphson command implementation.
//!
//! Without `--derivative` the slope is estimated by central differences.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::newton_raphson;

use crate::commands::{parse_expression, parse_number, parse_optional_expression, report, SolveArgs};
use crate::Context;

/// Arguments for the newton command.
#[derive(Args, Debug)]
pub struct NewtonArgs {
    /// Function f(x) whose root is sought
    #[arg(short, long)]
    pub function: String,

    /// First derivative f'(x) (estimated numerically if omitted)
    #[arg(short, long)]
    pub derivative: Option<String>,

    /// Initial guess
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub x0: f64,

    #[command(flatten)]
    pub solve: SolveArgs,
}

/// Execute the newton command.
pub fn execute(args: NewtonArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;
    let df = parse_optional_expression("derivative", args.derivative.as_deref())?;

    let solution = newton_raphson(&f, df.as_ref(), args.x0, &args.solve.solver_config(ctx))?;
    report(&f, &solution, &args.solve, ctx)
}
