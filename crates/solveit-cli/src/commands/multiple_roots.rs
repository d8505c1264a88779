//! Multiple roots command implementation.
//!
//! With `--multiplicity k` the Newton step is scaled by `k`; otherwise the
//! second derivative is used so the multiplicity need not be known.

use anyhow::Result;
use clap::Args;

use solveit_math::solvers::multiple_roots;

use crate::commands::{parse_expression, parse_number, parse_optional_expression, report, SolveArgs};
use crate::Context;

/// Arguments for the multiple-roots command.
#[derive(Args, Debug)]
pub struct MultipleRootsArgs {
    /// Function f(x) whose root is sought
    #[arg(short, long)]
    pub function: String,

    /// First derivative f'(x) (estimated numerically if omitted)
    #[arg(short, long)]
    pub derivative: Option<String>,

    /// Second derivative f''(x) (estimated numerically if omitted)
    #[arg(long)]
    pub second_derivative: Option<String>,

    /// Multiplicity of the root, if known
    #[arg(short, long)]
    pub multiplicity: Option<u32>,

    /// Initial guess
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    pub x0: f64,

    #[command(flatten)]
    pub solve: SolveArgs,
}

/// Execute the multiple-roots command.
pub fn execute(args: MultipleRootsArgs, ctx: &Context) -> Result<()> {
    let f = parse_expression("function", &args.function)?;
    let df = parse_optional_expression("derivative", args.derivative.as_deref())?;
    let d2f = parse_optional_expression("second derivative", args.second_derivative.as_deref())?;

    let solution = multiple_roots(
        &f,
        df.as_ref(),
        d2f.as_ref(),
        args.multiplicity,
        args.x0,
        &args.solve.solver_config(ctx),
    )?;
    report(&f, &solution, &args.solve, ctx)
}
