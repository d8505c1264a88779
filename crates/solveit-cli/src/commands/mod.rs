//! CLI command implementations.

pub mod bisection;
pub mod config;
pub mod fixed_point;
pub mod multiple_roots;
pub mod newton;
pub mod regula_falsi;
pub mod secant;

// Re-export submodules for convenience
pub use bisection::BisectionArgs;
pub use config::ConfigArgs;
pub use fixed_point::FixedPointArgs;
pub use multiple_roots::MultipleRootsArgs;
pub use newton::NewtonArgs;
pub use regula_falsi::RegulaFalsiArgs;
pub use secant::SecantArgs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use solveit_expr::Expression;
use solveit_math::{ErrorMode, MathError, Solution, SolverConfig};

use crate::error::{CliError, CliResult};
use crate::{export, output, plot, Context};

/// Options shared by every solve command.
#[derive(Args, Debug, Clone, Default)]
pub struct SolveArgs {
    /// Tolerance (a count of significant figures with --error-mode significant-figures)
    #[arg(short, long, value_parser = parse_number)]
    pub tol: Option<f64>,

    /// Maximum number of iterations
    #[arg(short, long)]
    pub niter: Option<usize>,

    /// Error convention: absolute, relative or significant-figures
    #[arg(short, long, value_parser = parse_error_mode)]
    pub error_mode: Option<ErrorMode>,

    /// Write the iteration table to a CSV file
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write plot data (function samples and iterates) to a JSON file
    #[arg(long, value_name = "JSON")]
    pub plot: Option<PathBuf>,
}

impl SolveArgs {
    /// Builds the solver configuration, falling back to the configured defaults.
    ///
    /// The stored tolerance is only reused under the stored error mode; with a
    /// different `--error-mode` and no `--tol`, that mode's default applies.
    pub fn solver_config(&self, ctx: &Context) -> SolverConfig {
        let error_mode = self.error_mode.unwrap_or(ctx.settings.error_mode);
        let tolerance = self.tol.unwrap_or_else(|| {
            let stored = ctx.settings.tolerance;
            if error_mode == ctx.settings.error_mode
                && error_mode.validate_tolerance(stored).is_ok()
            {
                stored
            } else {
                error_mode.default_tolerance()
            }
        });

        SolverConfig::default()
            .with_tolerance(tolerance)
            .with_max_iterations(self.niter.unwrap_or(ctx.settings.max_iterations))
            .with_error_mode(error_mode)
    }
}

/// Parses a number written with either `.` or `,` as the decimal separator.
pub fn parse_number(s: &str) -> CliResult<f64> {
    let text = s.trim();
    if text.contains(',') && text.contains('.') {
        return Err(CliError::InvalidNumber(s.to_string()));
    }
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::InvalidNumber(s.to_string()))
}

/// Parses an error convention name.
pub fn parse_error_mode(s: &str) -> Result<ErrorMode, MathError> {
    s.parse()
}

/// Compiles an expression argument.
pub fn parse_expression(label: &'static str, text: &str) -> CliResult<Expression> {
    Expression::parse(text).map_err(|source| CliError::InvalidExpression { label, source })
}

/// Compiles an optional expression argument.
pub fn parse_optional_expression(
    label: &'static str,
    text: Option<&str>,
) -> CliResult<Option<Expression>> {
    text.map(|t| parse_expression(label, t)).transpose()
}

/// Prints a solution and writes any requested export or plot file.
pub fn report(f: &Expression, solution: &Solution, args: &SolveArgs, ctx: &Context) -> Result<()> {
    output::print_solution(f, solution, ctx)?;

    if let Some(path) = &args.export {
        export::export_csv(&solution.trace, path)?;
        if !ctx.quiet {
            output::print_success(&format!("Iterations written to {}", path.display()));
        }
    }
    if let Some(path) = &args.plot {
        plot::write_plot(f, solution, path)?;
        if !ctx.quiet {
            output::print_success(&format!("Plot data written to {}", path.display()));
        }
    }
    Ok(())
}
