//! SolveIT CLI - Root finding for single-variable equations.
//!
//! # Usage
//!
//! ```bash
//! # Bisection on [0, 2]
//! solveit bisection -f "x^2 - 2" --xi 0 --xs 2 --tol 1e-6
//!
//! # Newton-Raphson, comma decimals accepted
//! solveit newton -f "x^3 - 2*x - 5" -d "3*x^2 - 2" --x0 2,5
//!
//! # Export the iteration table and plot data
//! solveit secant -f "cos(x) - x" --x0 0 --x1 1 --export secant.csv --plot secant.json
//!
//! # Change the default tolerance
//! solveit config set tolerance 1e-10
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod export;
mod output;
mod plot;

use cli::{Cli, Commands, OutputFormat};
use commands::config::Settings;

/// Resolved global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Stored configuration.
    pub settings: Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // `config` commands still run when the stored configuration is invalid
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) if matches!(cli.command, Commands::Config(_)) => {
            tracing::warn!("ignoring configuration: {err}");
            Settings::default()
        }
        Err(err) => return Err(err.into()),
    };
    if !settings.use_colors {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format.unwrap_or(settings.format),
        quiet: cli.quiet,
        settings,
    };

    // Execute command
    match cli.command {
        Commands::FixedPoint(args) => commands::fixed_point::execute(args, &ctx)?,
        Commands::Bisection(args) => commands::bisection::execute(args, &ctx)?,
        Commands::RegulaFalsi(args) => commands::regula_falsi::execute(args, &ctx)?,
        Commands::Secant(args) => commands::secant::execute(args, &ctx)?,
        Commands::Newton(args) => commands::newton::execute(args, &ctx)?,
        Commands::MultipleRoots(args) => commands::multiple_roots::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs to stderr; `--verbose` shows every iteration.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("solveit=debug,solveit_math=debug,solveit_expr=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
