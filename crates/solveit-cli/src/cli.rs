//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BisectionArgs, ConfigArgs, FixedPointArgs, MultipleRootsArgs, NewtonArgs, RegulaFalsiArgs,
    SecantArgs,
};

/// SolveIT - Root finding for single-variable equations
#[derive(Parser)]
#[command(name = "solveit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short = 'o', long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every iteration to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fixed-point iteration x = g(x)
    FixedPoint(FixedPointArgs),

    /// Bisection on a sign-changing bracket
    Bisection(BisectionArgs),

    /// Regula falsi (false position) on a sign-changing bracket
    RegulaFalsi(RegulaFalsiArgs),

    /// Secant method from two initial guesses
    Secant(SecantArgs),

    /// Newton-Raphson from one initial guess
    Newton(NewtonArgs),

    /// Modified Newton for roots of multiplicity greater than one
    MultipleRoots(MultipleRootsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format (the iteration table)
    Csv,
    /// Minimal output (just the root)
    Minimal,
}

impl OutputFormat {
    /// Parses a stored format name.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}
