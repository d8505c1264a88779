//! Iteration error conventions.
//!
//! | Mode | Error | Converged when |
//! |------|-------|----------------|
//! | Absolute | `\|x_n - x_{n-1}\|` | `error <= tol` |
//! | Relative | `\|x_n - x_{n-1}\| / \|x_n\|` | `error <= tol` |
//! | SignificantFigures | relative | `error <= 0.5 * 10^(-tol)` |
//!
//! The relative error falls back to the absolute error when `x_n == 0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::solvers::{DEFAULT_SIGNIFICANT_FIGURES, DEFAULT_TOLERANCE};

/// How per-iteration error is measured and compared against the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMode {
    /// Absolute difference between successive iterates (correct decimals).
    #[default]
    Absolute,
    /// Difference relative to the current iterate.
    Relative,
    /// Relative error against a tolerance given as a count of significant figures.
    SignificantFigures,
}

impl ErrorMode {
    /// All error modes, in display order.
    pub const ALL: [ErrorMode; 3] = [
        ErrorMode::Absolute,
        ErrorMode::Relative,
        ErrorMode::SignificantFigures,
    ];

    /// Returns the stable identifier of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
            Self::SignificantFigures => "significant-figures",
        }
    }

    /// Converts a user tolerance into the threshold errors are compared with.
    ///
    /// For [`ErrorMode::SignificantFigures`] the tolerance is a number of
    /// significant figures `n` and the threshold is Scarborough's criterion
    /// `0.5 * 10^(-n)`.
    pub fn threshold(self, tolerance: f64) -> f64 {
        match self {
            Self::Absolute | Self::Relative => tolerance,
            Self::SignificantFigures => 0.5 * 10f64.powf(-tolerance),
        }
    }

    /// Default tolerance for this mode: a count of figures for
    /// [`ErrorMode::SignificantFigures`], a plain bound otherwise.
    pub fn default_tolerance(self) -> f64 {
        match self {
            Self::Absolute | Self::Relative => DEFAULT_TOLERANCE,
            Self::SignificantFigures => DEFAULT_SIGNIFICANT_FIGURES,
        }
    }

    /// Returns true when `error` satisfies `tolerance` under this mode.
    pub fn is_satisfied(self, error: f64, tolerance: f64) -> bool {
        error <= self.threshold(tolerance)
    }

    /// Checks that `tolerance` is meaningful for this mode.
    pub fn validate_tolerance(self, tolerance: f64) -> MathResult<()> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(MathError::InvalidTolerance { value: tolerance });
        }
        if self == Self::SignificantFigures && tolerance < 1.0 {
            return Err(MathError::invalid_input(format!(
                "significant figures must be at least 1, got {tolerance}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMode {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "absolute" | "abs" => Ok(Self::Absolute),
            "relative" | "rel" => Ok(Self::Relative),
            "significant-figures" | "sig-figs" | "sigfigs" => Ok(Self::SignificantFigures),
            other => Err(MathError::invalid_input(format!(
                "unknown error mode: {other}. Use absolute, relative or significant-figures."
            ))),
        }
    }
}

/// Computes the error between the current and the previous iterate.
pub fn compute_error(x_curr: f64, x_prev: f64, mode: ErrorMode) -> f64 {
    let diff = (x_curr - x_prev).abs();
    match mode {
        ErrorMode::Absolute => diff,
        ErrorMode::Relative | ErrorMode::SignificantFigures => {
            if x_curr == 0.0 {
                diff
            } else {
                diff / x_curr.abs()
            }
        }
    }
}
