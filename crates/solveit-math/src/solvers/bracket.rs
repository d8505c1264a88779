//! Bracketing drivers: bisection and regula falsi.
//!
//! Both narrow a sign-changing interval `[xi, xs]` and differ only in how
//! the trial point inside the bracket is chosen.

use crate::error::{EvaluationError, MathError, MathResult};
use crate::metric::compute_error;
use crate::objective::{eval_finite, Objective};
use crate::outcome::{Outcome, Solution};
use crate::solvers::{ensure_finite, finish, finite_iterate, MethodId, SolverConfig};
use crate::trace::{Trace, EXTRA_LOWER, EXTRA_UPPER};

/// How the next trial point is placed inside the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrialRule {
    /// `xm = (xi + xs) / 2`
    Midpoint,
    /// `xm = xs - f(xs) * (xi - xs) / (f(xi) - f(xs))`
    FalsePosition,
}

impl TrialRule {
    fn method(self) -> MethodId {
        match self {
            Self::Midpoint => MethodId::Bisection,
            Self::FalsePosition => MethodId::RegulaFalsi,
        }
    }

    fn trial(self, lo: f64, hi: f64, f_lo: f64, f_hi: f64) -> f64 {
        match self {
            Self::Midpoint => (lo + hi) / 2.0,
            Self::FalsePosition => hi - f_hi * (lo - hi) / (f_lo - f_hi),
        }
    }

    /// True when the rule has no defined trial point for these values.
    fn is_degenerate(self, f_lo: f64, f_hi: f64) -> bool {
        self == Self::FalsePosition && f_lo == f_hi
    }
}

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and keeping the half where the sign changes.
///
/// Requires: `f(xi) * f(xs) <= 0`. Otherwise the outcome is
/// [`Outcome::InvalidBracket`] and the trace is empty. Each record stores the
/// bracket used to compute it under the `xi` and `xs` keys.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `xi` - Lower bound of the bracket
/// * `xs` - Upper bound of the bracket (the two are swapped if reversed)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let solution = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((solution.root().unwrap() - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: &F, xi: f64, xs: f64, config: &SolverConfig) -> MathResult<Solution>
where
    F: Objective + ?Sized,
{
    narrow(f, xi, xs, config, TrialRule::Midpoint)
}

/// Regula falsi (false position) root-finding algorithm.
///
/// Same bracket-narrowing structure as [`bisection`], but the trial point is
/// where the chord through `(xi, f(xi))` and `(xs, f(xs))` crosses zero.
/// If `f(xi) == f(xs)` the chord is horizontal and the outcome is
/// [`Outcome::DegenerateBracket`].
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{regula_falsi, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let solution = regula_falsi(&f, 1.0, 2.0, &SolverConfig::new(1e-12, 200)).unwrap();
/// assert!(f(solution.root().unwrap()).abs() < 1e-9);
/// ```
pub fn regula_falsi<F>(f: &F, xi: f64, xs: f64, config: &SolverConfig) -> MathResult<Solution>
where
    F: Objective + ?Sized,
{
    narrow(f, xi, xs, config, TrialRule::FalsePosition)
}

fn narrow<F>(
    f: &F,
    xi: f64,
    xs: f64,
    config: &SolverConfig,
    rule: TrialRule,
) -> MathResult<Solution>
where
    F: Objective + ?Sized,
{
    config.validate()?;
    ensure_finite("xi", xi)?;
    ensure_finite("xs", xs)?;
    if xi == xs {
        return Err(MathError::EmptyBracket {
            lower: xi,
            upper: xs,
        });
    }

    let mut trace = Trace::with_capacity(config.max_iterations + 1);
    let result = iterate(f, xi.min(xs), xi.max(xs), config, rule, &mut trace);
    Ok(finish(rule.method(), trace, result))
}

fn iterate<F>(
    f: &F,
    mut lo: f64,
    mut hi: f64,
    config: &SolverConfig,
    rule: TrialRule,
    trace: &mut Trace,
) -> Result<Outcome, EvaluationError>
where
    F: Objective + ?Sized,
{
    let mut f_lo = eval_finite(f, "f", lo)?;
    let mut f_hi = eval_finite(f, "f", hi)?;

    // Handle case where endpoint is the root
    if f_lo == 0.0 {
        trace.push_with(lo, f_lo, None, [(EXTRA_LOWER, lo), (EXTRA_UPPER, hi)]);
        return Ok(Outcome::Converged {
            root: lo,
            iterations: 0,
        });
    }
    if f_hi == 0.0 {
        trace.push_with(hi, f_hi, None, [(EXTRA_LOWER, lo), (EXTRA_UPPER, hi)]);
        return Ok(Outcome::Converged {
            root: hi,
            iterations: 0,
        });
    }

    if rule.is_degenerate(f_lo, f_hi) {
        return Ok(Outcome::DegenerateBracket);
    }

    // Check that root is bracketed
    if f_lo.signum() == f_hi.signum() {
        return Ok(Outcome::InvalidBracket);
    }

    let mut xm = finite_iterate(rule.trial(lo, hi, f_lo, f_hi))?;
    let mut f_m = eval_finite(f, "f", xm)?;
    trace.push_with(xm, f_m, None, [(EXTRA_LOWER, lo), (EXTRA_UPPER, hi)]);

    if f_m == 0.0 {
        return Ok(Outcome::Converged {
            root: xm,
            iterations: 0,
        });
    }

    for iteration in 1..=config.max_iterations {
        // Keep the half where the sign changes
        if f_lo.signum() != f_m.signum() {
            hi = xm;
            f_hi = f_m;
        } else {
            lo = xm;
            f_lo = f_m;
        }

        if rule.is_degenerate(f_lo, f_hi) {
            return Ok(Outcome::DegenerateBracket);
        }

        let x_prev = xm;
        xm = finite_iterate(rule.trial(lo, hi, f_lo, f_hi))?;
        f_m = eval_finite(f, "f", xm)?;
        let error = compute_error(xm, x_prev, config.error_mode);
        trace.push_with(xm, f_m, Some(error), [(EXTRA_LOWER, lo), (EXTRA_UPPER, hi)]);
        log::debug!("{}: n={iteration} [{lo}, {hi}] x={xm} f={f_m} e={error}", rule.method());

        if f_m == 0.0 || config.accepts(error) {
            return Ok(Outcome::Converged {
                root: xm,
                iterations: iteration,
            });
        }
    }

    Ok(Outcome::MaxIterationsReached { last_approx: xm })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::ErrorMode;
    use approx::assert_relative_eq;

    fn tight() -> SolverConfig {
        SolverConfig::new(1e-12, 200)
    }

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let solution = bisection(&f, 1.0, 2.0, &tight()).unwrap();

        assert_relative_eq!(solution.root().unwrap(), std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(solution.method, MethodId::Bisection);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let solution = bisection(&f, 2.0, 1.0, &tight()).unwrap();

        assert_relative_eq!(solution.root().unwrap(), std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let solution = bisection(&f, 2.0, 3.0, &tight()).unwrap();

        assert_eq!(solution.outcome, Outcome::InvalidBracket);
        assert!(solution.trace.is_empty());
    }

    #[test]
    fn test_empty_bracket_is_rejected() {
        let f = |x: f64| x;
        assert!(matches!(
            bisection(&f, 1.0, 1.0, &tight()),
            Err(MathError::EmptyBracket { .. })
        ));
        assert!(regula_falsi(&f, f64::NAN, 1.0, &tight()).is_err());
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let solution = bisection(&f, 0.0, 1.0, &tight()).unwrap();

        assert_eq!(
            solution.outcome,
            Outcome::Converged {
                root: 1.0,
                iterations: 0
            }
        );
        assert_eq!(solution.trace.len(), 1);
    }

    #[test]
    fn test_exact_midpoint_root() {
        let f = |x: f64| x - 1.0;

        let solution = bisection(&f, 0.0, 2.0, &tight()).unwrap();

        assert_eq!(solution.root(), Some(1.0));
        assert_eq!(solution.iterations(), Some(0));
    }

    #[test]
    fn test_negative_root() {
        let f = |x: f64| x + 1.0;

        let solution = bisection(&f, -2.0, 0.5, &tight()).unwrap();

        assert_relative_eq!(solution.root().unwrap(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bracket_recorded_in_extra() {
        let f = |x: f64| x * x - 2.0;

        let solution = bisection(&f, 0.0, 2.0, &SolverConfig::new(1e-3, 50)).unwrap();
        let first = solution.trace.get(0).unwrap();
        let second = solution.trace.get(1).unwrap();

        assert_relative_eq!(first.x, 1.0);
        assert_eq!(first.extra("xi"), Some(0.0));
        assert_eq!(first.extra("xs"), Some(2.0));
        // f(1) < 0, so the lower endpoint moves to the midpoint
        assert_eq!(second.extra("xi"), Some(1.0));
        assert_eq!(second.extra("xs"), Some(2.0));
        assert_relative_eq!(second.x, 1.5);
        assert_relative_eq!(second.error.unwrap(), 0.5);
    }

    #[test]
    fn test_bisection_max_iterations() {
        let f = |x: f64| x * x - 2.0;

        let solution = bisection(&f, 0.0, 2.0, &SolverConfig::new(1e-12, 5)).unwrap();

        assert!(matches!(solution.outcome, Outcome::MaxIterationsReached { .. }));
        assert_eq!(solution.trace.len(), 6);
    }

    #[test]
    fn test_regula_falsi_cubic() {
        let f = |x: f64| x * x * x - x - 2.0;

        let solution = regula_falsi(&f, 1.0, 2.0, &tight()).unwrap();

        assert!(solution.is_converged());
        assert_relative_eq!(solution.root().unwrap(), 1.521_379_706_804_567_6, epsilon = 1e-9);
        assert_eq!(solution.method, MethodId::RegulaFalsi);
    }

    #[test]
    fn test_regula_falsi_linear_is_exact() {
        let f = |x: f64| 2.0 * x - 3.0;

        let solution = regula_falsi(&f, 0.0, 4.0, &tight()).unwrap();

        assert_eq!(solution.root(), Some(1.5));
        assert_eq!(solution.trace.len(), 1);
    }

    #[test]
    fn test_regula_falsi_flat_function_is_degenerate() {
        let f = |_x: f64| 3.0;

        let solution = regula_falsi(&f, -1.0, 1.0, &tight()).unwrap();

        assert_eq!(solution.outcome, Outcome::DegenerateBracket);
        assert!(solution.trace.is_empty());
    }

    #[test]
    fn test_regula_falsi_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;

        let solution = regula_falsi(&f, -1.0, 2.0, &tight()).unwrap();

        assert_eq!(solution.outcome, Outcome::InvalidBracket);
    }

    #[test]
    fn test_relative_mode() {
        let f = |x: f64| x * x - 100.0;
        let config = SolverConfig::new(1e-6, 100).with_error_mode(ErrorMode::Relative);

        let solution = bisection(&f, 0.0, 30.0, &config).unwrap();
        let last = solution.trace.last().unwrap();

        assert!(last.error.unwrap() <= 1e-6);
        assert_relative_eq!(solution.root().unwrap(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_domain_error_keeps_trace() {
        // Undefined on (-1, 1): midpoints are 1.5, then -0.75
        let f = |x: f64| if x < 1.0 && x > -1.0 { f64::NAN } else { x };

        let solution = bisection(&f, -3.0, 6.0, &tight()).unwrap();

        assert!(matches!(solution.outcome, Outcome::DomainError { .. }));
        assert_eq!(solution.trace.len(), 1);
        assert_relative_eq!(solution.trace.get(0).unwrap().x, 1.5);
    }
}
