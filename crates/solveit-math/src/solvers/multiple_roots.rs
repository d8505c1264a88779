//! Newton variants for roots of multiplicity greater than one.

use crate::error::{EvaluationError, MathError, MathResult};
use crate::metric::compute_error;
use crate::objective::{
    eval_finite, CentralDifference, Derivative, Objective, SecondCentralDifference,
};
use crate::outcome::{Outcome, Solution};
use crate::solvers::{ensure_finite, finish, finite_iterate, MethodId, SolverConfig};
use crate::trace::{Trace, EXTRA_DERIVATIVE, EXTRA_SECOND_DERIVATIVE};

/// Update rule applied at each step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// `x - k f / f'` for a known multiplicity `k`.
    Scaled(f64),
    /// `x - f f' / (f'^2 - f f'')`, multiplicity not required.
    Schroder,
}

/// Root finder for repeated roots.
///
/// Plain Newton-Raphson only converges linearly on a root of multiplicity
/// `k > 1`. Two corrections restore quadratic convergence:
///
/// - With a known `multiplicity` the step is scaled:
///   `x_{n+1} = x_n - k f(x_n) / f'(x_n)`. `d2f` is ignored.
/// - Without it, Schröder's method is used:
///   `x_{n+1} = x_n - f f' / (f'^2 - f f'')`, which needs `f''`.
///
/// Missing derivatives are estimated with central differences. Records carry
/// `"df"` and, for Schröder's method, `"d2f"`. A vanishing denominator ends
/// the run with [`Outcome::ZeroDerivative`].
///
/// # Errors
///
/// A multiplicity of zero is rejected as invalid input.
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{multiple_roots, SolverConfig};
///
/// // (x - 1)^2 (x + 2): double root at 1
/// let f = |x: f64| x * x * x - 3.0 * x + 2.0;
/// let df = |x: f64| 3.0 * x * x - 3.0;
/// let d2f = |x: f64| 6.0 * x;
///
/// let solution =
///     multiple_roots(&f, Some(&df), Some(&d2f), None, 1.5, &SolverConfig::new(1e-6, 50)).unwrap();
/// assert!((solution.root().unwrap() - 1.0).abs() < 1e-6);
/// ```
pub fn multiple_roots<F, D1, D2>(
    f: &F,
    df: Option<&D1>,
    d2f: Option<&D2>,
    multiplicity: Option<u32>,
    x0: f64,
    config: &SolverConfig,
) -> MathResult<Solution>
where
    F: Objective + ?Sized,
    D1: Objective + ?Sized,
    D2: Objective + ?Sized,
{
    config.validate()?;
    ensure_finite("x0", x0)?;

    let step = match multiplicity {
        Some(0) => return Err(MathError::invalid_input("multiplicity must be at least 1")),
        Some(k) => Step::Scaled(f64::from(k)),
        None => Step::Schroder,
    };

    let df = Derivative::or_estimate(df, || CentralDifference::new(f));
    let d2f = Derivative::or_estimate(d2f, || SecondCentralDifference::new(f));
    if df.is_estimated() || (step == Step::Schroder && d2f.is_estimated()) {
        log::debug!("multiple roots: estimating missing derivatives with central differences");
    }

    let mut trace = Trace::with_capacity(config.max_iterations + 1);
    let result = iterate(f, &df, &d2f, step, x0, config, &mut trace);
    let order_estimate = trace.order_estimate();

    let mut solution = finish(MethodId::MultipleRoots, trace, result);
    solution.order_estimate = order_estimate;
    Ok(solution)
}

/// Evaluates the derivatives at `x` and records the point.
fn record<F, D1, D2>(
    f: &F,
    df: &D1,
    d2f: &D2,
    step: Step,
    x: f64,
    error: Option<f64>,
    trace: &mut Trace,
) -> Result<(f64, f64, f64), EvaluationError>
where
    F: Objective + ?Sized,
    D1: Objective + ?Sized,
    D2: Objective + ?Sized,
{
    let fx = eval_finite(f, "f", x)?;
    let dfx = eval_finite(df, "f'", x)?;
    match step {
        Step::Scaled(_) => {
            trace.push_with(x, fx, error, [(EXTRA_DERIVATIVE, dfx)]);
            Ok((fx, dfx, 0.0))
        }
        Step::Schroder => {
            let d2fx = eval_finite(d2f, "f''", x)?;
            trace.push_with(
                x,
                fx,
                error,
                [(EXTRA_DERIVATIVE, dfx), (EXTRA_SECOND_DERIVATIVE, d2fx)],
            );
            Ok((fx, dfx, d2fx))
        }
    }
}

fn iterate<F, D1, D2>(
    f: &F,
    df: &D1,
    d2f: &D2,
    step: Step,
    x0: f64,
    config: &SolverConfig,
    trace: &mut Trace,
) -> Result<Outcome, EvaluationError>
where
    F: Objective + ?Sized,
    D1: Objective + ?Sized,
    D2: Objective + ?Sized,
{
    let mut x = x0;
    let (mut fx, mut dfx, mut d2fx) = record(f, df, d2f, step, x, None, trace)?;

    if fx == 0.0 {
        return Ok(Outcome::Converged {
            root: x,
            iterations: 0,
        });
    }

    for iteration in 1..=config.max_iterations {
        let (numerator, denominator) = match step {
            Step::Scaled(k) => (k * fx, dfx),
            Step::Schroder => (fx * dfx, dfx * dfx - fx * d2fx),
        };
        if config.is_vanishing(denominator) {
            return Ok(Outcome::ZeroDerivative);
        }

        let x_new = finite_iterate(x - numerator / denominator)?;
        let error = compute_error(x_new, x, config.error_mode);
        (fx, dfx, d2fx) = record(f, df, d2f, step, x_new, Some(error), trace)?;
        log::debug!("multiple roots: n={iteration} x={x_new} f={fx} df={dfx} e={error}");

        x = x_new;
        if fx == 0.0 || config.accepts(error) {
            return Ok(Outcome::Converged {
                root: x,
                iterations: iteration,
            });
        }
    }

    Ok(Outcome::MaxIterationsReached { last_approx: x })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::newton_raphson;
    use approx::assert_relative_eq;

    fn none() -> Option<&'static dyn Objective> {
        None
    }

    // (x - 1)^2 (x + 2)
    fn f(x: f64) -> f64 {
        x * x * x - 3.0 * x + 2.0
    }

    fn df(x: f64) -> f64 {
        3.0 * x * x - 3.0
    }

    fn d2f(x: f64) -> f64 {
        6.0 * x
    }

    #[test]
    fn test_known_multiplicity_hits_square_exactly() {
        let f = |x: f64| x * x - 2.0 * x + 1.0;
        let df = |x: f64| 2.0 * x - 2.0;

        // 3 - 2 * 4 / 4 == 1
        let solution =
            multiple_roots(&f, Some(&df), none(), Some(2), 3.0, &SolverConfig::default()).unwrap();

        assert_eq!(
            solution.outcome,
            Outcome::Converged {
                root: 1.0,
                iterations: 1
            }
        );
        assert_eq!(solution.method, MethodId::MultipleRoots);
    }

    #[test]
    fn test_known_multiplicity_beats_newton() {
        let config = SolverConfig::new(1e-6, 100);

        let modified = multiple_roots(&f, Some(&df), none(), Some(2), 1.5, &config).unwrap();
        let plain = newton_raphson(&f, Some(&df), 1.5, &config).unwrap();

        assert_relative_eq!(modified.root().unwrap(), 1.0, epsilon = 1e-4);
        assert!(modified.iterations().unwrap() < plain.iterations().unwrap());
        assert_eq!(modified.trace.extra_keys(), vec![EXTRA_DERIVATIVE]);
    }

    #[test]
    fn test_schroder_with_supplied_derivatives() {
        let solution = multiple_roots(
            &f,
            Some(&df),
            Some(&d2f),
            None,
            1.5,
            &SolverConfig::new(1e-6, 50),
        )
        .unwrap();

        assert_relative_eq!(solution.root().unwrap(), 1.0, epsilon = 1e-4);
        assert!(solution.iterations().unwrap() <= 5);
        let first = solution.trace.get(0).unwrap();
        assert_relative_eq!(first.extra(EXTRA_DERIVATIVE).unwrap(), 3.75);
        assert_relative_eq!(first.extra(EXTRA_SECOND_DERIVATIVE).unwrap(), 9.0);
    }

    #[test]
    fn test_schroder_with_estimated_derivatives() {
        let solution =
            multiple_roots(&f, none(), none(), None, 1.5, &SolverConfig::new(1e-6, 50)).unwrap();

        assert_relative_eq!(solution.root().unwrap(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_simple_root_with_unit_multiplicity() {
        let g = |x: f64| x * x - 2.0;
        let dg = |x: f64| 2.0 * x;

        let solution =
            multiple_roots(&g, Some(&dg), none(), Some(1), 1.0, &SolverConfig::new(1e-8, 50))
                .unwrap();

        assert_relative_eq!(solution.root().unwrap(), std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert!(solution.order_estimate.is_some());
    }

    #[test]
    fn test_zero_multiplicity_rejected() {
        let result = multiple_roots(&f, Some(&df), none(), Some(0), 1.5, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    #[test]
    fn test_vanishing_denominator() {
        let g = |x: f64| x * x + 1.0;
        let dg = |x: f64| 2.0 * x;

        let solution =
            multiple_roots(&g, Some(&dg), none(), Some(2), 0.0, &SolverConfig::default()).unwrap();

        assert_eq!(solution.outcome, Outcome::ZeroDerivative);
        assert_eq!(solution.trace.len(), 1);
    }
}
