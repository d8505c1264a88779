//! Newton-Raphson root-finding algorithm.

use crate::error::{EvaluationError, MathResult};
use crate::metric::compute_error;
use crate::objective::{eval_finite, CentralDifference, Derivative, Objective};
use crate::outcome::{Outcome, Solution};
use crate::solvers::{ensure_finite, finish, finite_iterate, MethodId, SolverConfig};
use crate::trace::{Trace, EXTRA_DERIVATIVE};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Converges quadratically near a simple root when the initial guess is
/// close enough. When `df` is `None` the derivative is estimated with
/// central differences.
///
/// Every record carries `f'(x_n)` under the `"df"` key. A derivative smaller
/// than [`SolverConfig::derivative_guard`] ends the run with
/// [`Outcome::ZeroDerivative`]. The returned solution carries an estimate of
/// the observed convergence order.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of f, if known
/// * `x0` - Initial guess
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let solution = newton_raphson(&f, Some(&df), 1.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((solution.root().unwrap() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, D>(
    f: &F,
    df: Option<&D>,
    x0: f64,
    config: &SolverConfig,
) -> MathResult<Solution>
where
    F: Objective + ?Sized,
    D: Objective + ?Sized,
{
    config.validate()?;
    ensure_finite("x0", x0)?;

    let df = Derivative::or_estimate(df, || CentralDifference::new(f));
    if df.is_estimated() {
        log::debug!("newton: no derivative supplied, using central differences");
    }

    let mut trace = Trace::with_capacity(config.max_iterations + 1);
    let result = iterate(f, &df, x0, config, &mut trace);
    let order_estimate = trace.order_estimate();

    let mut solution = finish(MethodId::Newton, trace, result);
    solution.order_estimate = order_estimate;
    Ok(solution)
}

fn iterate<F, D>(
    f: &F,
    df: &D,
    x0: f64,
    config: &SolverConfig,
    trace: &mut Trace,
) -> Result<Outcome, EvaluationError>
where
    F: Objective + ?Sized,
    D: Objective + ?Sized,
{
    let mut x = x0;
    let mut fx = eval_finite(f, "f", x)?;
    let mut dfx = eval_finite(df, "f'", x)?;
    trace.push_with(x, fx, None, [(EXTRA_DERIVATIVE, dfx)]);

    if fx == 0.0 {
        return Ok(Outcome::Converged {
            root: x,
            iterations: 0,
        });
    }

    for iteration in 1..=config.max_iterations {
        if config.is_vanishing(dfx) {
            return Ok(Outcome::ZeroDerivative);
        }

        let x_new = finite_iterate(x - fx / dfx)?;
        fx = eval_finite(f, "f", x_new)?;
        dfx = eval_finite(df, "f'", x_new)?;
        let error = compute_error(x_new, x, config.error_mode);
        trace.push_with(x_new, fx, Some(error), [(EXTRA_DERIVATIVE, dfx)]);
        log::debug!("newton: n={iteration} x={x_new} f={fx} df={dfx} e={error}");

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
