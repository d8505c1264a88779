//! Secant root-finding algorithm.

use crate::error::{EvaluationError, MathResult};
use crate::metric::compute_error;
use crate::objective::{eval_finite, Objective};
use crate::outcome::{Outcome, Solution};
use crate::solvers::{ensure_finite, finish, finite_iterate, MethodId, SolverConfig};
use crate::trace::Trace;

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but approximates the derivative using
/// the slope through the two most recent iterates. Does not require
/// an analytical derivative or a bracketing interval.
///
/// Convergence rate is superlinear (order ~1.618, the golden ratio).
///
/// The seeds are trace records 0 and 1, so `x1` counts as the first
/// iteration. The tolerance is tested from the first secant iterate on, and
/// a step within tolerance is accepted only when `|f|` did not grow. A
/// horizontal secant (`f(x_n) == f(x_{n-1})`, equal seeds included) ends the
/// run with [`Outcome::ZeroDerivative`].
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let solution = secant(&f, 1.0, 2.0, &SolverConfig::new(1e-12, 50)).unwrap();
/// assert!((solution.root().unwrap() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: &F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<Solution>
where
    F: Objective + ?Sized,
{
    config.validate()?;
    ensure_finite("x0", x0)?;
    ensure_finite("x1", x1)?;

    let mut trace = Trace::with_capacity(config.max_iterations + 1);
    let result = iterate(f, x0, x1, config, &mut trace);
    Ok(finish(MethodId::Secant, trace, result))
}

fn iterate<F>(
    f: &F,
    x0: f64,
    x1: f64,
    config: &SolverConfig,
    trace: &mut Trace,
) -> Result<Outcome, EvaluationError>
where
    F: Objective + ?Sized,
{
    let mut x_prev = x0;
    let mut f_prev = eval_finite(f, "f", x_prev)?;
    trace.push(x_prev, f_prev, None);

    if f_prev == 0.0 {
        return Ok(Outcome::Converged {
            root: x_prev,
            iterations: 0,
        });
    }

    let mut x_curr = x1;
    let mut f_curr = eval_finite(f, "f", x_curr)?;
    let error = compute_error(x_curr, x_prev, config.error_mode);
    trace.push(x_curr, f_curr, Some(error));

    // Seeds are inputs, not iterates: only an exact root ends the run here
    if f_curr == 0.0 {
        return Ok(Outcome::Converged {
            root: x_curr,
            iterations: 1,
        });
    }

    for iteration in 2..=config.max_iterations {
        // Horizontal secant line
        let denom = f_curr - f_prev;
        if denom == 0.0 {
            return Ok(Outcome::ZeroDerivative);
        }

        // Secant step: x_next = x_curr - f(x_curr) * (x_curr - x_prev) / (f(x_curr) - f(x_prev))
        let x_next = finite_iterate(x_curr - f_curr * (x_curr - x_prev) / denom)?;
        let f_next = eval_finite(f, "f", x_next)?;
        let error = compute_error(x_next, x_curr, config.error_mode);
        trace.push(x_next, f_next, Some(error));
        log::debug!("secant: n={iteration} x={x_next} f={f_next} e={error}");

        // A short step only counts if the residual did not grow
        let converged =
            f_next == 0.0 || (config.accepts(error) && f_next.abs() <= f_curr.abs());

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;

        if converged {
            return Ok(Outcome::Converged {
                root: x_curr,
                iterations: iteration,
            });
        }
    }

    Ok(Outcome::MaxIterationsReached {
        last_approx: x_curr,
    })
}
