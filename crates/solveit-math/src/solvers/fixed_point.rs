//! Fixed-point iteration.

use crate::error::{EvaluationError, MathResult};
use crate::metric::compute_error;
use crate::objective::{eval_finite, Objective};
use crate::outcome::{Outcome, Solution};
use crate::solvers::{ensure_finite, finish, MethodId, SolverConfig};
use crate::trace::Trace;

/// Fixed-point root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = g(x_n)`
///
/// `g` is a reformulation of `f(x) = 0` as `x = g(x)`; `f` is only
/// evaluated to report the residual of each iterate. The run converges when
/// the error meets the tolerance or `f(x_{n+1}) == 0` exactly. Convergence
/// is linear and requires `|g'(x)| < 1` near the fixed point.
///
/// # Arguments
///
/// * `f` - The function whose root is sought
/// * `g` - The iteration map
/// * `x0` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use solveit_math::solvers::{fixed_point, SolverConfig};
///
/// // x = cos(x)
/// let f = |x: f64| x - x.cos();
/// let g = |x: f64| x.cos();
///
/// let solution = fixed_point(&f, &g, 0.5, &SolverConfig::new(1e-10, 200)).unwrap();
/// assert!((solution.root().unwrap() - 0.739_085_133_2).abs() < 1e-9);
/// ```
pub fn fixed_point<F, G>(f: &F, g: &G, x0: f64, config: &SolverConfig) -> MathResult<Solution>
where
    F: Objective + ?Sized,
    G: Objective + ?Sized,
{
    config.validate()?;
    ensure_finite("x0", x0)?;

    let mut trace = Trace::with_capacity(config.max_iterations + 1);
    let result = iterate(f, g, x0, config, &mut trace);
    Ok(finish(MethodId::FixedPoint, trace, result))
}

fn iterate<F, G>(
    f: &F,
    g: &G,
    x0: f64,
    config: &SolverConfig,
    trace: &mut Trace,
) -> Result<Outcome, EvaluationError>
where
    F: Objective + ?Sized,
    G: Objective + ?Sized,
{
    let mut x = x0;
    let fx = eval_finite(f, "f", x)?;
    trace.push(x, fx, None);

    if fx == 0.0 {
        return Ok(Outcome::Converged {
            root: x,
            iterations: 0,
        });
    }

    for iteration in 1..=config.max_iterations {
        let x_next = eval_finite(g, "g", x)?;
        let fx = eval_finite(f, "f", x_next)?;
        let error = compute_error(x_next, x, config.error_mode);
        trace.push(x_next, fx, Some(error));
        log::debug!("fixed point: n={iteration} x={x_next} f={fx} e={error}");

        if fx == 0.0 || config.accepts(error) {
            return Ok(Outcome::Converged {
                root: x_next,
                iterations: iteration,
            });
        }
        x = x_next;
    }

    Ok(Outcome::MaxIterationsReached { last_approx: x })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cosine_fixed_point() {
        let f = |x: f64| x - x.cos();
        let g = |x: f64| x.cos();

        let solution = fixed_point(&f, &g, 0.5, &SolverConfig::new(1e-10, 200)).unwrap();

        assert_relative_eq!(solution.root().unwrap(), 0.739_085_133_215_160_7, epsilon = 1e-9);
        assert_eq!(solution.method, MethodId::FixedPoint);
    }

    #[test]
    fn test_first_record_is_initial_guess() {
        let f = |x: f64| x * x - 2.0;
        let g = |x: f64| x - (x * x - 2.0) / 3.0;

        let solution = fixed_point(&f, &g, 1.0, &SolverConfig::new(1e-12, 100)).unwrap();
        let first = solution.trace.get(0).unwrap();

        assert_relative_eq!(first.x, 1.0);
        assert_relative_eq!(first.f_x, -1.0);
        assert!(first.error.is_none());
        assert_relative_eq!(solution.root().unwrap(), std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_exact_root_stops_immediately() {
        let f = |x: f64| x - 2.0;
        let g = |_x: f64| 2.0;

        let solution = fixed_point(&f, &g, 0.0, &SolverConfig::new(1e-12, 10)).unwrap();

        // error is 2.0 but f(2) == 0
        assert_eq!(
            solution.outcome,
            Outcome::Converged {
                root: 2.0,
                iterations: 1
            }
        );
    }

    #[test]
    fn test_divergence_overflows_to_domain_error() {
        let f = |x: f64| x * x * x - x;
        let g = |x: f64| x * x * x;

        let solution = fixed_point(&f, &g, 2.0, &SolverConfig::new(1e-8, 30)).unwrap();

        assert!(matches!(solution.outcome, Outcome::DomainError { .. }));
        assert!(!solution.trace.is_empty());
    }

    #[test]
    fn test_max_iterations() {
        // Oscillates between 0 and 1
        let f = |x: f64| x - (1.0 - x);
        let g = |x: f64| 1.0 - x;

        let solution = fixed_point(&f, &g, 0.0, &SolverConfig::new(1e-8, 7)).unwrap();

        assert_eq!(
            solution.outcome,
            Outcome::MaxIterationsReached { last_approx: 1.0 }
        );
        assert_eq!(solution.trace.len(), 8);
    }

    #[test]
    fn test_invalid_start() {
        let f = |x: f64| x;
        assert!(fixed_point(&f, &f, f64::INFINITY, &SolverConfig::default()).is_err());
    }
}
