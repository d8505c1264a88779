//! Functions the drivers can evaluate.
//!
//! Any `Fn(f64) -> f64` closure is an [`Objective`]. Fallible sources such as
//! parsed expressions implement the trait directly and report failures as
//! [`EvaluationError`].

use crate::error::EvaluationError;

/// Step size for the first-derivative central difference.
pub const FIRST_DERIVATIVE_STEP: f64 = 1e-8;

/// Step size for the second-derivative central difference.
pub const SECOND_DERIVATIVE_STEP: f64 = 1e-4;

/// A real-valued function of one real variable.
///
/// Implementations must be safe to evaluate from several threads at once;
/// drivers never mutate the function they are given.
pub trait Objective: Send + Sync {
    /// Evaluates the function at `x`.
    fn eval(&self, x: f64) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        Ok(self(x))
    }
}

/// First derivative estimated by central differences.
///
/// `f'(x) ≈ (f(x + h) - f(x - h)) / 2h`
#[derive(Debug, Clone, Copy)]
pub struct CentralDifference<'a, F: ?Sized> {
    f: &'a F,
    step: f64,
}

impl<'a, F: Objective + ?Sized> CentralDifference<'a, F> {
    /// Wraps `f` with the default step size.
    pub fn new(f: &'a F) -> Self {
        Self::with_step(f, FIRST_DERIVATIVE_STEP)
    }

    /// Wraps `f` with a custom step size.
    pub fn with_step(f: &'a F, step: f64) -> Self {
        Self { f, step }
    }
}

impl<F: Objective + ?Sized> Objective for CentralDifference<'_, F> {
    fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let h = self.step;
        let f1 = self.f.eval(x + h)?;
        let f2 = self.f.eval(x - h)?;
        Ok((f1 - f2) / (2.0 * h))
    }
}

/// Second derivative estimated by central differences.
///
/// `f''(x) ≈ (f(x + h) - 2f(x) + f(x - h)) / h²`
#[derive(Debug, Clone, Copy)]
pub struct SecondCentralDifference<'a, F: ?Sized> {
    f: &'a F,
    step: f64,
}

impl<'a, F: Objective + ?Sized> SecondCentralDifference<'a, F> {
    /// Wraps `f` with the default step size.
    pub fn new(f: &'a F) -> Self {
        Self::with_step(f, SECOND_DERIVATIVE_STEP)
    }

    /// Wraps `f` with a custom step size.
    pub fn with_step(f: &'a F, step: f64) -> Self {
        Self { f, step }
    }
}

impl<F: Objective + ?Sized> Objective for SecondCentralDifference<'_, F> {
    fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let h = self.step;
        let f1 = self.f.eval(x + h)?;
        let f0 = self.f.eval(x)?;
        let f2 = self.f.eval(x - h)?;
        Ok((f1 - 2.0 * f0 + f2) / (h * h))
    }
}

/// A supplied derivative, or an estimate standing in for a missing one.
pub(crate) enum Derivative<'a, D: ?Sized, E> {
    Given(&'a D),
    Estimated(E),
}

impl<'a, D: ?Sized, E> Derivative<'a, D, E> {
    pub(crate) fn or_estimate(given: Option<&'a D>, estimate: impl FnOnce() -> E) -> Self {
        match given {
            Some(d) => Self::Given(d),
            None => Self::Estimated(estimate()),
        }
    }

    pub(crate) fn is_estimated(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }
}

impl<D: Objective + ?Sized, E: Objective> Objective for Derivative<'_, D, E> {
    fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        match self {
            Self::Given(d) => d.eval(x),
            Self::Estimated(e) => e.eval(x),
        }
    }
}

/// Evaluates `f` at `x`, rejecting NaN and infinite results.
///
/// `name` labels the function in the error message (`"f"`, `"g"`, `"f'"`).
pub(crate) fn eval_finite<F: Objective + ?Sized>(
    f: &F,
    name: &str,
    x: f64,
) -> Result<f64, EvaluationError> {
    let value = f.eval(x)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::non_finite(name, x, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_is_objective() {
        let f = |x: f64| x * x;
        assert_relative_eq!(f.eval(3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_central_difference() {
        let f = |x: f64| x * x * x;
        let df = CentralDifference::new(&f);
        assert_relative_eq!(df.eval(2.0).unwrap(), 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_second_central_difference() {
        let f = |x: f64| x * x * x;
        let d2f = SecondCentralDifference::new(&f);
        assert_relative_eq!(d2f.eval(2.0).unwrap(), 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_eval_finite_rejects_nan() {
        let f = |x: f64| x.ln();
        assert!(eval_finite(&f, "f", -1.0).is_err());
        assert!(eval_finite(&f, "f", 0.0).is_err());
        assert_relative_eq!(eval_finite(&f, "f", 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_derivative_prefers_given() {
        let f = |x: f64| x * x;
        let df = |_x: f64| 100.0;

        let given = Derivative::or_estimate(Some(&df), || CentralDifference::new(&f));
        assert!(!given.is_estimated());
        assert_relative_eq!(given.eval(1.0).unwrap(), 100.0);

        let missing: Option<&dyn Objective> = None;
        let estimated = Derivative::or_estimate(missing, || CentralDifference::new(&f));
        assert!(estimated.is_estimated());
        assert_relative_eq!(estimated.eval(1.0).unwrap(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_dyn_objective() {
        let f = |x: f64| 2.0 * x;
        let dynamic: &dyn Objective = &f;
        let df = CentralDifference::new(dynamic);
        assert_relative_eq!(df.eval(1.0).unwrap(), 2.0, epsilon = 1e-6);
    }
}
