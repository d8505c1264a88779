//! End-to-end scenarios through the method dispatcher.

use approx::assert_relative_eq;
use solveit_math::prelude::*;

// =============================================================================
// CONVERGENCE
// =============================================================================

#[test]
fn bisection_on_sqrt_2() {
    let f = |x: f64| x * x - 2.0;
    let inputs = MethodInputs::Bisection {
        f: &f,
        xi: 0.0,
        xs: 2.0,
    };

    let solution = run(&inputs, &SolverConfig::new(1e-4, 50)).unwrap();

    assert_relative_eq!(solution.root().unwrap(), 1.414_213_56, epsilon = 1e-4);
    assert!(solution.iterations().unwrap() <= 20);
}

#[test]
fn newton_on_sqrt_2() {
    let f = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;
    let inputs = MethodInputs::Newton {
        f: &f,
        df: Some(&df),
        x0: 1.0,
    };

    let solution = run(&inputs, &SolverConfig::new(1e-8, 20)).unwrap();

    assert_relative_eq!(solution.root().unwrap(), 1.414_213_562_4, epsilon = 1e-10);
    assert!(solution.iterations().unwrap() <= 6);
}

#[test]
fn relative_and_significant_figure_modes() {
    let f = |x: f64| x * x - 1e6;
    let df = |x: f64| 2.0 * x;

    let relative = SolverConfig::new(1e-9, 50).with_error_mode(ErrorMode::Relative);
    let solution = newton_raphson(&f, Some(&df), 500.0, &relative).unwrap();
    assert_relative_eq!(solution.root().unwrap(), 1000.0, max_relative = 1e-9);

    let sig_figs = SolverConfig::new(6.0, 50).with_error_mode(ErrorMode::SignificantFigures);
    let solution = newton_raphson(&f, Some(&df), 500.0, &sig_figs).unwrap();
    assert_relative_eq!(solution.root().unwrap(), 1000.0, max_relative = 1e-6);
}

// =============================================================================
// CLASSIFIED FAILURES
// =============================================================================

#[test]
fn secant_without_real_root_never_converges() {
    let f = |x: f64| x * x + 1.0;
    let config = SolverConfig::new(1e-7, 10);

    let seeds = [
        (0.5, 2.0),
        (-3.0, 1.0),
        (10.0, 11.0),
        (0.1, 0.2),
        (0.5, 0.5),
        (1.0, 1.0 + 1e-9),
    ];
    for (x0, x1) in seeds {
        let solution = run(&MethodInputs::Secant { f: &f, x0, x1 }, &config).unwrap();
        assert!(
            !solution.is_converged(),
            "seeds ({x0}, {x1}) converged: {:?}",
            solution.outcome
        );
    }
}

#[test]
fn regula_falsi_on_flat_function() {
    let f = |_x: f64| 3.0;
    let inputs = MethodInputs::RegulaFalsi {
        f: &f,
        xi: 0.0,
        xs: 2.0,
    };

    let solution = run(&inputs, &SolverConfig::default()).unwrap();

    assert_eq!(solution.outcome, Outcome::DegenerateBracket);
    assert!(solution.trace.is_empty());
}

#[test]
fn fixed_point_divergence() {
    let f = |x: f64| x * x * x - x;
    let g = |x: f64| x * x * x;
    let inputs = MethodInputs::FixedPoint { f: &f, g: &g, x0: 2.0 };

    let solution = run(&inputs, &SolverConfig::new(1e-7, 30)).unwrap();

    assert!(matches!(
        solution.outcome,
        Outcome::MaxIterationsReached { .. } | Outcome::DomainError { .. }
    ));
}

#[test]
fn invalid_bracket_for_both_bracketing_methods() {
    let f = |x: f64| x * x + 1.0;
    let config = SolverConfig::default();

    for inputs in [
        MethodInputs::Bisection { f: &f, xi: -1.0, xs: 2.0 },
        MethodInputs::RegulaFalsi { f: &f, xi: -1.0, xs: 2.0 },
    ] {
        let solution = run(&inputs, &config).unwrap();
        assert_eq!(solution.outcome, Outcome::InvalidBracket);
        assert!(solution.trace.is_empty());
    }
}

#[test]
fn evaluation_failure_keeps_partial_trace() {
    let f = |x: f64| x.sqrt() - 1.0;
    let df = |x: f64| 0.5 / x.sqrt();

    // x0 = 9: x1 = 9 - 2 * 6 = -3
    let solution = newton_raphson(&f, Some(&df), 9.0, &SolverConfig::default()).unwrap();

    match &solution.outcome {
        Outcome::DomainError { message } => assert!(message.contains("not finite")),
        other => panic!("expected a domain error, got {other:?}"),
    }
    assert_eq!(solution.trace.len(), 1);
}

// =============================================================================
// MALFORMED INPUT
// =============================================================================

#[test]
fn malformed_inputs_are_errors() {
    let f = |x: f64| x;

    assert!(bisection(&f, 1.0, 1.0, &SolverConfig::default()).is_err());
    assert!(secant(&f, f64::NAN, 1.0, &SolverConfig::default()).is_err());
    assert!(fixed_point(&f, &f, 0.0, &SolverConfig::new(1e-7, 0)).is_err());

    let fractional_figures =
        SolverConfig::new(0.5, 10).with_error_mode(ErrorMode::SignificantFigures);
    assert!(regula_falsi(&f, -1.0, 1.0, &fractional_figures).is_err());
}

#[test]
fn solution_serializes_with_stable_field_names() {
    let f = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;

    let solution = newton_raphson(&f, Some(&df), 1.0, &SolverConfig::new(1e-8, 20)).unwrap();
    let json = serde_json::to_value(&solution).unwrap();

    assert_eq!(json["method"], "newton");
    assert_eq!(json["outcome"]["status"], "converged");
    let first = &json["trace"][0];
    assert_eq!(first["index"], 0);
    assert_eq!(first["x"], 1.0);
    assert_eq!(first["f_x"], -1.0);
    assert!(first["error"].is_null());
    assert_eq!(first["extra"]["df"], 2.0);
}
