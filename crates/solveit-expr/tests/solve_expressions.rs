//! Solving parsed expressions with every driver.

use approx::assert_relative_eq;
use solveit_expr::Expression;
use solveit_math::prelude::*;
use solveit_math::solvers::run_batch;

fn parse(text: &str) -> Expression {
    Expression::parse(text).unwrap()
}

#[test]
fn every_method_solves_a_parsed_cubic() {
    let f = parse("x^3 - 2*x - 5");
    let g = parse("cbrt(2*x + 5)");
    let df = parse("3*x^2 - 2");
    let d2f = parse("6*x");
    let config = SolverConfig::new(1e-10, 200);
    let expected = 2.094_551_481_542_327;

    let all = [
        MethodInputs::FixedPoint { f: &f, g: &g, x0: 2.0 },
        MethodInputs::Bisection { f: &f, xi: 2.0, xs: 3.0 },
        MethodInputs::RegulaFalsi { f: &f, xi: 2.0, xs: 3.0 },
        MethodInputs::Secant { f: &f, x0: 2.0, x1: 3.0 },
        MethodInputs::Newton { f: &f, df: Some(&df), x0: 2.0 },
        MethodInputs::MultipleRoots {
            f: &f,
            df: Some(&df),
            d2f: Some(&d2f),
            multiplicity: None,
            x0: 2.0,
        },
    ];

    for inputs in &all {
        let solution = run(inputs, &config).unwrap();
        assert_relative_eq!(solution.root().unwrap(), expected, epsilon = 1e-8);
    }
}

#[test]
fn domain_error_reaches_the_outcome() {
    let f = parse("ln(x)");
    let df = parse("1/x");

    let solution = newton_raphson(&f, Some(&df), 3.0, &SolverConfig::default()).unwrap();

    match solution.outcome {
        Outcome::DomainError { message } => assert!(message.starts_with("ln is undefined")),
        other => panic!("expected a domain error, got {other:?}"),
    }
    assert_eq!(solution.trace.len(), 1);
}

#[test]
fn expressions_are_shared_across_parallel_runs() {
    let f = parse("x^2 - 2");
    let h = parse("cos(x) - x");
    let config = SolverConfig::new(1e-10, 100);

    let problems: Vec<_> = (0..16)
        .map(|i| {
            let inputs = if i % 2 == 0 {
                MethodInputs::Bisection { f: &f, xi: 0.0, xs: 2.0 }
            } else {
                MethodInputs::Secant { f: &h, x0: 0.0, x1: 1.0 }
            };
            (inputs, config)
        })
        .collect();

    for (i, result) in run_batch(&problems).into_iter().enumerate() {
        let root = result.unwrap().root().unwrap();
        if i % 2 == 0 {
            assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        } else {
            assert_relative_eq!(root, 0.739_085_133_215_160_7, epsilon = 1e-9);
        }
    }
}
