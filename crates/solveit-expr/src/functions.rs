//! Functions and constants available inside expressions.

use evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, EvalexprResult,
    Function, HashMapContext, Value,
};

/// Named constants.
pub const CONSTANTS: [(&str, f64); 2] = [("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Names of the supported functions.
pub const FUNCTIONS: [&str; 18] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "exp", "ln", "log",
    "log10", "log2", "sqrt", "cbrt", "abs", "sign",
];

/// Set of arguments a function is defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Real,
    Positive,
    NonNegative,
    UnitInterval,
}

impl Domain {
    fn check(self, name: &str, value: f64) -> EvalexprResult<()> {
        let inside = match self {
            Self::Real => true,
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
            Self::UnitInterval => (-1.0..=1.0).contains(&value),
        };
        if inside || value.is_nan() {
            Ok(())
        } else {
            Err(EvalexprError::CustomMessage(format!(
                "{name} is undefined for {value}"
            )))
        }
    }
}

#[derive(Clone, Copy)]
struct Unary {
    name: &'static str,
    apply: fn(f64) -> f64,
    domain: Domain,
}

const UNARY: [Unary; 18] = [
    Unary { name: "sin", apply: f64::sin, domain: Domain::Real },
    Unary { name: "cos", apply: f64::cos, domain: Domain::Real },
    Unary { name: "tan", apply: f64::tan, domain: Domain::Real },
    Unary { name: "asin", apply: f64::asin, domain: Domain::UnitInterval },
    Unary { name: "acos", apply: f64::acos, domain: Domain::UnitInterval },
    Unary { name: "atan", apply: f64::atan, domain: Domain::Real },
    Unary { name: "sinh", apply: f64::sinh, domain: Domain::Real },
    Unary { name: "cosh", apply: f64::cosh, domain: Domain::Real },
    Unary { name: "tanh", apply: f64::tanh, domain: Domain::Real },
    Unary { name: "exp", apply: f64::exp, domain: Domain::Real },
    Unary { name: "ln", apply: f64::ln, domain: Domain::Positive },
    Unary { name: "log", apply: f64::ln, domain: Domain::Positive },
    Unary { name: "log10", apply: f64::log10, domain: Domain::Positive },
    Unary { name: "log2", apply: f64::log2, domain: Domain::Positive },
    Unary { name: "sqrt", apply: f64::sqrt, domain: Domain::NonNegative },
    Unary { name: "cbrt", apply: f64::cbrt, domain: Domain::Real },
    Unary { name: "abs", apply: f64::abs, domain: Domain::Real },
    Unary { name: "sign", apply: signum, domain: Domain::Real },
];

/// `sign(0) == 0`, unlike `f64::signum`.
fn signum(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Builds an evaluation context with `x` bound to `value`.
pub(crate) fn context_at(variable: &str, value: f64) -> EvalexprResult<HashMapContext> {
    let mut context = HashMapContext::new();
    for (name, constant) in CONSTANTS {
        context.set_value(name.to_string(), Value::Float(constant))?;
    }
    context.set_value(variable.to_string(), Value::Float(value))?;

    for Unary {
        name,
        apply,
        domain,
    } in UNARY
    {
        context.set_function(
            name.to_string(),
            Function::new(move |argument| {
                let v = argument.as_number()?;
                domain.check(name, v)?;
                Ok(Value::Float(apply(v)))
            }),
        )?;
    }
    Ok(context)
}

/// Returns true if `name` is a supported function.
pub(crate) fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// Returns true if `name` is a named constant.
pub(crate) fn is_constant(name: &str) -> bool {
    CONSTANTS.iter().any(|(c, _)| *c == name)
}
