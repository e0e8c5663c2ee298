//! Built-in constants and math functions.
//!
//! All functions follow IEEE 754 semantics: domain errors return NaN rather
//! than failing, infinities propagate, and NaN poisons every operation it
//! touches. Arguments are coerced to numbers with the same rules the
//! operators use, so `sqrt(true)` is `sqrt(1)`.
//!
//! Everything here lands in the [`Environment`] as an ordinary binding. A
//! caller can rebind `pi` or `sqrt` in its own environment without touching
//! any other.

use crate::env::{Environment, NativeFn};
use crate::error::EvalError;
use crate::span::Span;
use crate::value::Value;

/// Euler's number, bound to `e`.
pub const E: f64 = std::f64::consts::E;

/// π, bound to `pi`.
pub const PI: f64 = std::f64::consts::PI;

const CONSTANTS: &[(&str, f64)] = &[("e", E), ("pi", PI)];

const FUNCTIONS: &[(&str, NativeFn)] = &[
    ("sin", sin),
    ("cos", cos),
    ("tan", tan),
    ("asin", asin),
    ("acos", acos),
    ("atan", atan),
    ("sinh", sinh),
    ("cosh", cosh),
    ("tanh", tanh),
    ("sqrt", sqrt),
    ("abs", abs),
    ("log", log),
    ("pow", pow),
];

/// Install every constant and function into `env`.
pub(crate) fn install(env: &mut Environment) {
    for (name, value) in CONSTANTS {
        env.set_constant(name, *value);
    }
    for (name, function) in FUNCTIONS {
        env.set_native(name, *function);
    }
}

/// Check arity and coerce the single argument to a number.
fn unary_arg(name: &str, args: &[Value], span: Span) -> Result<f64, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::ArityMismatch {
            name: name.to_string(),
            expected: "1 argument",
            found: args.len(),
            span,
        });
    }
    args[0].to_number(span)
}

/// sin(x), x in radians.
pub fn sin(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("sin", args, span)?.sin()))
}

/// cos(x), x in radians.
pub fn cos(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("cos", args, span)?.cos()))
}

/// tan(x), x in radians.
pub fn tan(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("tan", args, span)?.tan()))
}

/// asin(x) -> radians. NaN outside [-1, 1].
pub fn asin(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("asin", args, span)?.asin()))
}

/// acos(x) -> radians. NaN outside [-1, 1].
pub fn acos(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("acos", args, span)?.acos()))
}

/// atan(x) -> radians in (-π/2, π/2).
pub fn atan(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("atan", args, span)?.atan()))
}

/// Hyperbolic sine.
pub fn sinh(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("sinh", args, span)?.sinh()))
}

/// Hyperbolic cosine.
pub fn cosh(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("cosh", args, span)?.cosh()))
}

/// Hyperbolic tangent.
pub fn tanh(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("tanh", args, span)?.tanh()))
}

/// sqrt(x). NaN for negative x.
pub fn sqrt(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("sqrt", args, span)?.sqrt()))
}

/// Absolute value. Preserves signed zero: abs(-0) is +0.
pub fn abs(args: &[Value], span: Span) -> Result<Value, EvalError> {
    Ok(Value::Number(unary_arg("abs", args, span)?.abs()))
}

/// log(x) -> natural logarithm; log(x, base) -> logarithm in the given
/// base.
///
/// NaN for non-positive x. `log(8, 2)` is 3.
pub fn log(args: &[Value], span: Span) -> Result<Value, EvalError> {
    match args.len() {
        1 => Ok(Value::Number(args[0].to_number(span)?.ln())),
        2 => {
            let x = args[0].to_number(span)?;
            let base = args[1].to_number(span)?;
            Ok(Value::Number(x.log(base)))
        }
        n => Err(EvalError::ArityMismatch {
            name: "log".to_string(),
            expected: "1 or 2 arguments",
            found: n,
            span,
        }),
    }
}

/// pow(base, exponent) -> base raised to exponent.
pub fn pow(args: &[Value], span: Span) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::ArityMismatch {
            name: "pow".to_string(),
            expected: "2 arguments",
            found: args.len(),
            span,
        });
    }
    let base = args[0].to_number(span)?;
    let exponent = args[1].to_number(span)?;
    Ok(Value::Number(base.powf(exponent)))
}
