//! Conversions from evaluation results into host types.
//!
//! [`FromValue`] is the contract behind `evaluate_as`. Conversions follow
//! the same coercion philosophy as the operators: numbers, booleans, and
//! numeric strings interchange freely, while integer targets insist on a
//! whole, in-range result rather than silently truncating.

use crate::error::EvalError;
use crate::value::Value;

/// Conversion from a [`Value`] into a concrete host type.
///
/// # Examples
///
/// ```
/// use abacus_runtime::evaluate_as;
///
/// let n: i64 = evaluate_as("2 + 3").unwrap();
/// assert_eq!(n, 5);
///
/// let s: String = evaluate_as("1 + 1").unwrap();
/// assert_eq!(s, "2");
///
/// // 2.5 is not a whole number, so an integer target refuses it.
/// assert!(evaluate_as::<i64>("2.5").is_err());
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, EvalError>;
}

/// Shared numeric coercion: booleans become 1 or 0, strings are parsed.
fn coerce_number(value: &Value, expected: &'static str) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| EvalError::Conversion {
            expected,
            found: format!("'{}'", s),
        }),
    }
}

fn coerce_integer(value: &Value, expected: &'static str) -> Result<f64, EvalError> {
    let n = coerce_number(value, expected)?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(EvalError::Conversion {
            expected,
            found: format!("{}", Value::Number(n)),
        });
    }
    Ok(n)
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        Ok(value.clone())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        coerce_number(value, "a number")
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        Ok(coerce_number(value, "a number")? as f32)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        let n = coerce_integer(value, "an integer")?;
        if n < i64::MIN as f64 || n > i64::MAX as f64 {
            return Err(EvalError::Conversion {
                expected: "an integer",
                found: format!("{}", Value::Number(n)),
            });
        }
        Ok(n as i64)
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        let n = coerce_integer(value, "a 32-bit integer")?;
        if n < i32::MIN as f64 || n > i32::MAX as f64 {
            return Err(EvalError::Conversion {
                expected: "a 32-bit integer",
                found: format!("{}", Value::Number(n)),
            });
        }
        Ok(n as i32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::String(s) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(EvalError::Conversion {
                    expected: "a boolean",
                    found: format!("'{}'", s),
                }),
            },
        }
    }
}

/// The display form; never fails.
impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, EvalError> {
        Ok(value.to_string())
    }
}
