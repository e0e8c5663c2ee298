//! Runtime value representation
//!
//! The evaluated domain has exactly three kinds: IEEE-754 numbers, booleans,
//! and strings. Coercion between them is the operators' job; the rules live
//! here so the evaluator, the built-ins, and `evaluate_as` all agree.

use crate::error::EvalError;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Numeric view of this value: numbers pass through, booleans map to
    /// 1/0, strings parse as `f64` after trimming. A non-numeric string is
    /// a coercion error naming the string.
    pub fn to_number(&self, span: Span) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| EvalError::TypeError {
                msg: format!("Cannot convert '{}' to a number", s),
                span,
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                // Format numbers without a trailing .0 for whole values
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
