//! Embedding API.
//!
//! [`Abacus`] is an evaluation context: an [`Environment`] plus an optional
//! result cache behind a `RefCell`, so evaluation stays `&self`. The free
//! [`evaluate`] and [`evaluate_as`] functions are the stateless variant,
//! running each expression against a fresh built-ins-only environment.

use std::cell::RefCell;

use crate::ast::Expr;
use crate::cache::{CacheStats, ResultCache};
use crate::convert::FromValue;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Token;
use crate::value::Value;

/// An evaluation context holding variables and functions across calls.
///
/// # Examples
///
/// ```
/// use abacus_runtime::{Abacus, Value};
///
/// let abacus = Abacus::new();
/// let result = abacus.evaluate("1 + 2 * 3");
/// assert_eq!(result, Ok(Value::Number(7.0)));
/// ```
#[derive(Debug)]
pub struct Abacus {
    env: Environment,
    cache: Option<RefCell<ResultCache>>,
}

impl Abacus {
    /// A context with `e`, `pi`, and the math builtins bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use abacus_runtime::Abacus;
    ///
    /// let abacus = Abacus::new();
    /// let n: f64 = abacus.evaluate_as("sqrt(16)").unwrap();
    /// assert_eq!(n, 4.0);
    /// ```
    pub fn new() -> Self {
        Self {
            env: Environment::with_builtins(),
            cache: None,
        }
    }

    /// Evaluate one expression against this context.
    ///
    /// # Examples
    ///
    /// ```
    /// use abacus_runtime::{Abacus, Value};
    ///
    /// let mut abacus = Abacus::new();
    /// abacus.set_variable("x", 10.0).unwrap();
    /// assert_eq!(abacus.evaluate("x * 2"), Ok(Value::Number(20.0)));
    /// assert!(abacus.evaluate("y * 2").is_err());
    /// ```
    pub fn evaluate(&self, expression: &str) -> Result<Value, EvalError> {
        let key = expression.trim();
        if let Some(cache) = &self.cache {
            if let Some(value) = cache.borrow_mut().get(key, self.env.generation()) {
                return Ok(value);
            }
        }

        let expr = Parser::new(expression)?.parse()?;
        let value = Evaluator::new(&self.env).eval(&expr)?;

        if let Some(cache) = &self.cache {
            cache
                .borrow_mut()
                .insert(key, value.clone(), self.env.generation());
        }
        Ok(value)
    }

    /// Evaluate and convert the result to `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use abacus_runtime::Abacus;
    ///
    /// let abacus = Abacus::new();
    /// let n: i64 = abacus.evaluate_as("pow(2, 10)").unwrap();
    /// assert_eq!(n, 1024);
    /// let b: bool = abacus.evaluate_as("1 < 2").unwrap();
    /// assert!(b);
    /// ```
    pub fn evaluate_as<T: FromValue>(&self, expression: &str) -> Result<T, EvalError> {
        T::from_value(&self.evaluate(expression)?)
    }

    /// Bind a variable. Returns `&mut Self` so bindings chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use abacus_runtime::Abacus;
    ///
    /// # fn main() -> Result<(), abacus_runtime::EvalError> {
    /// let mut abacus = Abacus::new();
    /// abacus.set_variable("width", 3.0)?.set_variable("height", 4.0)?;
    /// let area: f64 = abacus.evaluate_as("width * height")?;
    /// assert_eq!(area, 12.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<&mut Self, EvalError> {
        self.env.set_variable(name, value)?;
        Ok(self)
    }

    /// Bind a host function. Returns `&mut Self` so bindings chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use abacus_runtime::{Abacus, FromValue, Value};
    ///
    /// let mut abacus = Abacus::new();
    /// abacus
    ///     .set_function("clamp01", |args| {
    ///         let x = f64::from_value(&args[0])?;
    ///         Ok(Value::Number(x.clamp(0.0, 1.0)))
    ///     })
    ///     .unwrap();
    /// assert_eq!(abacus.evaluate("clamp01(1.7)"), Ok(Value::Number(1.0)));
    /// ```
    pub fn set_function<F>(&mut self, name: &str, function: F) -> Result<&mut Self, EvalError>
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    {
        self.env.set_function(name, function)?;
        Ok(self)
    }

    /// Turn on result caching for this context. Idempotent; an existing
    /// cache keeps its entries and statistics.
    pub fn enable_cache(&mut self) {
        if self.cache.is_none() {
            self.cache = Some(RefCell::new(ResultCache::new()));
        }
    }

    /// Drop every cached entry, keeping the cache enabled.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = &self.cache {
            cache.borrow_mut().clear();
        }
    }

    /// Counters for the cache, or `None` when caching is off.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.borrow().stats())
    }

    /// The environment this context evaluates against.
    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate one expression against a fresh built-ins-only environment.
///
/// # Examples
///
/// ```
/// use abacus_runtime::{evaluate, Value};
///
/// assert_eq!(evaluate("10 % 4"), Ok(Value::Number(2.0)));
/// assert_eq!(
///     evaluate("\"a\" + \"b\""),
///     Ok(Value::String("ab".to_string()))
/// );
/// ```
pub fn evaluate(expression: &str) -> Result<Value, EvalError> {
    Abacus::new().evaluate(expression)
}

/// Evaluate against a fresh environment and convert the result to `T`.
///
/// # Examples
///
/// ```
/// use abacus_runtime::evaluate_as;
///
/// let n: i32 = evaluate_as("-(1 + 2)").unwrap();
/// assert_eq!(n, -3);
/// ```
pub fn evaluate_as<T: FromValue>(expression: &str) -> Result<T, EvalError> {
    T::from_value(&evaluate(expression)?)
}

/// Run just the lexer, collecting every token.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut lexer = Lexer::new(expression)?;
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Run the lexer and parser, producing the expression tree.
pub fn parse(expression: &str) -> Result<Expr, EvalError> {
    Parser::new(expression)?.parse()
}
