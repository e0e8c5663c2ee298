//! Evaluation environment.
//!
//! A single flat, case-sensitive namespace holding both variables and
//! functions. The constants `e` and `pi` and the math builtins are ordinary
//! bindings installed by [`Environment::with_builtins`], so callers can
//! shadow any of them without affecting other environments.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::builtins;
use crate::error::EvalError;
use crate::span::Span;
use crate::value::Value;

/// Signature shared by the built-in math functions. The span is the call
/// site, used for arity and argument errors.
pub type NativeFn = fn(&[Value], Span) -> Result<Value, EvalError>;

/// A function binding: built in, or registered by the host program. Host
/// functions do not see spans; they report argument problems through the
/// spanless conversion errors.
#[derive(Clone)]
pub enum Callable {
    Native(NativeFn),
    User(Rc<dyn Fn(&[Value]) -> Result<Value, EvalError>>),
}

impl Callable {
    /// Invoke with already-evaluated arguments. `span` covers the call
    /// expression.
    pub fn call(&self, args: &[Value], span: Span) -> Result<Value, EvalError> {
        match self {
            Callable::Native(f) => f(args, span),
            Callable::User(f) => f(args),
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(_) => f.write_str("Callable::Native"),
            Callable::User(_) => f.write_str("Callable::User"),
        }
    }
}

/// What a name is bound to.
#[derive(Debug, Clone)]
pub enum Binding {
    Variable(f64),
    Function(Callable),
}

/// The namespace an expression evaluates against.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    generation: u64,
}

impl Environment {
    /// An environment with no bindings at all, not even the constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment with `e`, `pi`, and the math builtins installed.
    pub fn with_builtins() -> Self {
        let mut env = Self::new();
        builtins::install(&mut env);
        env
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// The number bound to `name`, if the binding is a variable. A name
    /// bound to a function yields `None`, same as an unbound name.
    pub fn variable(&self, name: &str) -> Option<f64> {
        match self.bindings.get(name) {
            Some(Binding::Variable(value)) => Some(*value),
            _ => None,
        }
    }

    /// The callable bound to `name`, if the binding is a function.
    pub fn function(&self, name: &str) -> Option<&Callable> {
        match self.bindings.get(name) {
            Some(Binding::Function(callable)) => Some(callable),
            _ => None,
        }
    }

    /// Bind `name` to a number, replacing any previous binding of either
    /// kind. The name is trimmed; a blank name is rejected.
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<(), EvalError> {
        let name = Self::validated(name)?;
        self.bindings.insert(name, Binding::Variable(value));
        self.generation += 1;
        Ok(())
    }

    /// Bind `name` to a host function, replacing any previous binding of
    /// either kind. The name is trimmed; a blank name is rejected.
    pub fn set_function<F>(&mut self, name: &str, function: F) -> Result<(), EvalError>
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    {
        let name = Self::validated(name)?;
        self.bindings
            .insert(name, Binding::Function(Callable::User(Rc::new(function))));
        self.generation += 1;
        Ok(())
    }

    /// Install a builtin. Names come from a static table, so no validation.
    pub(crate) fn set_native(&mut self, name: &str, function: NativeFn) {
        self.bindings
            .insert(name.to_string(), Binding::Function(Callable::Native(function)));
        self.generation += 1;
    }

    pub(crate) fn set_constant(&mut self, name: &str, value: f64) {
        self.bindings
            .insert(name.to_string(), Binding::Variable(value));
        self.generation += 1;
    }

    /// Monotonic counter bumped on every mutation. Cached evaluation
    /// results are stamped with it so stale entries can be detected.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn validated(name: &str) -> Result<String, EvalError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EvalError::BlankName);
        }
        Ok(trimmed.to_string())
    }
}
