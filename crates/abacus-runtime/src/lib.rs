//! Abacus - expression evaluation runtime
//!
//! A small tree-walking evaluator for single-line arithmetic, relational,
//! and string expressions:
//! - Lexing with one token of eager lookahead
//! - Recursive-descent parsing through a fixed precedence cascade
//! - Evaluation against a flat environment of variables and functions
//! - Math builtins and the constants `e` and `pi`, all shadowable
//!
//! The quickest entry points are the free [`evaluate`] and [`evaluate_as`]
//! functions; [`Abacus`] is the stateful context for hosts that bind their
//! own names or want result caching.
//!
//! ```
//! use abacus_runtime::{evaluate, Value};
//!
//! assert_eq!(evaluate("1 + 2 * 3"), Ok(Value::Number(7.0)));
//! ```

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod builtins;
pub mod cache;
pub mod convert;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod runtime;
pub mod span;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{BinaryExpr, BinaryOp, CallExpr, Expr, Identifier, Literal, UnaryExpr, UnaryOp};
pub use cache::CacheStats;
pub use convert::FromValue;
pub use env::{Binding, Callable, Environment, NativeFn};
pub use error::{ErrorKind, EvalError};
pub use eval::Evaluator;
pub use lexer::Lexer;
pub use parser::{Parser, MAX_NESTING_DEPTH};
pub use runtime::{evaluate, evaluate_as, parse, tokenize, Abacus};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use value::Value;
