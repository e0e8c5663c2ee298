//! Error types
//!
//! Every failure in the pipeline surfaces as one [`EvalError`]. Errors are
//! fatal to the current evaluation: there is no recovery and no partial
//! result. Positioned variants carry a [`Span`] whose `start` is the
//! zero-based column into the expression text.

use crate::span::Span;
use serde::Serialize;
use thiserror::Error;

/// Broad classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Malformed input at the character level.
    Lexical,
    /// Token sequence that does not fit the grammar.
    Syntax,
    /// Name resolution, arity, or argument validation failures.
    Semantic,
    /// A value that does not support the requested conversion.
    Coercion,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Semantic => "semantic",
            ErrorKind::Coercion => "coercion",
        }
    }
}

/// Any error raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum EvalError {
    #[error("Expression must not be empty")]
    EmptyExpression,

    #[error("Variable and function names must not be blank")]
    BlankName,

    #[error("Unexpected character '{ch}'")]
    UnexpectedChar { ch: char, span: Span },

    #[error("Line terminator is not allowed")]
    LineTerminator { span: Span },

    #[error("{msg}")]
    InvalidNumber { msg: String, span: Span },

    #[error("Unterminated string")]
    UnterminatedString { span: Span },

    #[error("Invalid escape sequence '\\{ch}'")]
    InvalidEscape { ch: char, span: Span },

    #[error("Syntax error, odd number of brackets")]
    UnbalancedBrackets { span: Span },

    #[error("Expected expression")]
    ExpectedExpression { span: Span },

    #[error("Expected {expected} but found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String, span: Span },

    #[error("Expression nesting exceeds {max} levels")]
    NestingTooDeep { max: usize, span: Span },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String, span: Span },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String, span: Span },

    #[error("{name}() expects {expected}, got {found}")]
    ArityMismatch {
        name: String,
        expected: &'static str,
        found: usize,
        span: Span,
    },

    #[error("Operator cannot be applied to operand of type 'string'")]
    StringOperand { span: Span },

    #[error("{msg}")]
    TypeError { msg: String, span: Span },

    #[error("Cannot convert {found} to {expected}")]
    Conversion {
        expected: &'static str,
        found: String,
    },
}

impl EvalError {
    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnexpectedChar { .. }
            | EvalError::LineTerminator { .. }
            | EvalError::InvalidNumber { .. }
            | EvalError::UnterminatedString { .. }
            | EvalError::InvalidEscape { .. } => ErrorKind::Lexical,
            EvalError::UnbalancedBrackets { .. }
            | EvalError::ExpectedExpression { .. }
            | EvalError::UnexpectedToken { .. }
            | EvalError::UnexpectedEnd { .. }
            | EvalError::NestingTooDeep { .. } => ErrorKind::Syntax,
            EvalError::EmptyExpression
            | EvalError::BlankName
            | EvalError::UndefinedVariable { .. }
            | EvalError::UndefinedFunction { .. }
            | EvalError::ArityMismatch { .. } => ErrorKind::Semantic,
            EvalError::StringOperand { .. }
            | EvalError::TypeError { .. }
            | EvalError::Conversion { .. } => ErrorKind::Coercion,
        }
    }

    /// Source span, when this error points at a place in the expression.
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::EmptyExpression | EvalError::BlankName | EvalError::Conversion { .. } => {
                None
            }
            EvalError::UnexpectedChar { span, .. }
            | EvalError::LineTerminator { span }
            | EvalError::InvalidNumber { span, .. }
            | EvalError::UnterminatedString { span }
            | EvalError::InvalidEscape { span, .. }
            | EvalError::UnbalancedBrackets { span }
            | EvalError::ExpectedExpression { span }
            | EvalError::UnexpectedToken { span, .. }
            | EvalError::UnexpectedEnd { span, .. }
            | EvalError::NestingTooDeep { span, .. }
            | EvalError::UndefinedVariable { span, .. }
            | EvalError::UndefinedFunction { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::StringOperand { span }
            | EvalError::TypeError { span, .. } => Some(*span),
        }
    }

    /// Zero-based column into the expression text, when available.
    pub fn column(&self) -> Option<usize> {
        self.span().map(|s| s.start)
    }

    /// Render the error with a caret frame pointing into `expression`:
    /// the message, the expression line, then dashes up to the column
    /// ending in a caret.
    ///
    /// ```text
    /// Undefined variable: foo
    /// 3 + foo
    /// ----^
    /// ```
    pub fn pretty(&self, expression: &str) -> String {
        match self.column() {
            Some(column) => {
                format!("{}\n{}\n{}^", self, expression, "-".repeat(column))
            }
            None => self.to_string(),
        }
    }
}
