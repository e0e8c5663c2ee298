//! Token definitions
//!
//! Tokens are immutable value objects produced by the lexer and consumed
//! exactly once by the parser (plus one token of lookahead). For `Number`
//! tokens the lexeme is the scanned spelling; for `String` tokens it is the
//! decoded value with escapes already processed.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Punctuators
    LeftParen,
    RightParen,
    Comma,
    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    // Relational operators
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    // Literals
    Number,
    String,
    True,
    False,
    // Names
    Identifier,
}

impl TokenKind {
    /// Human-readable spelling used in parser error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Equality => "==",
            TokenKind::Inequality => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessOrEqual => "<=",
            TokenKind::GreaterOrEqual => ">=",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Identifier => "identifier",
        }
    }

    /// True for the four literal token kinds.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False
        )
    }
}

/// A single lexical unit with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Zero-based column where this token starts.
    pub fn column(&self) -> usize {
        self.span.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuator_spellings() {
        assert_eq!(TokenKind::LeftParen.as_str(), "(");
        assert_eq!(TokenKind::Percent.as_str(), "%");
        assert_eq!(TokenKind::Equality.as_str(), "==");
        assert_eq!(TokenKind::Inequality.as_str(), "!=");
        assert_eq!(TokenKind::LessOrEqual.as_str(), "<=");
    }

    #[test]
    fn literal_classification() {
        assert!(TokenKind::Number.is_literal());
        assert!(TokenKind::String.is_literal());
        assert!(TokenKind::True.is_literal());
        assert!(TokenKind::False.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(!TokenKind::Plus.is_literal());
    }

    #[test]
    fn token_column_is_span_start() {
        let token = Token::new(TokenKind::Number, "42", Span::new(7, 9));
        assert_eq!(token.column(), 7);
        assert_eq!(token.lexeme, "42");
    }
}
