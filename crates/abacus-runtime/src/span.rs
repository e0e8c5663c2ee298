//! Source positions
//!
//! A [`Span`] is a half-open range of character offsets into the expression
//! text. Expressions are single-line by construction (line terminators are
//! lexical errors), so `start` doubles as the zero-based column reported in
//! errors and used for caret rendering.

use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)` within an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span for errors with no meaningful position.
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
