//! Character source for the lexer
//!
//! Wraps an owned character buffer and hands out one character at a time
//! with position tracking. The buffer lives exactly as long as the reader;
//! the lexer owns the reader, so dropping the lexer releases everything.

/// Character returned once the input is exhausted. Reading past the end
/// keeps yielding this without error.
pub const EOF_CHAR: char = '\0';

/// True for the four characters the contract treats as line terminators:
/// LF, CR, LINE SEPARATOR, PARAGRAPH SEPARATOR.
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}')
}

/// Sequential character reader with zero-based line/column counters.
///
/// Both counters read -1 until the first character is consumed. `column`
/// then tracks the index of the most recently returned character; `line`
/// starts at 0 and increments whenever a line terminator is consumed.
#[derive(Debug)]
pub struct CharReader {
    chars: Vec<char>,
    pos: usize,
    line: i32,
    column: i32,
}

impl CharReader {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: -1,
            column: -1,
        }
    }

    /// Consume and return the next character, or [`EOF_CHAR`] at the end.
    pub fn next(&mut self) -> char {
        match self.chars.get(self.pos) {
            Some(&c) => {
                self.pos += 1;
                self.column += 1;
                if self.line < 0 {
                    self.line = 0;
                }
                if is_line_terminator(c) {
                    self.line += 1;
                }
                c
            }
            None => EOF_CHAR,
        }
    }

    /// Look at the next character without consuming it.
    pub fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or(EOF_CHAR)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Number of characters consumed so far. Equals the index of the next
    /// unread character, which makes it the natural column for
    /// end-of-input errors.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Zero-based line of the last consumed character, -1 before any read.
    pub fn line(&self) -> i32 {
        self.line
    }

    /// Zero-based column of the last consumed character, -1 before any read.
    pub fn column(&self) -> i32 {
        self.column
    }
}
