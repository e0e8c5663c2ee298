//! Lexer
//!
//! Streams tokens off a [`CharReader`] with exactly one token of lookahead.
//! The buffer is filled eagerly on construction and after every
//! `next_token`, so a malformed first token fails at construction time.
//! Whitespace is skipped freely, but the four line-terminator characters are
//! lexical errors wherever they appear, string literals included.

use crate::error::EvalError;
use crate::reader::{is_line_terminator, CharReader};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Streaming tokenizer with single-token lookahead.
pub struct Lexer {
    reader: CharReader,
    lookahead: Option<Token>,
}

impl Lexer {
    /// Build a lexer over `text` and scan the first token into the buffer.
    pub fn new(text: &str) -> Result<Self, EvalError> {
        let mut lexer = Self {
            reader: CharReader::new(text),
            lookahead: None,
        };
        lexer.lookahead = lexer.scan_token()?;
        Ok(lexer)
    }

    /// Take the buffered token and scan the next one. `None` once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, EvalError> {
        let token = self.lookahead.take();
        self.lookahead = self.scan_token()?;
        Ok(token)
    }

    /// The buffered token, without consuming it.
    pub fn peek_token(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    /// Characters consumed so far; the column reported by end-of-input
    /// errors.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    fn scan_token(&mut self) -> Result<Option<Token>, EvalError> {
        self.skip_whitespace();
        if self.reader.is_at_end() {
            return Ok(None);
        }

        let start = self.reader.position();
        let c = self.reader.next();
        match c {
            c if is_line_terminator(c) => Err(EvalError::LineTerminator {
                span: Span::new(start, start + 1),
            }),
            '(' => Ok(Some(self.make_token(TokenKind::LeftParen, "(", start))),
            ')' => Ok(Some(self.make_token(TokenKind::RightParen, ")", start))),
            ',' => Ok(Some(self.make_token(TokenKind::Comma, ",", start))),
            '+' => Ok(Some(self.make_token(TokenKind::Plus, "+", start))),
            '-' => Ok(Some(self.make_token(TokenKind::Minus, "-", start))),
            '*' => Ok(Some(self.make_token(TokenKind::Star, "*", start))),
            '/' => Ok(Some(self.make_token(TokenKind::Slash, "/", start))),
            '%' => Ok(Some(self.make_token(TokenKind::Percent, "%", start))),
            '=' => {
                if self.match_char('=') {
                    Ok(Some(self.make_token(TokenKind::Equality, "==", start)))
                } else {
                    Err(EvalError::UnexpectedChar {
                        ch: '=',
                        span: Span::new(start, start + 1),
                    })
                }
            }
            '!' => {
                if self.match_char('=') {
                    Ok(Some(self.make_token(TokenKind::Inequality, "!=", start)))
                } else {
                    Err(EvalError::UnexpectedChar {
                        ch: '!',
                        span: Span::new(start, start + 1),
                    })
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(Some(self.make_token(TokenKind::LessOrEqual, "<=", start)))
                } else {
                    Ok(Some(self.make_token(TokenKind::LessThan, "<", start)))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(Some(self.make_token(TokenKind::GreaterOrEqual, ">=", start)))
                } else {
                    Ok(Some(self.make_token(TokenKind::GreaterThan, ">", start)))
                }
            }
            '"' => self.string(start).map(Some),
            c if c.is_ascii_digit() => self.number(c, start).map(Some),
            '.' if self.reader.peek().is_ascii_digit() => self.number('.', start).map(Some),
            c if c.is_alphabetic() || c == '_' => Ok(Some(self.identifier(c, start))),
            c => Err(EvalError::UnexpectedChar {
                ch: c,
                span: Span::new(start, start + 1),
            }),
        }
    }

    /// Skip whitespace, excluding line terminators, which must reach
    /// `scan_token` to be reported as errors.
    fn skip_whitespace(&mut self) {
        loop {
            let c = self.reader.peek();
            if c.is_whitespace() && !is_line_terminator(c) {
                self.reader.next();
            } else {
                break;
            }
        }
    }

    /// Consume the next character if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.reader.peek() == expected {
            self.reader.next();
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind, lexeme: &str, start: usize) -> Token {
        Token::new(kind, lexeme, Span::new(start, self.reader.position()))
    }

    /// Scan a numeric literal. `first` is the already-consumed character: a
    /// digit, or `.` with a digit after it (which gains an implicit leading
    /// zero in the lexeme).
    fn number(&mut self, first: char, start: usize) -> Result<Token, EvalError> {
        let mut lexeme = String::new();
        if first == '.' {
            lexeme.push('0');
            lexeme.push('.');
        } else {
            lexeme.push(first);
            while self.reader.peek().is_ascii_digit() {
                lexeme.push(self.reader.next());
            }
            if self.reader.peek() == '.' {
                lexeme.push(self.reader.next());
            }
        }

        // Fraction digits (either form of the literal ends up here).
        while self.reader.peek().is_ascii_digit() {
            lexeme.push(self.reader.next());
        }

        // A second decimal point directly after the number is malformed,
        // not the start of a new literal.
        if self.reader.peek() == '.' {
            let dot = self.reader.position();
            return Err(EvalError::InvalidNumber {
                msg: "Invalid number: second decimal point".to_string(),
                span: Span::new(dot, dot + 1),
            });
        }

        if matches!(self.reader.peek(), 'e' | 'E') {
            lexeme.push(self.reader.next());
            if matches!(self.reader.peek(), '+' | '-') {
                lexeme.push(self.reader.next());
            }
            if !self.reader.peek().is_ascii_digit() {
                let at = self.reader.position();
                return Err(EvalError::InvalidNumber {
                    msg: "Invalid number: exponent requires digits".to_string(),
                    span: Span::new(at, at + 1),
                });
            }
            while self.reader.peek().is_ascii_digit() {
                lexeme.push(self.reader.next());
            }
        }

        let span = Span::new(start, self.reader.position());
        // Validate here so malformed spellings fail at lex time.
        if lexeme.parse::<f64>().is_err() {
            return Err(EvalError::InvalidNumber {
                msg: format!("Invalid number '{}'", lexeme),
                span,
            });
        }
        Ok(Token::new(TokenKind::Number, lexeme, span))
    }

    /// Scan a string literal. The returned token's lexeme is the decoded
    /// value, escapes already applied.
    fn string(&mut self, start: usize) -> Result<Token, EvalError> {
        let mut value = String::new();
        loop {
            if self.reader.is_at_end() {
                return Err(EvalError::UnterminatedString {
                    span: Span::new(start, self.reader.position()),
                });
            }
            let c = self.reader.next();
            if is_line_terminator(c) {
                let at = self.reader.position() - 1;
                return Err(EvalError::LineTerminator {
                    span: Span::new(at, at + 1),
                });
            }
            match c {
                '"' => break,
                '\\' => {
                    let esc_start = self.reader.position() - 1;
                    if self.reader.is_at_end() {
                        return Err(EvalError::UnterminatedString {
                            span: Span::new(start, self.reader.position()),
                        });
                    }
                    let e = self.reader.next();
                    match e {
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        d if d.is_ascii_digit() => {
                            value.push(self.decimal_escape(d, esc_start)?);
                        }
                        other => {
                            return Err(EvalError::InvalidEscape {
                                ch: other,
                                span: Span::new(esc_start, self.reader.position()),
                            });
                        }
                    }
                }
                c => value.push(c),
            }
        }
        Ok(Token::new(
            TokenKind::String,
            value,
            Span::new(start, self.reader.position()),
        ))
    }

    /// Decode a three-digit decimal escape `\DDD`; `first` is the digit
    /// already consumed.
    fn decimal_escape(&mut self, first: char, esc_start: usize) -> Result<char, EvalError> {
        let mut code = first as u32 - '0' as u32;
        for _ in 0..2 {
            let d = self.reader.peek();
            if !d.is_ascii_digit() {
                return Err(EvalError::InvalidEscape {
                    ch: first,
                    span: Span::new(esc_start, self.reader.position()),
                });
            }
            self.reader.next();
            code = code * 10 + (d as u32 - '0' as u32);
        }
        char::from_u32(code).ok_or(EvalError::InvalidEscape {
            ch: first,
            span: Span::new(esc_start, self.reader.position()),
        })
    }

    fn identifier(&mut self, first: char, start: usize) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first);
        loop {
            let c = self.reader.peek();
            if c.is_alphanumeric() || c == '_' {
                lexeme.push(self.reader.next());
            } else {
                break;
            }
        }
        let kind = match lexeme.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Identifier,
        };
        Token::new(kind, lexeme, Span::new(start, self.reader.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(text: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(text).unwrap();
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    fn lex_err(text: &str) -> EvalError {
        let mut lexer = match Lexer::new(text) {
            Ok(lexer) => lexer,
            Err(err) => return err,
        };
        loop {
            match lexer.next_token() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected a lexical error for {:?}", text),
                Err(err) => return err,
            }
        }
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex_all(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_char_punctuators() {
        assert_eq!(
            kinds("( ) , + - * / %"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
            ]
        );
    }

    #[test]
    fn relational_punctuators_need_lookahead() {
        assert_eq!(
            kinds("== != <= >= < >"),
            vec![
                TokenKind::Equality,
                TokenKind::Inequality,
                TokenKind::LessOrEqual,
                TokenKind::GreaterOrEqual,
                TokenKind::LessThan,
                TokenKind::GreaterThan,
            ]
        );
    }

    #[test]
    fn bare_equals_is_a_lexical_error() {
        let err = lex_err("1 = 2");
        assert_eq!(err.to_string(), "Unexpected character '='");
        assert_eq!(err.column(), Some(2));
    }

    #[test]
    fn bare_bang_is_a_lexical_error() {
        let err = lex_err("!1");
        assert_eq!(err.to_string(), "Unexpected character '!'");
        assert_eq!(err.column(), Some(0));
    }

    #[test]
    fn integer_and_fraction_literals() {
        let tokens = lex_all("12 3.25");
        assert_eq!(tokens[0].lexeme, "12");
        assert_eq!(tokens[1].lexeme, "3.25");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn leading_dot_gets_implicit_zero() {
        let tokens = lex_all(".5");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "0.5");
    }

    #[test]
    fn trailing_dot_is_allowed() {
        let tokens = lex_all("7.");
        assert_eq!(tokens[0].lexeme, "7.");
        assert!(tokens[0].lexeme.parse::<f64>().is_ok());
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(lex_all("1e3")[0].lexeme, "1e3");
        assert_eq!(lex_all("2.5E-10")[0].lexeme, "2.5E-10");
        assert_eq!(lex_all(".5e+2")[0].lexeme, "0.5e+2");
    }

    #[test]
    fn exponent_without_digits_is_an_error() {
        let err = lex_err("2e");
        assert_eq!(err.to_string(), "Invalid number: exponent requires digits");
        let err = lex_err("2e+");
        assert_eq!(err.to_string(), "Invalid number: exponent requires digits");
    }

    #[test]
    fn second_decimal_point_is_an_error() {
        let err = lex_err("1.2.3");
        assert_eq!(err.to_string(), "Invalid number: second decimal point");
        assert_eq!(err.column(), Some(3));
        let err = lex_err("1..2");
        assert_eq!(err.to_string(), "Invalid number: second decimal point");
    }

    #[test]
    fn lone_dot_is_unexpected() {
        let err = lex_err(". + 1");
        assert_eq!(err.to_string(), "Unexpected character '.'");
    }

    #[test]
    fn simple_string_literal() {
        let tokens = lex_all("\"hello\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "hello");
    }

    #[test]
    fn string_escapes_decode() {
        let tokens = lex_all(r#""a\"bc""#);
        assert_eq!(tokens[0].lexeme, "a\"bc");
        let tokens = lex_all(r#""x\\y\n\t\r""#);
        assert_eq!(tokens[0].lexeme, "x\\y\n\t\r");
    }

    #[test]
    fn decimal_escapes_decode() {
        let tokens = lex_all(r#""\048\048\055""#);
        assert_eq!(tokens[0].lexeme, "007");
        let tokens = lex_all(r#""\065bc""#);
        assert_eq!(tokens[0].lexeme, "Abc");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = lex_err("\"abc");
        assert_eq!(err.to_string(), "Unterminated string");
        assert_eq!(err.column(), Some(0));
    }

    #[test]
    fn bad_escape_is_an_error() {
        let err = lex_err(r#""\q""#);
        assert_eq!(err.to_string(), "Invalid escape sequence '\\q'");
    }

    #[test]
    fn short_decimal_escape_is_an_error() {
        let err = lex_err(r#""\04""#);
        assert!(matches!(err, EvalError::InvalidEscape { .. }));
    }

    #[test]
    fn identifiers_and_boolean_literals() {
        let tokens = lex_all("foo _bar x1 true false True");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "_bar");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].kind, TokenKind::True);
        assert_eq!(tokens[4].kind, TokenKind::False);
        // Ordinal match only: capitalized spellings are plain identifiers.
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
    }

    #[test]
    fn line_terminator_anywhere_is_an_error() {
        let err = lex_err("1 +\n2");
        assert_eq!(err.to_string(), "Line terminator is not allowed");
        assert_eq!(err.column(), Some(3));
        let err = lex_err("\"a\nb\"");
        assert_eq!(err.to_string(), "Line terminator is not allowed");
        let err = lex_err("1\u{2028}2");
        assert_eq!(err.to_string(), "Line terminator is not allowed");
    }

    #[test]
    fn unrecognized_character_reports_its_column() {
        let err = lex_err("1 + @");
        assert_eq!(err.to_string(), "Unexpected character '@'");
        assert_eq!(err.column(), Some(4));
    }

    #[test]
    fn peek_is_stable_until_next() {
        let mut lexer = Lexer::new("1 + 2").unwrap();
        assert_eq!(lexer.peek_token().unwrap().lexeme, "1");
        assert_eq!(lexer.peek_token().unwrap().lexeme, "1");
        let first = lexer.next_token().unwrap().unwrap();
        assert_eq!(first.lexeme, "1");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::Plus);
    }

    #[test]
    fn buffer_drains_to_none_at_end() {
        let mut lexer = Lexer::new("42").unwrap();
        assert!(lexer.next_token().unwrap().is_some());
        assert!(lexer.next_token().unwrap().is_none());
        assert!(lexer.next_token().unwrap().is_none());
        assert!(lexer.peek_token().is_none());
    }

    #[test]
    fn empty_and_whitespace_only_input() {
        assert!(lex_all("").is_empty());
        assert!(lex_all("   \t ").is_empty());
    }

    #[test]
    fn malformed_first_token_fails_construction() {
        assert!(Lexer::new("@").is_err());
    }

    #[test]
    fn token_spans_cover_their_text() {
        let tokens = lex_all("10 + foo");
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 4));
        assert_eq!(tokens[2].span, Span::new(5, 8));
    }

    #[test]
    fn whitespace_includes_unicode_spaces() {
        let tokens = lex_all("1\u{00A0}+\u{2003}2");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number]
        );
    }
}
