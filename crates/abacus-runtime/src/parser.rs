//! Recursive-descent parser.
//!
//! Pulls tokens straight off the [`Lexer`] and builds an [`Expr`] tree
//! through a fixed precedence cascade: relational, then additive, then
//! multiplicative, then unary sign, then primary. Each binary level loops on
//! its own operators, so every level is left-associative.
//!
//! The parser keeps a running bracket balance. When input runs out with the
//! balance off, the unbalanced-bracket error wins over the generic
//! end-of-input one, so `3 + (1 -` reports its missing bracket rather than a
//! missing operand.

use crate::ast::{BinaryExpr, BinaryOp, CallExpr, Expr, Identifier, Literal, UnaryExpr, UnaryOp};
use crate::error::EvalError;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Hard ceiling on grouping and call nesting. Deeper input is rejected
/// rather than allowed to overflow the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Streaming parser over a single expression.
pub struct Parser {
    lexer: Lexer,
    bracket_balance: i32,
    depth: usize,
}

impl Parser {
    /// Build a parser over `text`. Fails if the first token is malformed.
    pub fn new(text: &str) -> Result<Self, EvalError> {
        Ok(Self {
            lexer: Lexer::new(text)?,
            bracket_balance: 0,
            depth: 0,
        })
    }

    /// Parse the whole input as one expression. Consumes the token stream;
    /// trailing tokens after the expression are an error.
    pub fn parse(&mut self) -> Result<Expr, EvalError> {
        if self.lexer.peek_token().is_none() {
            return Err(EvalError::EmptyExpression);
        }
        let expr = self.expression()?;
        if let Some(token) = self.lexer.peek_token() {
            return Err(EvalError::ExpectedExpression { span: token.span });
        }
        Ok(expr)
    }

    /// Parse an expression (lowest precedence level).
    fn expression(&mut self) -> Result<Expr, EvalError> {
        self.relational()
    }

    /// Parse `additive ((== | != | < | > | <= | >=) additive)*`.
    fn relational(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.additive()?;
        while let Some(op) = self.peek_op(Self::relational_op) {
            self.advance()?;
            let rhs = self.additive()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parse `multiplicative ((+ | -) multiplicative)*`.
    fn additive(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.multiplicative()?;
        while let Some(op) = self.peek_op(Self::additive_op) {
            self.advance()?;
            let rhs = self.multiplicative()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parse `unary ((* | / | %) unary)*`.
    fn multiplicative(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek_op(Self::multiplicative_op) {
            self.advance()?;
            let rhs = self.unary()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Parse an optional sign followed by a primary. The operand is parsed
    /// as a primary, not another unary, so signs do not chain: `--1` is
    /// rejected.
    fn unary(&mut self) -> Result<Expr, EvalError> {
        let pending = self.lexer.peek_token().map(|t| (t.kind, t.span));
        if let Some((kind, op_span)) = pending {
            let op = match kind {
                TokenKind::Plus => Some(UnaryOp::Plus),
                TokenKind::Minus => Some(UnaryOp::Minus),
                _ => None,
            };
            if let Some(op) = op {
                self.advance()?;
                let operand = self.primary()?;
                let span = op_span.merge(operand.span());
                return Ok(Expr::Unary(UnaryExpr {
                    op,
                    operand: Box::new(operand),
                    span,
                }));
            }
        }
        self.primary()
    }

    /// Parse a literal, variable, call, or parenthesized expression.
    fn primary(&mut self) -> Result<Expr, EvalError> {
        let token = match self.advance()? {
            Some(token) => token,
            None => return Err(self.eof_error("expression")),
        };
        match token.kind {
            TokenKind::Number => {
                let value = token.lexeme.parse::<f64>().map_err(|_| EvalError::InvalidNumber {
                    msg: format!("Invalid number '{}'", token.lexeme),
                    span: token.span,
                })?;
                Ok(Expr::Literal(Literal::Number(value), token.span))
            }
            TokenKind::String => Ok(Expr::Literal(Literal::String(token.lexeme), token.span)),
            TokenKind::True => Ok(Expr::Literal(Literal::Bool(true), token.span)),
            TokenKind::False => Ok(Expr::Literal(Literal::Bool(false), token.span)),
            TokenKind::Identifier => self.identifier_or_call(token),
            TokenKind::LeftParen => self.group(token),
            _ => Err(EvalError::ExpectedExpression { span: token.span }),
        }
    }

    /// Parse the parenthesized expression whose `(` was just consumed. The
    /// group contributes no AST node of its own.
    fn group(&mut self, open: Token) -> Result<Expr, EvalError> {
        self.enter_nested(open.span)?;
        let expr = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        self.depth -= 1;
        Ok(expr)
    }

    /// Parse a variable reference, or a call if `(` follows the name.
    fn identifier_or_call(&mut self, token: Token) -> Result<Expr, EvalError> {
        let name = Identifier::new(token.lexeme, token.span);
        if !self.check(TokenKind::LeftParen) {
            return Ok(Expr::Variable(name));
        }

        let open = self.expect(TokenKind::LeftParen)?;
        self.enter_nested(open.span)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }
        let close = self.expect(TokenKind::RightParen)?;
        self.depth -= 1;

        let span = name.span.merge(close.span);
        Ok(Expr::Call(CallExpr { name, args, span }))
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span().merge(rhs.span());
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        })
    }

    fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Equality => Some(BinaryOp::Eq),
            TokenKind::Inequality => Some(BinaryOp::NotEq),
            TokenKind::LessThan => Some(BinaryOp::Lt),
            TokenKind::GreaterThan => Some(BinaryOp::Gt),
            TokenKind::LessOrEqual => Some(BinaryOp::LtEq),
            TokenKind::GreaterOrEqual => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    /// Map the buffered token's kind through `table` without consuming it.
    fn peek_op(&self, table: fn(TokenKind) -> Option<BinaryOp>) -> Option<BinaryOp> {
        self.lexer.peek_token().and_then(|t| table(t.kind))
    }

    /// Consume the next token, tracking the bracket balance.
    fn advance(&mut self) -> Result<Option<Token>, EvalError> {
        let token = self.lexer.next_token()?;
        if let Some(token) = &token {
            match token.kind {
                TokenKind::LeftParen => self.bracket_balance += 1,
                TokenKind::RightParen => self.bracket_balance -= 1,
                _ => {}
            }
        }
        Ok(token)
    }

    /// Whether the buffered token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        matches!(self.lexer.peek_token(), Some(t) if t.kind == kind)
    }

    /// Consume the buffered token if it has the given kind.
    fn match_token(&mut self, kind: TokenKind) -> Result<bool, EvalError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume the next token, which must have the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, EvalError> {
        match self.advance()? {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(EvalError::UnexpectedToken {
                expected: format!("'{}'", kind.as_str()),
                found: token.lexeme,
                span: token.span,
            }),
            None => Err(self.eof_error(&format!("'{}'", kind.as_str()))),
        }
    }

    /// The error for running out of input: the bracket diagnostic when the
    /// balance is off, otherwise a plain end-of-input error. Positioned one
    /// past the last character.
    fn eof_error(&self, expected: &str) -> EvalError {
        let at = self.lexer.position();
        if self.bracket_balance != 0 {
            EvalError::UnbalancedBrackets {
                span: Span::new(at, at),
            }
        } else {
            EvalError::UnexpectedEnd {
                expected: expected.to_string(),
                span: Span::new(at, at),
            }
        }
    }

    fn enter_nested(&mut self, span: Span) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(EvalError::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
                span,
            });
        }
        Ok(())
    }
}
