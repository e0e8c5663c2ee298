//! Tree-walking evaluator.
//!
//! Walks an [`Expr`] against an [`Environment`] and produces one [`Value`].
//! Arithmetic is plain IEEE 754: division by zero gives an infinity, modulo
//! by zero gives NaN, nothing here fails on a numeric edge case. The errors
//! this module raises are name lookups and type coercions.
//!
//! Coercion rules match the operator table:
//! - `+` concatenates when either operand is a string, using display forms.
//! - Every other operator coerces both operands to numbers. Booleans become
//!   1 or 0; strings are parsed, and a string that does not parse is a type
//!   error.
//! - A unary sign never applies to a string, parseable or not.

use crate::ast::{BinaryExpr, BinaryOp, CallExpr, Expr, Identifier, Literal, UnaryExpr, UnaryOp};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;

/// Evaluates expression trees against a borrowed environment.
pub struct Evaluator<'a> {
    env: &'a Environment,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Evaluate `expr` to a single value.
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(literal, _) => Ok(match literal {
                Literal::Number(n) => Value::Number(*n),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::String(s) => Value::String(s.clone()),
            }),
            Expr::Variable(ident) => self.eval_variable(ident),
            Expr::Unary(unary) => self.eval_unary(unary),
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Call(call) => self.eval_call(call),
        }
    }

    /// Look up a variable. A name bound to a function does not resolve as a
    /// variable.
    fn eval_variable(&self, ident: &Identifier) -> Result<Value, EvalError> {
        match self.env.variable(&ident.name) {
            Some(value) => Ok(Value::Number(value)),
            None => Err(EvalError::UndefinedVariable {
                name: ident.name.clone(),
                span: ident.span,
            }),
        }
    }

    fn eval_unary(&self, unary: &UnaryExpr) -> Result<Value, EvalError> {
        let value = self.eval(&unary.operand)?;
        if value.is_string() {
            return Err(EvalError::StringOperand {
                span: unary.operand.span(),
            });
        }
        let n = value.to_number(unary.operand.span())?;
        Ok(Value::Number(match unary.op {
            UnaryOp::Plus => n,
            UnaryOp::Minus => -n,
        }))
    }

    fn eval_binary(&self, binary: &BinaryExpr) -> Result<Value, EvalError> {
        let lhs = self.eval(&binary.lhs)?;
        let rhs = self.eval(&binary.rhs)?;

        // Addition turns into concatenation as soon as a string shows up.
        if binary.op == BinaryOp::Add && (lhs.is_string() || rhs.is_string()) {
            return Ok(Value::String(format!("{}{}", lhs, rhs)));
        }

        let l = lhs.to_number(binary.lhs.span())?;
        let r = rhs.to_number(binary.rhs.span())?;
        Ok(match binary.op {
            BinaryOp::Add => Value::Number(l + r),
            BinaryOp::Sub => Value::Number(l - r),
            BinaryOp::Mul => Value::Number(l * r),
            BinaryOp::Div => Value::Number(l / r),
            BinaryOp::Mod => Value::Number(l % r),
            BinaryOp::Eq => Value::Bool(l == r),
            BinaryOp::NotEq => Value::Bool(l != r),
            BinaryOp::Lt => Value::Bool(l < r),
            BinaryOp::Gt => Value::Bool(l > r),
            BinaryOp::LtEq => Value::Bool(l <= r),
            BinaryOp::GtEq => Value::Bool(l >= r),
        })
    }

    /// Evaluate arguments left to right, then invoke. A name bound to a
    /// variable does not resolve as a function.
    fn eval_call(&self, call: &CallExpr) -> Result<Value, EvalError> {
        let callable = match self.env.function(&call.name.name) {
            Some(callable) => callable,
            None => {
                return Err(EvalError::UndefinedFunction {
                    name: call.name.name.clone(),
                    span: call.name.span,
                })
            }
        };
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval(arg)?);
        }
        callable.call(&args, call.span)
    }
}
