//! Floating-point evaluation of expressions, for plotting.

use super::{Expr, Constant, BinaryOp};
use super::var::Var;

use thiserror::Error;

use std::f64::consts;

/// An expression, being treated as a real function of one variable
/// and evaluated with IEEE-754 semantics. Division by zero, logarithms
/// of negative numbers, and similar produce NaN or infinities rather
/// than errors.
#[derive(Debug, Clone)]
pub struct CompiledFunction {
  expr: Expr,
  var: Var,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
  #[error("Unbound variable '{0}' (only '{1}' may appear in the function)")]
  UnboundVariable(String, String),
}

impl CompiledFunction {
  /// Prepares `expr` for evaluation as a function of `var`. Fails if
  /// any other variable is free in `expr`.
  pub fn vectorize(expr: Expr, var: Var) -> Result<CompiledFunction, EvaluationError> {
    if let Some(other) = expr.free_vars().into_iter().find(|v| v != &var) {
      return Err(EvaluationError::UnboundVariable(other.into(), var.into()));
    }
    Ok(CompiledFunction { expr, var })
  }

  pub fn expr(&self) -> &Expr {
    &self.expr
  }

  pub fn var(&self) -> &Var {
    &self.var
  }

  pub fn eval(&self, x: f64) -> f64 {
    eval_at(&self.expr, &self.var, x)
  }

  /// Evaluates the function at every point, elementwise.
  pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|x| self.eval(*x)).collect()
  }
}

/// Evaluates `expr` with `var` bound to `x`. Any other variable
/// evaluates to NaN.
pub fn eval_at(expr: &Expr, var: &Var, x: f64) -> f64 {
  match expr {
    Expr::Constant(Constant::Number(n)) => n.to_f64_or_nan(),
    Expr::Constant(Constant::Pi) => consts::PI,
    Expr::Constant(Constant::E) => consts::E,
    Expr::Variable(v) => if v == var { x } else { f64::NAN },
    Expr::BinaryOp(op, left, right) => {
      let a = eval_at(left, var, x);
      let b = eval_at(right, var, x);
      match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
      }
    }
    Expr::UnaryFunc(func, arg) => func.eval_f64(eval_at(arg, var, x)),
  }
}

/// Evaluates an expression with no free variables.
pub fn eval_constant(expr: &Expr) -> f64 {
  eval_at(expr, &Var::x(), f64::NAN)
}
