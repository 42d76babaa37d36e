use crate::expr::{Expr, Constant, BinaryOp};
use crate::expr::function::UnaryFunc;
use crate::expr::simplifier::simplify;
use crate::expr::var::Var;

use thiserror::Error;

#[derive(Debug)]
pub struct DerivativeEngine {
  target_variable: Var,
  original_expr: Expr,
}

#[derive(Debug, Clone, Error)]
#[error("Could not differentiate {original_expr}: {error}")]
pub struct DifferentiationFailure {
  pub original_expr: Expr,
  pub error: DifferentiationError,
  _priv: (), // Prevent construction outside of this module
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DifferentiationError {
  #[error("Constant {0} is not a finite real number")]
  NonFiniteConstant(String),
}

impl DerivativeEngine {
  pub fn new(expr: Expr, var: Var) -> DerivativeEngine {
    DerivativeEngine { target_variable: var, original_expr: expr }
  }

  /// The derivative of `expr` with respect to the target variable.
  /// The result is not simplified.
  pub fn differentiate(&self, expr: &Expr) -> Result<Expr, DifferentiationFailure> {
    match expr {
      Expr::Constant(Constant::Number(n)) => {
        if n.to_f64().is_some_and(f64::is_finite) {
          Ok(Expr::zero())
        } else {
          Err(self.error(DifferentiationError::NonFiniteConstant(n.to_string())))
        }
      }
      Expr::Constant(Constant::Pi | Constant::E) => {
        Ok(Expr::zero())
      }
      Expr::Variable(var) => {
        if var == &self.target_variable {
          Ok(Expr::one())
        } else {
          Ok(Expr::zero())
        }
      }
      Expr::BinaryOp(op, u, v) => {
        self.differentiate_binary(*op, u, v)
      }
      Expr::UnaryFunc(UnaryFunc::Neg, u) => {
        Ok(Expr::neg(self.differentiate(u)?))
      }
      Expr::UnaryFunc(func, u) => {
        // Chain rule
        let du = self.differentiate(u)?;
        Ok(Expr::mul(func.derivative_at((**u).clone()), du))
      }
    }
  }

  fn differentiate_binary(&self, op: BinaryOp, u: &Expr, v: &Expr) -> Result<Expr, DifferentiationFailure> {
    let u_const = !u.contains_var(&self.target_variable);
    let v_const = !v.contains_var(&self.target_variable);
    match op {
      BinaryOp::Add => {
        Ok(Expr::add(self.differentiate(u)?, self.differentiate(v)?))
      }
      BinaryOp::Sub => {
        Ok(Expr::sub(self.differentiate(u)?, self.differentiate(v)?))
      }
      BinaryOp::Mul => {
        if u_const {
          Ok(Expr::mul(u.clone(), self.differentiate(v)?))
        } else if v_const {
          Ok(Expr::mul(self.differentiate(u)?, v.clone()))
        } else {
          let du = self.differentiate(u)?;
          let dv = self.differentiate(v)?;
          Ok(Expr::add(Expr::mul(du, v.clone()), Expr::mul(u.clone(), dv)))
        }
      }
      BinaryOp::Div => {
        let du = self.differentiate(u)?;
        if v_const {
          return Ok(Expr::div(du, v.clone()));
        }
        let dv = self.differentiate(v)?;
        let numer = Expr::sub(Expr::mul(du, v.clone()), Expr::mul(u.clone(), dv));
        Ok(Expr::div(numer, Expr::pow(v.clone(), Expr::from(2))))
      }
      BinaryOp::Pow => {
        if v_const {
          // Power rule
          let du = self.differentiate(u)?;
          let lowered = Expr::pow(u.clone(), Expr::sub(v.clone(), Expr::one()));
          Ok(Expr::mul(Expr::mul(v.clone(), lowered), du))
        } else if u_const {
          let dv = self.differentiate(v)?;
          let ln_u = Expr::call(UnaryFunc::Ln, u.clone());
          Ok(Expr::mul(Expr::mul(Expr::pow(u.clone(), v.clone()), ln_u), dv))
        } else {
          // Logarithmic differentiation: (u^v)' = u^v * (v' ln u + v u' / u)
          let du = self.differentiate(u)?;
          let dv = self.differentiate(v)?;
          let ln_u = Expr::call(UnaryFunc::Ln, u.clone());
          let inner = Expr::add(
            Expr::mul(dv, ln_u),
            Expr::div(Expr::mul(v.clone(), du), u.clone()),
          );
          Ok(Expr::mul(Expr::pow(u.clone(), v.clone()), inner))
        }
      }
    }
  }

  pub fn error(&self, reason: DifferentiationError) -> DifferentiationFailure {
    DifferentiationFailure {
      original_expr: self.original_expr.clone(),
      error: reason,
      _priv: (),
    }
  }
}

/// Differentiates `expr` with respect to `var` and simplifies the
/// result for display.
pub fn differentiate(expr: Expr, var: Var) -> Result<Expr, DifferentiationFailure> {
  let engine = DerivativeEngine::new(expr.clone(), var);
  let derivative = engine.differentiate(&expr)?;
  Ok(simplify(derivative))
}
