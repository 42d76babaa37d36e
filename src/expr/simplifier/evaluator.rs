use super::Simplifier;
use crate::expr::{Expr, BinaryOp};
use crate::expr::number::Number;

/// `FunctionEvaluator` is a [`Simplifier`] that evaluates operators
/// and known functions when all of the arguments have known numerical
/// values. Exact inputs are only folded when the result is exact, so
/// `2**(1/2)` stays symbolic while `4**(1/2)` becomes `2`.
#[derive(Debug, Clone)]
pub struct FunctionEvaluator;

impl Simplifier for FunctionEvaluator {
  fn simplify_expr_part(&self, expr: Expr) -> Expr {
    match expr {
      Expr::BinaryOp(op, left, right) => {
        let folded = match (left.as_number(), right.as_number()) {
          (Some(a), Some(b)) => eval_binary(op, a, b),
          _ => None,
        };
        match folded {
          Some(result) => Expr::from(result),
          None => simplify_power(Expr::BinaryOp(op, left, right)),
        }
      }
      Expr::UnaryFunc(func, arg) => {
        match func.special_value(&arg) {
          Some(value) => value,
          None => Expr::UnaryFunc(func, arg),
        }
      }
      expr => {
        // Pass through
        expr
      }
    }
  }
}

fn eval_binary(op: BinaryOp, a: &Number, b: &Number) -> Option<Number> {
  match op {
    BinaryOp::Add => Some(a + b),
    BinaryOp::Sub => Some(a - b),
    BinaryOp::Mul => Some(a * b),
    BinaryOp::Div => a.checked_div(b),
    BinaryOp::Pow => {
      let result = a.checked_pow(b)?;
      (result.is_exact() || !a.is_exact() || !b.is_exact()).then_some(result)
    }
  }
}

/// Identities on powers which do not need both sides to be numbers.
fn simplify_power(expr: Expr) -> Expr {
  let Expr::BinaryOp(BinaryOp::Pow, base, exponent) = expr else {
    return expr;
  };
  if exponent.is_zero() || base.is_one() {
    return Expr::one();
  }
  if exponent.is_one() {
    return *base;
  }
  // (a^m)^n = a^(m*n) is only safe in the reals for integer m and n.
  if let Expr::BinaryOp(BinaryOp::Pow, inner_base, inner_exponent) = &*base {
    if let (Some(m), Some(n)) = (inner_exponent.as_number(), exponent.as_number()) {
      if m.is_integer() && n.is_integer() {
        return Expr::pow((**inner_base).clone(), Expr::from(m * n));
      }
    }
  }
  Expr::BinaryOp(BinaryOp::Pow, base, exponent)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::UnaryFunc;
  use crate::assert_strict_eq;

  fn eval(expr: Expr) -> Expr {
    FunctionEvaluator.simplify_expr(expr)
  }

  #[test]
  fn test_arithmetic() {
    assert_strict_eq!(eval(Expr::add(Expr::from(1), Expr::from(2))), Expr::from(3));
    assert_strict_eq!(eval(Expr::div(Expr::from(1), Expr::from(2))), Expr::from(Number::ratio(1, 2)));
    assert_strict_eq!(
      eval(Expr::mul(Expr::from(Number::from(0.5)), Expr::from(2))),
      Expr::from(Number::from(1.0)),
    );
  }

  #[test]
  fn test_division_by_zero_is_kept() {
    let expr = Expr::div(Expr::from(1), Expr::from(0));
    assert_strict_eq!(eval(expr.clone()), expr);
  }

  #[test]
  fn test_powers() {
    assert_strict_eq!(eval(Expr::pow(Expr::from(4), Expr::from(Number::ratio(1, 2)))), Expr::from(2));
    let irrational = Expr::pow(Expr::from(2), Expr::from(Number::ratio(1, 2)));
    assert_strict_eq!(eval(irrational.clone()), irrational);
    assert_strict_eq!(eval(Expr::pow(Expr::x(), Expr::from(1))), Expr::x());
    assert_strict_eq!(eval(Expr::pow(Expr::x(), Expr::from(0))), Expr::one());
    assert_strict_eq!(
      eval(Expr::pow(Expr::pow(Expr::x(), Expr::from(2)), Expr::from(3))),
      Expr::pow(Expr::x(), Expr::from(6)),
    );
  }

  #[test]
  fn test_functions() {
    assert_strict_eq!(eval(Expr::call(UnaryFunc::Sin, Expr::from(0))), Expr::zero());
    assert_strict_eq!(eval(Expr::call(UnaryFunc::Neg, Expr::from(3))), Expr::from(-3));
    let sin_one = Expr::call(UnaryFunc::Sin, Expr::from(1));
    assert_strict_eq!(eval(sin_one.clone()), sin_one);
    // Folding happens bottom-up.
    assert_strict_eq!(
      eval(Expr::call(UnaryFunc::Cos, Expr::sub(Expr::from(2), Expr::from(2)))),
      Expr::one(),
    );
  }
}
