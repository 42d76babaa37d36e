//! Normalization of products and quotients.
//!
//! A product is split into a numerical coefficient and a list of
//! factors with numerical exponents. Equal factors are merged, so
//! `x * x / x**3` becomes `x**(-1)`, written back as `1/x`.

use super::Simplifier;
use crate::expr::{Expr, Constant, BinaryOp};
use crate::expr::function::UnaryFunc;
use crate::expr::number::Number;
use crate::util::stricteq::StrictEq;

use num::{Zero, One};

/// `FactorCollector` is a [`Simplifier`] that normalizes every product
/// and quotient through [`Product`].
#[derive(Debug, Clone, Default)]
pub struct FactorCollector;

#[derive(Debug, Clone)]
pub struct Product {
  coeff: Number,
  factors: Vec<(Expr, Number)>,
}

impl Product {
  pub fn from_expr(expr: Expr) -> Product {
    let mut product = Product { coeff: Number::one(), factors: Vec::new() };
    product.absorb(expr, false);
    product
  }

  pub fn coeff(&self) -> &Number {
    &self.coeff
  }

  pub fn scale(&mut self, by: &Number) {
    self.coeff = &self.coeff * by;
  }

  /// The product with its coefficient replaced by one, or `None` if
  /// there are no factors besides the coefficient.
  pub fn without_coeff(&self) -> Option<Expr> {
    if self.factors.iter().all(|(_, e)| e.is_zero()) {
      return None;
    }
    let mut copy = self.clone();
    copy.coeff = Number::one();
    Some(copy.into_expr())
  }

  fn absorb(&mut self, expr: Expr, inverted: bool) {
    match expr {
      Expr::BinaryOp(BinaryOp::Mul, a, b) => {
        self.absorb(*a, inverted);
        self.absorb(*b, inverted);
      }
      Expr::BinaryOp(BinaryOp::Div, a, b) => {
        self.absorb(*a, inverted);
        self.absorb(*b, !inverted);
      }
      Expr::UnaryFunc(UnaryFunc::Neg, a) => {
        self.coeff = - &self.coeff;
        self.absorb(*a, inverted);
      }
      Expr::Constant(Constant::Number(n)) => {
        if !inverted {
          self.coeff = &self.coeff * &n;
        } else {
          match self.coeff.checked_div(&n) {
            Some(c) => self.coeff = c,
            None => self.push_factor(Expr::from(n), Number::from(-1)),
          }
        }
      }
      Expr::BinaryOp(BinaryOp::Pow, base, exponent) => {
        match exponent.as_number() {
          Some(e) => {
            let e = if inverted { - e } else { e.clone() };
            self.push_factor(*base, e);
          }
          None => {
            self.push_factor(Expr::BinaryOp(BinaryOp::Pow, base, exponent), signed_one(inverted));
          }
        }
      }
      other => {
        self.push_factor(other, signed_one(inverted));
      }
    }
  }

  fn push_factor(&mut self, base: Expr, exponent: Number) {
    match self.factors.iter_mut().find(|(b, _)| b.strict_eq(&base)) {
      Some((_, e)) => {
        *e = &*e + &exponent;
      }
      None => {
        self.factors.push((base, exponent));
      }
    }
  }

  pub fn into_expr(self) -> Expr {
    let Product { coeff, factors } = self;
    if coeff.is_zero() {
      return Expr::from(coeff);
    }
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for (base, exponent) in factors {
      if exponent.is_zero() {
        continue;
      } else if exponent.is_negative() {
        denom.push(power(base, - exponent));
      } else {
        numer.push(power(base, exponent));
      }
    }

    let negative = coeff.is_negative();
    let coeff = coeff.abs();
    let (coeff_numer, coeff_denom) = match coeff.to_rational() {
      Some(r) => (Number::from(r.numer().clone()), Number::from(r.denom().clone())),
      None => (coeff, Number::one()),
    };

    let numer = with_coeff(coeff_numer, numer).unwrap_or_else(Expr::one);
    let result = match with_coeff(coeff_denom, denom) {
      None => numer,
      Some(denom) => Expr::div(numer, denom),
    };
    if !negative {
      return result;
    }
    match result {
      Expr::BinaryOp(BinaryOp::Mul, c, rest) if c.as_number().is_some() => {
        let c = c.as_number().map(|n| - n).unwrap_or_else(Number::one);
        Expr::mul(Expr::from(c), *rest)
      }
      Expr::Constant(Constant::Number(n)) => Expr::from(- n),
      result => Expr::neg(result),
    }
  }
}

fn signed_one(inverted: bool) -> Number {
  if inverted { Number::from(-1) } else { Number::one() }
}

fn power(base: Expr, exponent: Number) -> Expr {
  if exponent.is_one() && exponent.is_exact() {
    base
  } else {
    Expr::pow(base, Expr::from(exponent))
  }
}

/// Multiplies the factors together, with `coeff` in front unless it
/// is an exact one. `None` means the empty product.
fn with_coeff(coeff: Number, factors: Vec<Expr>) -> Option<Expr> {
  let product = factors.into_iter().reduce(Expr::mul);
  let trivial = coeff.is_one() && coeff.is_exact();
  match (trivial, product) {
    (true, product) => product,
    (false, None) => Some(Expr::from(coeff)),
    (false, Some(product)) => Some(Expr::mul(Expr::from(coeff), product)),
  }
}

impl Simplifier for FactorCollector {
  fn simplify_expr_part(&self, expr: Expr) -> Expr {
    match expr {
      Expr::BinaryOp(BinaryOp::Mul | BinaryOp::Div, _, _) => {
        Product::from_expr(expr).into_expr()
      }
      expr => expr,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  fn x() -> Expr {
    Expr::x()
  }

  fn collect(expr: Expr) -> Expr {
    FactorCollector.simplify_expr(expr)
  }

  #[test]
  fn test_coefficients_merge() {
    let expr = Expr::mul(Expr::from(4), Expr::mul(Expr::from(3), Expr::pow(x(), Expr::from(2))));
    assert_strict_eq!(collect(expr), Expr::mul(Expr::from(12), Expr::pow(x(), Expr::from(2))));
  }

  #[test]
  fn test_unit_coefficient_dropped() {
    let expr = Expr::mul(Expr::call(UnaryFunc::Cos, x()), Expr::one());
    assert_strict_eq!(collect(expr), Expr::call(UnaryFunc::Cos, x()));
  }

  #[test]
  fn test_powers_merge() {
    let expr = Expr::mul(x(), x());
    assert_strict_eq!(collect(expr), Expr::pow(x(), Expr::from(2)));
    let expr = Expr::div(Expr::mul(x(), x()), Expr::pow(x(), Expr::from(3)));
    assert_strict_eq!(collect(expr), Expr::div(Expr::one(), x()));
  }

  #[test]
  fn test_rational_coefficient_splits() {
    let expr = Expr::div(Expr::mul(Expr::from(3), x()), Expr::from(4));
    assert_strict_eq!(collect(expr), Expr::div(Expr::mul(Expr::from(3), x()), Expr::from(4)));
    let expr = Expr::mul(Expr::from(Number::ratio(1, 2)), x());
    assert_strict_eq!(collect(expr), Expr::div(x(), Expr::from(2)));
  }

  #[test]
  fn test_negative_coefficient() {
    let expr = Expr::neg(Expr::mul(Expr::from(4), x()));
    assert_strict_eq!(Product::from_expr(expr).into_expr(), Expr::mul(Expr::from(-4), x()));
    let expr = Expr::mul(Expr::from(-1), x());
    assert_strict_eq!(collect(expr), Expr::neg(x()));
    let expr = Expr::div(Expr::neg(x()), Expr::from(2));
    assert_strict_eq!(collect(expr), Expr::neg(Expr::div(x(), Expr::from(2))));
  }

  #[test]
  fn test_zero_coefficient() {
    let expr = Expr::mul(Expr::zero(), Expr::call(UnaryFunc::Sin, x()));
    assert_strict_eq!(collect(expr), Expr::zero());
  }

  #[test]
  fn test_without_coeff() {
    let product = Product::from_expr(Expr::mul(Expr::from(-4), x()));
    assert_strict_eq!(product.coeff().clone(), Number::from(-4));
    assert_strict_eq!(product.without_coeff().unwrap(), x());
    assert!(Product::from_expr(Expr::from(5)).without_coeff().is_none());
  }
}
