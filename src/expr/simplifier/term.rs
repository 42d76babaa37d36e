use super::Simplifier;
use super::factor::Product;
use crate::expr::{Expr, BinaryOp};
use crate::expr::function::UnaryFunc;
use crate::expr::number::Number;
use crate::util::stricteq::StrictEq;

use num::Zero;

/// `TermCollector` is a [`Simplifier`] that flattens sums, differences,
/// and negations into a list of terms and merges like terms. The
/// constant term, if any, is moved to the end.
#[derive(Debug, Clone, Default)]
pub struct TermCollector;

#[derive(Debug, Clone, Default)]
struct Sum {
  terms: Vec<(Number, Option<Expr>)>,
}

impl Sum {
  fn absorb(&mut self, expr: Expr, negated: bool) {
    match expr {
      Expr::BinaryOp(BinaryOp::Add, a, b) => {
        self.absorb(*a, negated);
        self.absorb(*b, negated);
      }
      Expr::BinaryOp(BinaryOp::Sub, a, b) => {
        self.absorb(*a, negated);
        self.absorb(*b, !negated);
      }
      Expr::UnaryFunc(UnaryFunc::Neg, a) => {
        self.absorb(*a, !negated);
      }
      expr => {
        let product = Product::from_expr(expr);
        let coeff = if negated { - product.coeff() } else { product.coeff().clone() };
        self.push_term(coeff, product.without_coeff());
      }
    }
  }

  fn push_term(&mut self, coeff: Number, rest: Option<Expr>) {
    let existing = self.terms.iter_mut().find(|(_, r)| {
      match (r, &rest) {
        (None, None) => true,
        (Some(a), Some(b)) => a.strict_eq(b),
        _ => false,
      }
    });
    match existing {
      Some((c, _)) => {
        *c = &*c + &coeff;
      }
      None => {
        self.terms.push((coeff, rest));
      }
    }
  }

  fn into_expr(self) -> Expr {
    let (constants, mut terms): (Vec<_>, Vec<_>) =
      self.terms.into_iter().partition(|(_, rest)| rest.is_none());
    terms.extend(constants);
    let mut terms = terms.into_iter().filter(|(c, _)| !c.is_zero());

    let Some((coeff, rest)) = terms.next() else {
      return Expr::zero();
    };
    let mut acc = term_expr(coeff, rest);
    for (coeff, rest) in terms {
      acc = if coeff.is_negative() {
        Expr::sub(acc, term_expr(- coeff, rest))
      } else {
        Expr::add(acc, term_expr(coeff, rest))
      };
    }
    acc
  }
}

fn term_expr(coeff: Number, rest: Option<Expr>) -> Expr {
  match rest {
    None => Expr::from(coeff),
    Some(rest) => {
      let mut product = Product::from_expr(rest);
      product.scale(&coeff);
      product.into_expr()
    }
  }
}

impl Simplifier for TermCollector {
  fn simplify_expr_part(&self, expr: Expr) -> Expr {
    match expr {
      Expr::BinaryOp(BinaryOp::Add | BinaryOp::Sub, _, _) | Expr::UnaryFunc(UnaryFunc::Neg, _) => {
        let mut sum = Sum::default();
        sum.absorb(expr, false);
        sum.into_expr()
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
    TermCollector.simplify_expr(expr)
  }

  #[test]
  fn test_like_terms_merge() {
    let expr = Expr::add(x(), Expr::mul(Expr::from(2), x()));
    assert_strict_eq!(collect(expr), Expr::mul(Expr::from(3), x()));
  }

  #[test]
  fn test_cancellation() {
    let sin_one = Expr::call(UnaryFunc::Sin, Expr::from(1));
    assert_strict_eq!(collect(Expr::sub(sin_one.clone(), sin_one)), Expr::zero());
  }

  #[test]
  fn test_constant_moves_last() {
    let expr = Expr::add(Expr::from(1), Expr::sub(x(), Expr::from(3)));
    assert_strict_eq!(collect(expr), Expr::sub(x(), Expr::from(2)));
  }

  #[test]
  fn test_negative_terms_become_subtraction() {
    let expr = Expr::add(
      Expr::mul(Expr::from(12), Expr::pow(x(), Expr::from(2))),
      Expr::add(Expr::mul(Expr::from(-4), x()), Expr::from(1)),
    );
    assert_eq!(collect(expr).to_string(), "12*x**2 - 4*x + 1");
  }

  #[test]
  fn test_negation() {
    assert_strict_eq!(collect(Expr::neg(Expr::neg(x()))), x());
    assert_strict_eq!(
      collect(Expr::neg(Expr::mul(Expr::from(4), x()))),
      Expr::mul(Expr::from(-4), x()),
    );
    assert_strict_eq!(collect(Expr::neg(Expr::from(3))), Expr::from(-3));
    let leading = Expr::sub(Expr::neg(x()), Expr::from(1));
    assert_eq!(collect(leading).to_string(), "-x - 1");
  }
}
