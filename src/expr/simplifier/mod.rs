//! Bottom-up rewriting of expression trees.
//!
//! Every simplifier here is node-local: it assumes the children of
//! the node it is looking at are already simplified. The default
//! pipeline chains these and repeats until a fixpoint.

pub mod evaluator;
pub mod factor;
pub mod passes;
pub mod term;

use crate::expr::Expr;
use crate::expr::walker::map_postorder;

/// Rewrites one node of an expression tree, assuming its children
/// have already been simplified.
pub trait Simplifier {
  fn simplify_expr_part(&self, expr: Expr) -> Expr;

  fn simplify_expr(&self, expr: Expr) -> Expr {
    map_postorder(expr, |e| self.simplify_expr_part(e))
  }
}

/// Upper bound on full passes over the tree. The collectors usually
/// converge in one or two.
pub const DEFAULT_PASSES: usize = 4;

pub fn default_simplifier() -> passes::Passes {
  passes::Passes::new(DEFAULT_PASSES)
    .with_stage(evaluator::FunctionEvaluator)
    .with_stage(factor::FactorCollector)
    .with_stage(term::TermCollector)
}

/// Simplifies `expr` with the [default simplifier](default_simplifier).
pub fn simplify(expr: Expr) -> Expr {
  default_simplifier().simplify_expr(expr)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::UnaryFunc;
  use crate::expr::number::Number;
  use crate::assert_strict_eq;

  fn x() -> Expr {
    Expr::x()
  }

  #[test]
  fn test_polynomial_normal_form() {
    // 3*4*x**(3-1) - 2*2*x + 1*1 - 0
    let expr = Expr::sub(
      Expr::add(
        Expr::sub(
          Expr::mul(Expr::mul(Expr::from(3), Expr::from(4)), Expr::pow(x(), Expr::sub(Expr::from(3), Expr::from(1)))),
          Expr::mul(Expr::mul(Expr::from(2), Expr::from(2)), Expr::pow(x(), Expr::from(1))),
        ),
        Expr::mul(Expr::one(), Expr::one()),
      ),
      Expr::zero(),
    );
    assert_eq!(simplify(expr).to_string(), "12*x**2 - 4*x + 1");
  }

  #[test]
  fn test_cancellation_to_zero() {
    let sin_one = Expr::call(UnaryFunc::Sin, Expr::from(1));
    assert_strict_eq!(simplify(Expr::sub(sin_one.clone(), sin_one)), Expr::zero());
    assert_strict_eq!(simplify(Expr::div(x(), x())), Expr::one());
  }

  #[test]
  fn test_exact_constants_survive() {
    let expr = Expr::mul(Expr::from(Number::ratio(1, 2)), Expr::pi());
    assert_eq!(simplify(expr).to_string(), "pi/2");
    let expr = Expr::call(UnaryFunc::Sqrt, Expr::from(2));
    assert_eq!(simplify(expr).to_string(), "sqrt(2)");
  }

  #[test]
  fn test_idempotent() {
    let expr = Expr::add(
      Expr::call(UnaryFunc::Cos, x()),
      Expr::div(Expr::mul(Expr::from(3), x()), Expr::pow(x(), Expr::from(2))),
    );
    let once = simplify(expr);
    let twice = simplify(once.clone());
    assert_strict_eq!(once, twice);
  }
}
