pub mod calculus;
pub mod eval;
pub mod function;
pub mod number;
pub mod parser;
pub mod simplifier;
pub mod tokenizer;
pub mod var;
pub mod walker;

use function::UnaryFunc;
use number::Number;
use var::Var;
use crate::util::stricteq::StrictEq;

use num::{Zero, One};

use std::collections::BTreeSet;

/// A symbolic expression in (usually) one real variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Constant(Constant),
  Variable(Var),
  BinaryOp(BinaryOp, Box<Expr>, Box<Expr>),
  UnaryFunc(UnaryFunc, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
  Number(Number),
  Pi,
  E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
}

impl Expr {
  pub fn zero() -> Expr {
    Expr::from(Number::zero())
  }

  pub fn one() -> Expr {
    Expr::from(Number::one())
  }

  pub fn pi() -> Expr {
    Expr::Constant(Constant::Pi)
  }

  pub fn e() -> Expr {
    Expr::Constant(Constant::E)
  }

  pub fn var(name: &str) -> Option<Expr> {
    Var::new(name).map(Expr::Variable)
  }

  /// The designated variable `x`.
  pub fn x() -> Expr {
    Expr::Variable(Var::x())
  }

  pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp(op, Box::new(left), Box::new(right))
  }

  pub fn call(func: UnaryFunc, arg: Expr) -> Expr {
    Expr::UnaryFunc(func, Box::new(arg))
  }

  pub fn add(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Add, left, right)
  }

  pub fn sub(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Sub, left, right)
  }

  pub fn mul(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Mul, left, right)
  }

  pub fn div(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Div, left, right)
  }

  pub fn pow(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Pow, left, right)
  }

  pub fn neg(arg: Expr) -> Expr {
    Expr::call(UnaryFunc::Neg, arg)
  }

  pub fn as_number(&self) -> Option<&Number> {
    match self {
      Expr::Constant(Constant::Number(n)) => Some(n),
      _ => None,
    }
  }

  /// True if `self` is literally the exact number zero.
  pub fn is_zero(&self) -> bool {
    self.as_number().is_some_and(|n| n.is_exact() && n.is_zero())
  }

  /// True if `self` is literally the exact number one.
  pub fn is_one(&self) -> bool {
    self.as_number().is_some_and(|n| n.is_exact() && n.is_one())
  }

  /// All variables which appear in `self`, in sorted order.
  pub fn free_vars(&self) -> BTreeSet<Var> {
    let mut vars = BTreeSet::new();
    walker::visit_postorder(self, |e| {
      if let Expr::Variable(v) = e {
        vars.insert(v.clone());
      }
    });
    vars
  }

  pub fn contains_var(&self, var: &Var) -> bool {
    walker::any(self, |e| matches!(e, Expr::Variable(v) if v == var))
  }

  /// True if `self` contains no variables at all.
  pub fn is_constant(&self) -> bool {
    !walker::any(self, |e| matches!(e, Expr::Variable(_)))
  }

  /// Replaces every occurrence of `var` with `value`.
  pub fn substitute(self, var: &Var, value: &Expr) -> Expr {
    walker::map_postorder(self, |e| {
      match e {
        Expr::Variable(v) if &v == var => value.clone(),
        e => e,
      }
    })
  }
}

impl BinaryOp {
  /// The function name of the corresponding infix operator in the
  /// operator table.
  pub fn function_name(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Pow => "^",
    }
  }

  pub fn from_function_name(name: &str) -> Option<BinaryOp> {
    match name {
      "+" => Some(BinaryOp::Add),
      "-" => Some(BinaryOp::Sub),
      "*" => Some(BinaryOp::Mul),
      "/" => Some(BinaryOp::Div),
      "^" => Some(BinaryOp::Pow),
      _ => None,
    }
  }
}

impl From<Number> for Expr {
  fn from(n: Number) -> Expr {
    Expr::Constant(Constant::Number(n))
  }
}

impl From<i32> for Expr {
  fn from(n: i32) -> Expr {
    Expr::from(Number::from(n))
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::from(Number::from(n))
  }
}

impl From<Var> for Expr {
  fn from(v: Var) -> Expr {
    Expr::Variable(v)
  }
}

impl StrictEq for Constant {
  fn strict_eq(&self, other: &Constant) -> bool {
    match (self, other) {
      (Constant::Number(a), Constant::Number(b)) => a.strict_eq(b),
      (Constant::Pi, Constant::Pi) | (Constant::E, Constant::E) => true,
      _ => false,
    }
  }
}

/// Structural equality, comparing numbers by representation as well
/// as value. So `2` and `2.0` are distinct expressions here.
impl StrictEq for Expr {
  fn strict_eq(&self, other: &Expr) -> bool {
    match (self, other) {
      (Expr::Constant(a), Expr::Constant(b)) => a.strict_eq(b),
      (Expr::Variable(a), Expr::Variable(b)) => a == b,
      (Expr::BinaryOp(op1, l1, r1), Expr::BinaryOp(op2, l2, r2)) =>
        op1 == op2 && l1.strict_eq(l2) && r1.strict_eq(r2),
      (Expr::UnaryFunc(f1, a1), Expr::UnaryFunc(f2, a2)) =>
        f1 == f2 && a1.strict_eq(a2),
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{assert_strict_eq, assert_strict_ne};

  #[test]
  fn test_free_vars() {
    let expr = Expr::add(
      Expr::mul(Expr::x(), Expr::var("y").unwrap()),
      Expr::call(UnaryFunc::Sin, Expr::x()),
    );
    let vars: Vec<_> = expr.free_vars().into_iter().map(String::from).collect();
    assert_eq!(vars, vec!["x", "y"]);
    assert!(expr.contains_var(&Var::x()));
    assert!(!expr.is_constant());
    assert!(Expr::add(Expr::pi(), Expr::from(1)).is_constant());
  }

  #[test]
  fn test_substitute() {
    let expr = Expr::pow(Expr::x(), Expr::from(2));
    let result = expr.substitute(&Var::x(), &Expr::from(3));
    assert_strict_eq!(result, Expr::pow(Expr::from(3), Expr::from(2)));
  }

  #[test]
  fn test_strict_eq_distinguishes_representation() {
    assert_strict_eq!(Expr::from(2), Expr::from(Number::ratio(4, 2)));
    assert_strict_ne!(Expr::from(2), Expr::from(Number::from(2.0)));
    assert_eq!(Expr::from(2), Expr::from(Number::from(2.0)));
    assert_strict_ne!(Expr::pi(), Expr::e());
  }

  #[test]
  fn test_is_zero_and_one() {
    assert!(Expr::zero().is_zero());
    assert!(!Expr::from(Number::from(0.0)).is_zero());
    assert!(Expr::one().is_one());
    assert!(!Expr::x().is_one());
  }
}
