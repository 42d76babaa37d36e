//! Exact-when-possible real numbers.

use crate::util::Sign;
use crate::util::stricteq::StrictEq;

use approx::AbsDiffEq;
use num::{BigInt, BigRational, One, Signed, ToPrimitive, Zero};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops;
use std::str::FromStr;

/// A real number, stored as an arbitrary-precision integer, an exact
/// rational, or an `f64`.
///
/// Arithmetic stays exact while both operands are exact. Once a float
/// is involved, the result is a float.
#[derive(Debug, Clone)]
pub struct Number {
  inner: Repr,
}

#[derive(Debug, Clone)]
enum Repr {
  Integer(BigInt),
  Ratio(BigRational),
  Float(f64),
}

/// Which of the three storage forms a [`Number`] currently uses.
/// Ordered from most to least precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NumberKind {
  Integer,
  Ratio,
  Float,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to parse number")]
#[non_exhaustive]
pub struct ParseNumberError {}

/// Two operands brought to the least precise of their kinds.
enum Promoted {
  Integers(BigInt, BigInt),
  Ratios(BigRational, BigRational),
  Floats(f64, f64),
}

impl Promoted {
  fn of(left: Number, right: Number) -> Promoted {
    match (left.inner, right.inner) {
      (Repr::Integer(a), Repr::Integer(b)) => Promoted::Integers(a, b),
      (Repr::Float(a), b) => Promoted::Floats(a, Number { inner: b }.to_f64_or_nan()),
      (a, Repr::Float(b)) => Promoted::Floats(Number { inner: a }.to_f64_or_nan(), b),
      (a, b) => Promoted::Ratios(into_rational(a), into_rational(b)),
    }
  }

  fn compare(self) -> Option<Ordering> {
    match self {
      Promoted::Integers(a, b) => Some(a.cmp(&b)),
      Promoted::Ratios(a, b) => Some(a.cmp(&b)),
      Promoted::Floats(a, b) => a.partial_cmp(&b),
    }
  }
}

fn into_rational(repr: Repr) -> BigRational {
  match repr {
    Repr::Integer(i) => BigRational::from_integer(i),
    Repr::Ratio(r) => r,
    Repr::Float(f) => BigRational::from_float(f).unwrap_or_else(BigRational::zero),
  }
}

impl NumberKind {
  pub fn is_exact(self) -> bool {
    self != NumberKind::Float
  }
}

impl Number {
  pub fn kind(&self) -> NumberKind {
    match &self.inner {
      Repr::Integer(_) => NumberKind::Integer,
      Repr::Ratio(_) => NumberKind::Ratio,
      Repr::Float(_) => NumberKind::Float,
    }
  }

  pub fn is_exact(&self) -> bool {
    self.kind().is_exact()
  }

  /// `numer / denom` as an exact value, normalized to an integer when
  /// the division is even.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Number {
    Number::from(BigRational::new(numer.into(), denom.into()))
  }

  /// The exact value of the shortest decimal that prints as `value`,
  /// so `0.3` gives `3/10`. `None` for non-finite input.
  pub fn from_decimal(value: f64) -> Option<Number> {
    if value.is_finite() {
      parse_decimal_exact(&value.to_string())
    } else {
      None
    }
  }

  pub fn to_f64(&self) -> Option<f64> {
    match &self.inner {
      Repr::Integer(i) => i.to_f64(),
      Repr::Ratio(r) => r.to_f64(),
      Repr::Float(d) => Some(*d),
    }
  }

  pub fn to_f64_or_nan(&self) -> f64 {
    self.to_f64().unwrap_or(f64::NAN)
  }

  /// `None` for floats.
  pub fn to_rational(&self) -> Option<BigRational> {
    match &self.inner {
      Repr::Float(_) => None,
      exact => Some(into_rational(exact.clone())),
    }
  }

  pub fn to_i64(&self) -> Option<i64> {
    match &self.inner {
      Repr::Integer(i) => i.to_i64(),
      _ => None,
    }
  }

  pub fn is_integer(&self) -> bool {
    self.kind() == NumberKind::Integer
  }

  /// `None` for zero and NaN.
  pub fn sign(&self) -> Option<Sign> {
    match self.partial_cmp(&Number::zero())? {
      Ordering::Greater => Some(Sign::Positive),
      Ordering::Less => Some(Sign::Negative),
      Ordering::Equal => None,
    }
  }

  pub fn is_positive(&self) -> bool {
    self.sign() == Some(Sign::Positive)
  }

  pub fn is_negative(&self) -> bool {
    self.sign() == Some(Sign::Negative)
  }

  pub fn abs(&self) -> Number {
    if self.is_negative() { - self } else { self.clone() }
  }

  /// Division that refuses a zero divisor, exact or not.
  pub fn checked_div(&self, other: &Number) -> Option<Number> {
    (!other.is_zero()).then(|| self / other)
  }

  pub fn recip(&self) -> Option<Number> {
    Number::one().checked_div(self)
  }

  /// `self^exp` for an integer exponent. `0^0` is 1; zero to a
  /// negative power is `None`.
  pub fn checked_powi(&self, exp: i64) -> Option<Number> {
    if exp < 0 {
      return self.recip()?.checked_powi(exp.checked_neg()?);
    }
    let exp = usize::try_from(exp).ok()?;
    Some(match &self.inner {
      Repr::Integer(n) => Number::from(num::pow(n.clone(), exp)),
      Repr::Ratio(r) => Number::from(num::pow(r.clone(), exp)),
      Repr::Float(f) => Number::from(f.powi(i32::try_from(exp).ok()?)),
    })
  }

  /// The `n`th root, when both numerator and denominator are perfect
  /// `n`th powers. Even roots of negatives are `None`.
  pub fn exact_root(&self, n: u32) -> Option<Number> {
    let r = self.to_rational()?;
    if n == 0 || (n % 2 == 0 && r.is_negative()) {
      return None;
    }
    Some(Number::ratio(perfect_root(r.numer(), n)?, perfect_root(r.denom(), n)?))
  }

  /// `self^exp` for any real exponent, exact whenever the result is
  /// rational. `None` when the result is not a finite real.
  pub fn checked_pow(&self, exp: &Number) -> Option<Number> {
    if let Some(n) = exp.to_i64() {
      return self.checked_powi(n);
    }
    let exact = self.to_rational().zip(exp.to_rational()).and_then(|(base, exp)| {
      let p = exp.numer().to_i64()?;
      let q = exp.denom().to_u32()?;
      Number::from(base).exact_root(q)?.checked_powi(p)
    });
    exact.or_else(|| {
      let approx = self.to_f64_or_nan().powf(exp.to_f64_or_nan());
      approx.is_finite().then(|| Number::from(approx))
    })
  }
}

fn perfect_root(n: &BigInt, k: u32) -> Option<BigInt> {
  let root = n.nth_root(k);
  (num::pow(root.clone(), k as usize) == *n).then_some(root)
}

macro_rules! integer_conversions {
  ($($t:ty),*) => {
    $(
      impl From<$t> for Number {
        fn from(i: $t) -> Number {
          Number { inner: Repr::Integer(BigInt::from(i)) }
        }
      }
    )*
  };
}

integer_conversions!(i32, i64, usize, BigInt);

impl From<BigRational> for Number {
  fn from(r: BigRational) -> Number {
    if r.is_integer() {
      Number { inner: Repr::Integer(r.to_integer()) }
    } else {
      Number { inner: Repr::Ratio(r) }
    }
  }
}

impl From<f64> for Number {
  fn from(f: f64) -> Number {
    Number { inner: Repr::Float(f) }
  }
}

impl Default for Number {
  fn default() -> Number {
    Number::zero()
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.inner {
      Repr::Integer(i) => write!(f, "{i}"),
      Repr::Ratio(r) => write!(f, "{}/{}", r.numer(), r.denom()),
      // Whole floats keep a trailing ".0" so they read as inexact.
      Repr::Float(d) if d.fract() == 0.0 && d.abs() < 1e15 => write!(f, "{d:.1}"),
      Repr::Float(d) => write!(f, "{d}"),
    }
  }
}

/// Compares values only. [`StrictEq`] also compares kinds.
impl PartialEq for Number {
  fn eq(&self, other: &Number) -> bool {
    self.partial_cmp(other) == Some(Ordering::Equal)
  }
}

impl StrictEq for Number {
  fn strict_eq(&self, other: &Number) -> bool {
    self.kind() == other.kind() && self == other
  }
}

impl PartialOrd for Number {
  fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
    Promoted::of(self.clone(), other.clone()).compare()
  }
}

impl AbsDiffEq for Number {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    f64::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Number, epsilon: f64) -> bool {
    self.to_f64_or_nan().abs_diff_eq(&other.to_f64_or_nan(), epsilon)
  }
}

/// Implements a binary operator for owned and borrowed numbers.
/// `$on_integers` handles the all-integer case; the other cases apply
/// `$op` directly.
macro_rules! arithmetic_op {
  ($op_trait:ident, $method:ident, $op:tt, $on_integers:expr) => {
    impl ops::$op_trait for Number {
      type Output = Number;

      fn $method(self, other: Number) -> Number {
        match Promoted::of(self, other) {
          Promoted::Integers(a, b) => $on_integers(a, b),
          Promoted::Ratios(a, b) => Number::from(a $op b),
          Promoted::Floats(a, b) => Number::from(a $op b),
        }
      }
    }

    impl ops::$op_trait for &Number {
      type Output = Number;

      fn $method(self, other: &Number) -> Number {
        ops::$op_trait::$method(self.clone(), other.clone())
      }
    }
  };
}

arithmetic_op!(Add, add, +, |a: BigInt, b: BigInt| Number::from(a + b));
arithmetic_op!(Sub, sub, -, |a: BigInt, b: BigInt| Number::from(a - b));
arithmetic_op!(Mul, mul, *, |a: BigInt, b: BigInt| Number::from(a * b));
// Integer division produces a ratio rather than truncating. Panics on
// an exact zero divisor; see `Number::checked_div`.
arithmetic_op!(Div, div, /, |a: BigInt, b: BigInt| Number::from(BigRational::new(a, b)));

impl ops::Neg for Number {
  type Output = Number;

  fn neg(self) -> Number {
    let inner = match self.inner {
      Repr::Integer(i) => Repr::Integer(- i),
      Repr::Ratio(r) => Repr::Ratio(- r),
      Repr::Float(f) => Repr::Float(- f),
    };
    Number { inner }
  }
}

impl ops::Neg for &Number {
  type Output = Number;

  fn neg(self) -> Number {
    - self.clone()
  }
}

impl Zero for Number {
  fn zero() -> Number {
    Number::from(0)
  }

  fn is_zero(&self) -> bool {
    match &self.inner {
      Repr::Integer(i) => i.is_zero(),
      Repr::Ratio(r) => r.is_zero(),
      Repr::Float(f) => *f == 0.0,
    }
  }
}

impl One for Number {
  fn one() -> Number {
    Number::from(1)
  }

  fn is_one(&self) -> bool {
    match &self.inner {
      Repr::Integer(i) => i.is_one(),
      Repr::Ratio(r) => r.is_one(),
      Repr::Float(f) => *f == 1.0,
    }
  }
}

/// Integer literals parse exactly. Anything with a decimal point or
/// an exponent becomes a float.
impl FromStr for Number {
  type Err = ParseNumberError;

  fn from_str(s: &str) -> Result<Number, ParseNumberError> {
    if let Ok(i) = BigInt::from_str(s) {
      return Ok(Number::from(i));
    }
    match f64::from_str(s) {
      Ok(f) if f.is_finite() => Ok(Number::from(f)),
      _ => Err(ParseNumberError {}),
    }
  }
}

fn parse_decimal_exact(s: &str) -> Option<Number> {
  static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?)(\d+)(?:\.(\d+))?$").unwrap());
  let caps = DECIMAL.captures(s)?;
  let fraction = caps.get(3).map_or("", |m| m.as_str());
  let digits = BigInt::from_str(&format!("{}{fraction}", &caps[2])).ok()?;
  let value = Number::ratio(digits, num::pow(BigInt::from(10), fraction.len()));
  Some(if caps[1].is_empty() { value } else { - value })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{assert_strict_eq, assert_strict_ne};

  use approx::assert_abs_diff_eq;

  #[test]
  fn test_parse_integer() {
    assert_strict_eq!(Number::from_str("7").unwrap(), Number::from(7i64));
    assert_strict_eq!(Number::from_str("-99").unwrap(), Number::from(-99i64));
    assert_strict_eq!(
      Number::from_str("888888888888888888888888888888888").unwrap(),
      Number::from(BigInt::from_str("888888888888888888888888888888888").unwrap()),
    );
  }

  #[test]
  fn test_parse_float() {
    assert_strict_eq!(Number::from_str("1.9").unwrap(), Number::from(1.9f64));
    assert_strict_eq!(Number::from_str("3e-6").unwrap(), Number::from(3e-6f64));
    assert_eq!(Number::from_str("abc"), Err(ParseNumberError {}));
    assert_eq!(Number::from_str("inf"), Err(ParseNumberError {}));
  }

  #[test]
  fn test_from_decimal() {
    assert_strict_eq!(Number::from_decimal(1.0).unwrap(), Number::from(1));
    assert_strict_eq!(Number::from_decimal(0.3).unwrap(), Number::ratio(3, 10));
    assert_strict_eq!(Number::from_decimal(-2.5).unwrap(), Number::ratio(-5, 2));
    assert_strict_eq!(Number::from_decimal(-0.1).unwrap(), Number::ratio(-1, 10));
    assert!(Number::from_decimal(f64::NAN).is_none());
  }

  #[test]
  fn test_display() {
    assert_eq!(Number::from(3).to_string(), "3");
    assert_eq!(Number::ratio(-1, 2).to_string(), "-1/2");
    assert_eq!(Number::from(2.0).to_string(), "2.0");
    assert_eq!(Number::from(0.25).to_string(), "0.25");
  }

  #[test]
  fn test_ratio_kind_simplification() {
    assert_eq!(Number::ratio(2, 1).kind(), NumberKind::Integer);
    assert_eq!(Number::ratio(9, -3).kind(), NumberKind::Integer);
    assert_eq!(Number::ratio(1, 2).kind(), NumberKind::Ratio);
  }

  #[test]
  fn test_strict_eq() {
    assert_strict_eq!(Number::from(3), Number::ratio(9, 3));
    assert_strict_ne!(Number::from(3), Number::from(3.0));
    assert_strict_ne!(Number::from(0.5), Number::ratio(1, 2));
    assert_eq!(Number::from(0.5), Number::ratio(1, 2));
  }

  #[test]
  fn test_arithmetic_preserves_exactness() {
    assert_strict_eq!(Number::from(3) + Number::ratio(1, 2), Number::ratio(7, 2));
    assert_strict_eq!(Number::from(3) / Number::from(2), Number::ratio(3, 2));
    assert_strict_eq!(Number::ratio(1, 2) * Number::from(2), Number::from(1));
    assert_strict_eq!(Number::ratio(1, 2) + Number::from(3.0), Number::from(3.5));
    assert_strict_eq!(- Number::ratio(-1, 2), Number::ratio(1, 2));
  }

  #[test]
  fn test_checked_div() {
    assert!(Number::from(1).checked_div(&Number::zero()).is_none());
    assert!(Number::from(1).checked_div(&Number::from(0.0)).is_none());
    assert_strict_eq!(Number::from(1).checked_div(&Number::from(4)).unwrap(), Number::ratio(1, 4));
  }

  #[test]
  fn test_checked_powi() {
    assert_strict_eq!(Number::from(3).checked_powi(0).unwrap(), Number::from(1));
    assert_strict_eq!(Number::from(3).checked_powi(3).unwrap(), Number::from(27));
    assert_strict_eq!(Number::from(2).checked_powi(-2).unwrap(), Number::ratio(1, 4));
    assert_strict_eq!(Number::from(2.0).checked_powi(-1).unwrap(), Number::from(0.5));
    assert!(Number::zero().checked_powi(-1).is_none());
  }

  #[test]
  fn test_exact_root() {
    assert_strict_eq!(Number::from(9).exact_root(2).unwrap(), Number::from(3));
    assert_strict_eq!(Number::ratio(4, 9).exact_root(2).unwrap(), Number::ratio(2, 3));
    assert_strict_eq!(Number::from(-8).exact_root(3).unwrap(), Number::from(-2));
    assert!(Number::from(2).exact_root(2).is_none());
    assert!(Number::from(-4).exact_root(2).is_none());
    assert!(Number::from(4.0).exact_root(2).is_none());
  }

  #[test]
  fn test_checked_pow() {
    assert_strict_eq!(Number::from(4).checked_pow(&Number::ratio(3, 2)).unwrap(), Number::from(8));
    assert_strict_eq!(Number::from(-8).checked_pow(&Number::ratio(1, 3)).unwrap(), Number::from(-2));
    assert_abs_diff_eq!(Number::from(2).checked_pow(&Number::ratio(1, 2)).unwrap().to_f64().unwrap(), 2f64.sqrt());
    assert!(Number::from(-2).checked_pow(&Number::ratio(1, 2)).is_none());
  }

  #[test]
  fn test_sign_and_abs() {
    assert_eq!(Number::from(-3).sign(), Some(Sign::Negative));
    assert_eq!(Number::ratio(1, 3).sign(), Some(Sign::Positive));
    assert_eq!(Number::zero().sign(), None);
    assert_strict_eq!(Number::from(-3).abs(), Number::from(3));
  }
}
