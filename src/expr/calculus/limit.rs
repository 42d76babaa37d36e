//! One-sided limits of expressions in one variable.
//!
//! Limits are found in three stages. If the expression is continuous
//! at the point, the limit is the exact value obtained by substitution.
//! Otherwise the expression is expanded as a series in the distance to
//! the point, and the leading term decides. Expressions whose
//! expansion is not a power series (such as `exp(1/x)` at zero) are
//! handled by arithmetic on extended real values of the
//! subexpressions. Indeterminate forms left over from that arithmetic,
//! such as `x*log(x)` or `x^x` at zero, are settled by comparing
//! growth rates of the form `h^p * |log h|^q`.

use super::series::{Series, Expander, Direction, SeriesError, coeff_sign, COEFF_EPSILON};
use crate::display::{to_plain, to_latex};
use crate::expr::{Expr, BinaryOp};
use crate::expr::eval::eval_constant;
use crate::expr::function::{UnaryFunc, CONTINUITY_EPSILON};
use crate::expr::number::Number;
use crate::expr::simplifier::simplify;
use crate::expr::var::Var;
use crate::util::Sign;
use crate::util::stricteq::StrictEq;

use num::{BigInt, BigRational, Integer, Signed, Zero, One};
use thiserror::Error;
use tracing::debug;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub, Mul, Neg};

/// Working precisions for the series expansion, in powers of the
/// distance to the point. Each is tried in turn until a leading term
/// survives cancellation.
pub const PRECISIONS: [usize; 3] = [6, 12, 24];

/// The limit of a function from one side of a point.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitValue {
  Finite(Expr),
  PosInfinity,
  NegInfinity,
  /// The function is not real-valued on this side of the point.
  Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitPair {
  pub left: LimitValue,
  pub right: LimitValue,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitError {
  #[error("The function oscillates without approaching a value near x = {0}")]
  Oscillation(f64),
  #[error("Could not resolve an indeterminate form near x = {0}")]
  Indeterminate(f64),
  #[error("Could not determine the limit near x = {0} (too many terms cancel)")]
  PrecisionExhausted(f64),
  #[error("Free symbol '{0}' in limit expression")]
  FreeSymbol(String),
  #[error("Limit point {0} is not a finite number")]
  NonFinitePoint(f64),
}

/// A limit in the extended reals, as seen by the fallback evaluator.
#[derive(Debug, Clone)]
enum Ext {
  Finite(Expr),
  PosInfinity,
  NegInfinity,
  /// Bounded, but with no limit, such as `sin(1/x)` at zero.
  Bounded,
  Undefined,
  Indeterminate,
}

/// How an expression behaves as the distance `h` to the point shrinks:
/// like `c * h^power * |log h|^logs`, where `c` has sign `sign`.
#[derive(Debug, Clone)]
struct Growth {
  power: BigRational,
  logs: BigRational,
  sign: Sign,
}

impl LimitValue {
  pub fn to_latex(&self) -> String {
    match self {
      LimitValue::Finite(expr) => to_latex(expr),
      LimitValue::PosInfinity => String::from("\\infty"),
      LimitValue::NegInfinity => String::from("-\\infty"),
      LimitValue::Undefined => String::from("\\mathrm{NaN}"),
    }
  }

  pub fn is_finite(&self) -> bool {
    matches!(self, LimitValue::Finite(_))
  }
}

impl Display for LimitValue {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      LimitValue::Finite(expr) => write!(f, "{}", to_plain(expr)),
      LimitValue::PosInfinity => write!(f, "inf"),
      LimitValue::NegInfinity => write!(f, "-inf"),
      LimitValue::Undefined => write!(f, "nan"),
    }
  }
}

impl StrictEq for LimitValue {
  fn strict_eq(&self, other: &LimitValue) -> bool {
    match (self, other) {
      (LimitValue::Finite(a), LimitValue::Finite(b)) => a.strict_eq(b),
      (LimitValue::PosInfinity, LimitValue::PosInfinity) => true,
      (LimitValue::NegInfinity, LimitValue::NegInfinity) => true,
      (LimitValue::Undefined, LimitValue::Undefined) => true,
      _ => false,
    }
  }
}

impl LimitPair {
  /// The two-sided limit exists when both one-sided limits are
  /// defined and structurally identical.
  pub fn exists(&self) -> bool {
    self.left != LimitValue::Undefined && self.left.strict_eq(&self.right)
  }
}

/// Computes both one-sided limits of `expr` as `x` approaches `point`.
pub fn evaluate_limit(expr: &Expr, point: f64) -> Result<LimitPair, LimitError> {
  let var = Var::x();
  if let Some(other) = expr.free_vars().into_iter().find(|v| v != &var) {
    return Err(LimitError::FreeSymbol(other.into()));
  }
  let exact_point = Number::from_decimal(point).ok_or(LimitError::NonFinitePoint(point))?;

  if continuous_value(expr, &var, point).is_some() {
    let value = simplify(expr.clone().substitute(&var, &Expr::from(exact_point.clone())));
    if eval_constant(&value).is_finite() {
      debug!(%value, point, "Limit by direct substitution");
      return Ok(LimitPair { left: LimitValue::Finite(value.clone()), right: LimitValue::Finite(value) });
    }
  }

  let left = SideEvaluator::new(&var, exact_point.clone(), Direction::Left, point).limit(expr)?;
  let right = SideEvaluator::new(&var, exact_point, Direction::Right, point).limit(expr)?;
  debug!(%left, %right, point, "One-sided limits");
  Ok(LimitPair { left, right })
}

/// The value of `expr` at `x`, if `expr` is real-valued and continuous
/// in a neighborhood of `x`.
fn continuous_value(expr: &Expr, var: &Var, x: f64) -> Option<f64> {
  let value = match expr {
    Expr::Constant(_) => eval_constant(expr),
    Expr::Variable(v) => {
      if v != var {
        return None;
      }
      x
    }
    Expr::BinaryOp(op, left, right) => {
      let a = continuous_value(left, var, x)?;
      let b = continuous_value(right, var, x)?;
      match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
          if b.abs() <= CONTINUITY_EPSILON {
            return None;
          }
          a / b
        }
        BinaryOp::Pow => {
          if !power_is_continuous(a, right) {
            return None;
          }
          a.powf(b)
        }
      }
    }
    Expr::UnaryFunc(func, arg) => {
      let a = continuous_value(arg, var, x)?;
      if !func.is_continuous_at(a) {
        return None;
      }
      func.eval_f64(a)
    }
  };
  value.is_finite().then_some(value)
}

fn power_is_continuous(base: f64, exponent: &Expr) -> bool {
  match exponent.as_number() {
    Some(n) if n.is_integer() => {
      !n.is_negative() || base.abs() > CONTINUITY_EPSILON
    }
    Some(n) if n.to_rational().is_some_and(|r| r.denom().is_odd()) => {
      base.abs() > CONTINUITY_EPSILON
    }
    _ => base > CONTINUITY_EPSILON,
  }
}

/// The limit which a series' leading term determines, if any.
fn leading_limit(series: &Series) -> Result<Option<LimitValue>, SeriesError> {
  if series.is_exact_zero() {
    return Ok(Some(LimitValue::Finite(Expr::zero())));
  }
  match series.leading_term() {
    Some((e, c)) => {
      if e.is_positive() {
        Ok(Some(LimitValue::Finite(Expr::zero())))
      } else if e.is_negative() {
        match coeff_sign(c)? {
          Sign::Positive => Ok(Some(LimitValue::PosInfinity)),
          Sign::Negative => Ok(Some(LimitValue::NegInfinity)),
        }
      } else {
        Ok(Some(LimitValue::Finite(c.clone())))
      }
    }
    None => {
      // Everything cancelled, but up to a positive order.
      let vanishes = series.order().is_some_and(|o| o.is_positive());
      Ok(vanishes.then(|| LimitValue::Finite(Expr::zero())))
    }
  }
}

struct SideEvaluator<'a> {
  var: &'a Var,
  point: Number,
  direction: Direction,
  /// The point as the user gave it, for error messages.
  display_point: f64,
}

impl<'a> SideEvaluator<'a> {
  fn new(var: &'a Var, point: Number, direction: Direction, display_point: f64) -> Self {
    SideEvaluator { var, point, direction, display_point }
  }

  fn limit(&self, expr: &Expr) -> Result<LimitValue, LimitError> {
    let failure = match self.series_limit(expr) {
      Ok(value) => return Ok(value),
      Err(err) => err,
    };
    debug!(%expr, direction = ?self.direction, reason = %failure, "Falling back to extended-real limit arithmetic");
    match self.ext_limit(expr) {
      Ext::Finite(value) => Ok(LimitValue::Finite(simplify(value))),
      Ext::PosInfinity => Ok(LimitValue::PosInfinity),
      Ext::NegInfinity => Ok(LimitValue::NegInfinity),
      Ext::Undefined => Ok(LimitValue::Undefined),
      Ext::Bounded => Err(LimitError::Oscillation(self.display_point)),
      Ext::Indeterminate => {
        if failure == SeriesError::Precision {
          Err(LimitError::PrecisionExhausted(self.display_point))
        } else {
          Err(LimitError::Indeterminate(self.display_point))
        }
      }
    }
  }

  fn expander(&self, precision: usize) -> Expander<'a> {
    Expander::new(self.var, self.point.clone(), self.direction, precision)
  }

  fn series_limit(&self, expr: &Expr) -> Result<LimitValue, SeriesError> {
    for precision in PRECISIONS {
      let series = match self.expander(precision).expand(expr) {
        Ok(series) => series,
        Err(SeriesError::Precision) => continue,
        Err(SeriesError::NotReal | SeriesError::DivisionByZero) => return Ok(LimitValue::Undefined),
        Err(err) => return Err(err),
      };
      match leading_limit(&series) {
        Ok(Some(value)) => return Ok(value),
        Ok(None) | Err(SeriesError::Precision) => continue,
        Err(SeriesError::NotReal) => return Ok(LimitValue::Undefined),
        Err(err) => return Err(err),
      }
    }
    Err(SeriesError::Precision)
  }

  /// The sign of `expr` near the point, when it has a power series.
  fn approach_sign(&self, expr: &Expr) -> Option<Sign> {
    let precision = PRECISIONS[PRECISIONS.len() - 1];
    let series = self.expander(precision).expand(expr).ok()?;
    let (_, c) = series.leading_term()?;
    coeff_sign(c).ok()
  }

  fn ext_limit(&self, expr: &Expr) -> Ext {
    match self.series_limit(expr) {
      Ok(LimitValue::Finite(value)) => return Ext::finite(value),
      Ok(LimitValue::PosInfinity) => return Ext::PosInfinity,
      Ok(LimitValue::NegInfinity) => return Ext::NegInfinity,
      Ok(LimitValue::Undefined) => return Ext::Undefined,
      Err(_) => {}
    }
    match expr {
      Expr::Constant(_) | Expr::Variable(_) => Ext::Indeterminate,
      Expr::BinaryOp(op, left, right) => {
        let a = self.ext_limit(left);
        let b = self.ext_limit(right);
        let combined = match op {
          BinaryOp::Add => a + b,
          BinaryOp::Sub => a - b,
          BinaryOp::Mul => a * b,
          BinaryOp::Div => a.div(b, || self.approach_sign(right)),
          BinaryOp::Pow => a.pow(b),
        };
        match combined {
          Ext::Indeterminate => self.resolve_indeterminate(expr, *op, left, right),
          other => other,
        }
      }
      Expr::UnaryFunc(func, arg) => {
        self.ext_limit(arg).apply(*func, || self.approach_sign(arg))
      }
    }
  }

  /// Second attempt at a subexpression whose parts combine to an
  /// indeterminate form.
  fn resolve_indeterminate(&self, expr: &Expr, op: BinaryOp, left: &Expr, right: &Expr) -> Ext {
    if let Some(ext) = self.growth(expr).and_then(|g| g.limit()) {
      debug!(%expr, "Indeterminate form settled by growth rates");
      return ext;
    }
    if op == BinaryOp::Pow {
      // u^v = exp(v * log(u)), which turns 0^0 into exp(0 * inf).
      let rewritten = Expr::call(UnaryFunc::Exp, Expr::mul(right.clone(), Expr::call(UnaryFunc::Ln, left.clone())));
      return self.ext_limit(&rewritten);
    }
    Ext::Indeterminate
  }

  fn growth(&self, expr: &Expr) -> Option<Growth> {
    let precision = PRECISIONS[PRECISIONS.len() - 1];
    match self.expander(precision).expand(expr) {
      Ok(series) => {
        let (e, c) = series.leading_term()?;
        return Some(Growth::power(e.clone(), coeff_sign(c).ok()?));
      }
      Err(SeriesError::NonPower) => {}
      Err(_) => return None,
    }
    match expr {
      Expr::Constant(_) | Expr::Variable(_) => None,
      Expr::BinaryOp(op, left, right) => {
        match op {
          BinaryOp::Add => self.growth(left)?.add(self.growth(right)?),
          BinaryOp::Sub => self.growth(left)?.add(self.growth(right)?.neg()),
          BinaryOp::Mul => Some(self.growth(left)?.mul(self.growth(right)?)),
          BinaryOp::Div => Some(self.growth(left)?.mul(self.growth(right)?.recip())),
          BinaryOp::Pow => {
            let exponent = simplify((**right).clone()).as_number()?.to_rational()?;
            self.growth(left)?.pow(&exponent)
          }
        }
      }
      Expr::UnaryFunc(func, arg) => {
        let inner = self.growth(arg)?;
        match func {
          UnaryFunc::Neg => Some(inner.neg()),
          UnaryFunc::Abs => Some(Growth { power: inner.power, logs: inner.logs, sign: Sign::Positive }),
          UnaryFunc::Sqrt => inner.pow(&BigRational::new(BigInt::one(), BigInt::from(2))),
          UnaryFunc::Ln => inner.ln(),
          _ => None,
        }
      }
    }
  }
}

impl Growth {
  fn power(power: BigRational, sign: Sign) -> Growth {
    Growth { power, logs: BigRational::zero(), sign }
  }

  fn neg(self) -> Growth {
    Growth { power: self.power, logs: self.logs, sign: - self.sign }
  }

  fn recip(self) -> Growth {
    Growth { power: - self.power, logs: - self.logs, sign: self.sign }
  }

  fn mul(self, other: Growth) -> Growth {
    Growth {
      power: self.power + other.power,
      logs: self.logs + other.logs,
      sign: self.sign * other.sign,
    }
  }

  /// Smaller is larger: a lower power of `h` dominates, and at equal
  /// powers more factors of `log h` dominate.
  fn rate(&self) -> (BigRational, BigRational) {
    (self.power.clone(), - self.logs.clone())
  }

  /// The dominant term of a sum. Equal rates of opposite sign may
  /// cancel, so nothing is known then.
  fn add(self, other: Growth) -> Option<Growth> {
    match self.rate().cmp(&other.rate()) {
      Ordering::Less => Some(self),
      Ordering::Greater => Some(other),
      Ordering::Equal => (self.sign == other.sign).then_some(self),
    }
  }

  fn pow(self, exponent: &BigRational) -> Option<Growth> {
    let sign = match self.sign {
      Sign::Positive => Sign::Positive,
      Sign::Negative if exponent.is_integer() => {
        if exponent.to_integer().is_odd() { Sign::Negative } else { Sign::Positive }
      }
      Sign::Negative => return None,
    };
    Some(Growth { power: self.power * exponent, logs: self.logs * exponent, sign })
  }

  /// `log(c h^p) = p log(h) + log(c)`, dominated by `p log(h)`, which
  /// has the opposite sign to `p` since `h` is small.
  fn ln(self) -> Option<Growth> {
    if self.sign != Sign::Positive || !self.logs.is_zero() || self.power.is_zero() {
      return None;
    }
    let sign = if self.power.is_positive() { Sign::Negative } else { Sign::Positive };
    Some(Growth { power: BigRational::zero(), logs: BigRational::one(), sign })
  }

  fn limit(&self) -> Option<Ext> {
    let vanishes = self.power.is_positive() || (self.power.is_zero() && self.logs.is_negative());
    let grows = self.power.is_negative() || (self.power.is_zero() && self.logs.is_positive());
    if vanishes {
      Some(Ext::finite(Expr::zero()))
    } else if grows {
      Some(Ext::infinity(self.sign))
    } else {
      None
    }
  }
}

impl Ext {
  fn finite(value: Expr) -> Ext {
    let value = simplify(value);
    if eval_constant(&value).is_nan() {
      Ext::Undefined
    } else {
      Ext::Finite(value)
    }
  }

  fn sign(&self) -> Option<Sign> {
    match self {
      Ext::Finite(c) => {
        let v = eval_constant(c);
        if v.abs() < COEFF_EPSILON {
          None
        } else if v > 0.0 {
          Some(Sign::Positive)
        } else {
          Some(Sign::Negative)
        }
      }
      Ext::PosInfinity => Some(Sign::Positive),
      Ext::NegInfinity => Some(Sign::Negative),
      _ => None,
    }
  }

  fn is_zero(&self) -> bool {
    matches!(self, Ext::Finite(c) if eval_constant(c).abs() < COEFF_EPSILON)
  }

  fn is_infinite(&self) -> bool {
    matches!(self, Ext::PosInfinity | Ext::NegInfinity)
  }

  fn infinity(sign: Sign) -> Ext {
    match sign {
      Sign::Positive => Ext::PosInfinity,
      Sign::Negative => Ext::NegInfinity,
    }
  }

  /// Division. `denom_sign` reports the side from which the
  /// denominator approaches zero, and is only consulted in that case.
  fn div(self, other: Ext, denom_sign: impl FnOnce() -> Option<Sign>) -> Ext {
    use Ext::*;
    match (self, other) {
      (Undefined, _) | (_, Undefined) => Undefined,
      (Indeterminate, _) | (_, Indeterminate) => Indeterminate,
      (_, Bounded) => Indeterminate,
      (a, b) if b.is_zero() => {
        match (a.sign(), denom_sign()) {
          (Some(s1), Some(s2)) => Ext::infinity(s1 * s2),
          _ => Indeterminate,
        }
      }
      (a, b) if b.is_infinite() => {
        if a.is_infinite() { Indeterminate } else { Ext::finite(Expr::zero()) }
      }
      (Finite(a), Finite(b)) => Ext::finite(Expr::div(a, b)),
      (Bounded, _) => Bounded,
      (a, b) => {
        // a is infinite, b is finite and nonzero
        match (a.sign(), b.sign()) {
          (Some(s1), Some(s2)) => Ext::infinity(s1 * s2),
          _ => Indeterminate,
        }
      }
    }
  }

  fn pow(self, exponent: Ext) -> Ext {
    use Ext::*;
    match (self, exponent) {
      (Undefined, _) | (_, Undefined) => Undefined,
      (Indeterminate, _) | (_, Indeterminate) | (Bounded, _) | (_, Bounded) => Indeterminate,
      (Finite(b), Finite(e)) => {
        let base = eval_constant(&b);
        let exp = eval_constant(&e);
        if base.abs() < COEFF_EPSILON && exp <= 0.0 {
          Indeterminate
        } else {
          Ext::finite(Expr::pow(b, e))
        }
      }
      (Finite(b), e) => {
        // Infinite exponent
        let base = eval_constant(&b);
        let grows = (base > 1.0) == matches!(e, PosInfinity);
        if base < 0.0 || (base - 1.0).abs() < COEFF_EPSILON {
          Indeterminate
        } else if base.abs() < COEFF_EPSILON {
          if matches!(e, PosInfinity) { Ext::finite(Expr::zero()) } else { PosInfinity }
        } else if grows {
          PosInfinity
        } else {
          Ext::finite(Expr::zero())
        }
      }
      (PosInfinity, e) => {
        match e.sign() {
          Some(Sign::Positive) => PosInfinity,
          Some(Sign::Negative) => Ext::finite(Expr::zero()),
          None => Indeterminate,
        }
      }
      (NegInfinity, _) => Indeterminate,
    }
  }

  /// Applies a function. `arg_sign` reports the side from which the
  /// argument approaches its limit, and is only consulted at a
  /// discontinuity.
  fn apply(self, func: UnaryFunc, arg_sign: impl FnOnce() -> Option<Sign>) -> Ext {
    use Ext::*;
    let half_pi = || Expr::div(Expr::pi(), Expr::from(2));
    match self {
      Undefined => Undefined,
      Indeterminate => Indeterminate,
      Finite(c) => {
        let value = eval_constant(&c);
        if func.is_continuous_at(value) {
          return Ext::finite(Expr::call(func, c));
        }
        let at_zero = value.abs() < COEFF_EPSILON;
        match func {
          UnaryFunc::Ln | UnaryFunc::Sqrt if value < 0.0 && !at_zero => Undefined,
          UnaryFunc::Ln | UnaryFunc::Sqrt | UnaryFunc::Sign if at_zero => {
            match (func, arg_sign()) {
              (_, None) => Indeterminate,
              (UnaryFunc::Ln | UnaryFunc::Sqrt, Some(Sign::Negative)) => Undefined,
              (UnaryFunc::Ln, Some(Sign::Positive)) => NegInfinity,
              (UnaryFunc::Sqrt, Some(Sign::Positive)) => Ext::finite(Expr::zero()),
              (_, Some(sign)) => Ext::finite(Expr::from(sign.as_i64())),
            }
          }
          UnaryFunc::Asin | UnaryFunc::Acos if value.abs() > 1.0 + COEFF_EPSILON => Undefined,
          UnaryFunc::Asin | UnaryFunc::Acos => Ext::finite(Expr::call(func, c)),
          _ => Indeterminate,
        }
      }
      ext @ (PosInfinity | NegInfinity) => {
        let sign = if matches!(ext, PosInfinity) { Sign::Positive } else { Sign::Negative };
        let signed = |e: Expr| Ext::finite(Expr::mul(Expr::from(sign.as_i64()), e));
        match func {
          UnaryFunc::Neg => Ext::infinity(- sign),
          UnaryFunc::Exp => if sign == Sign::Positive { PosInfinity } else { Ext::finite(Expr::zero()) },
          UnaryFunc::Ln | UnaryFunc::Sqrt => if sign == Sign::Positive { PosInfinity } else { Undefined },
          UnaryFunc::Sinh => Ext::infinity(sign),
          UnaryFunc::Cosh | UnaryFunc::Abs => PosInfinity,
          UnaryFunc::Atan => signed(half_pi()),
          UnaryFunc::Tanh | UnaryFunc::Sign => signed(Expr::one()),
          UnaryFunc::Sin | UnaryFunc::Cos => Bounded,
          UnaryFunc::Asin | UnaryFunc::Acos => Undefined,
          UnaryFunc::Tan | UnaryFunc::Cot | UnaryFunc::Sec | UnaryFunc::Csc => Indeterminate,
        }
      }
      Bounded => {
        match func {
          UnaryFunc::Neg | UnaryFunc::Sin | UnaryFunc::Cos | UnaryFunc::Atan | UnaryFunc::Tanh |
          UnaryFunc::Sign | UnaryFunc::Exp | UnaryFunc::Abs => Bounded,
          _ => Indeterminate,
        }
      }
    }
  }
}

impl Add for Ext {
  type Output = Ext;

  fn add(self, other: Ext) -> Ext {
    use Ext::*;
    match (self, other) {
      (Undefined, _) | (_, Undefined) => Undefined,
      (Indeterminate, _) | (_, Indeterminate) => Indeterminate,
      (Finite(a), Finite(b)) => Ext::finite(Expr::add(a, b)),
      (PosInfinity, NegInfinity) | (NegInfinity, PosInfinity) => Indeterminate,
      (PosInfinity, _) | (_, PosInfinity) => PosInfinity,
      (NegInfinity, _) | (_, NegInfinity) => NegInfinity,
      (Bounded, _) | (_, Bounded) => Bounded,
    }
  }
}

impl Neg for Ext {
  type Output = Ext;

  fn neg(self) -> Ext {
    use Ext::*;
    match self {
      Finite(a) => Ext::finite(Expr::neg(a)),
      PosInfinity => NegInfinity,
      NegInfinity => PosInfinity,
      other => other,
    }
  }
}

impl Sub for Ext {
  type Output = Ext;

  fn sub(self, other: Ext) -> Ext {
    self + -other
  }
}

impl Mul for Ext {
  type Output = Ext;

  fn mul(self, other: Ext) -> Ext {
    use Ext::*;
    match (self, other) {
      (Undefined, _) | (_, Undefined) => Undefined,
      (Indeterminate, _) | (_, Indeterminate) => Indeterminate,
      (Finite(a), Finite(b)) => Ext::finite(Expr::mul(a, b)),
      (Bounded, Bounded) => Bounded,
      (Bounded, x) | (x, Bounded) => {
        if x.is_zero() {
          Ext::finite(Expr::zero())
        } else if x.is_infinite() {
          Indeterminate
        } else {
          Bounded
        }
      }
      (a, b) => {
        // At least one side is infinite.
        match (a.sign(), b.sign()) {
          (Some(s1), Some(s2)) => Ext::infinity(s1 * s2),
          _ => Indeterminate,
        }
      }
    }
  }
}
