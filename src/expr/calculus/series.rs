//! Truncated generalized power series in a small positive parameter
//! `h`, with exact symbolic coefficients.
//!
//! A series is a finite set of terms `c * h^e` for rational `e`, plus
//! an optional truncation order: a series with order `o` is only
//! known up to `O(h^o)`. A series without an order is exact.

use crate::expr::{Expr, BinaryOp};
use crate::expr::eval::eval_constant;
use crate::expr::function::UnaryFunc;
use crate::expr::number::Number;
use crate::expr::simplifier::simplify;
use crate::expr::var::Var;
use crate::util::Sign;

use num::{BigInt, BigRational, Integer, Zero, One, Signed, ToPrimitive};
use thiserror::Error;

use std::collections::BTreeMap;

/// Coefficients whose numerical value is smaller than this are
/// treated as zero.
pub const COEFF_EPSILON: f64 = 1e-12;

/// Hard cap on the number of terms in a single power sum.
const MAX_SUM_TERMS: usize = 200;

#[derive(Debug, Clone)]
pub struct Series {
  terms: BTreeMap<BigRational, Expr>,
  order: Option<BigRational>,
}

/// The side from which the variable approaches the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Left,
  Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
  /// The expression is not real-valued on this side of the point.
  #[error("Expression is not real-valued near the point")]
  NotReal,
  /// Division by an expression which is identically zero.
  #[error("Division by zero")]
  DivisionByZero,
  /// The expansion contains a term which is not a power of `h`, such
  /// as `log(h)` or `exp(1/h)`.
  #[error("Expansion is not a power series")]
  NonPower,
  /// Too many terms cancelled to determine a leading term.
  #[error("Not enough terms to determine the leading term")]
  Precision,
}

impl Direction {
  pub fn sign(self) -> Sign {
    match self {
      Direction::Left => Sign::Negative,
      Direction::Right => Sign::Positive,
    }
  }
}

impl Series {
  pub fn zero() -> Series {
    Series { terms: BTreeMap::new(), order: None }
  }

  pub fn one() -> Series {
    Series::constant(Expr::one())
  }

  /// A constant series. The coefficient is simplified, and dropped if
  /// it is zero.
  pub fn constant(c: Expr) -> Series {
    Series::monomial(c, BigRational::zero())
  }

  pub fn monomial(c: Expr, exponent: BigRational) -> Series {
    let mut terms = BTreeMap::new();
    if let Some(c) = normalize_coeff(c) {
      terms.insert(exponent, c);
    }
    Series { terms, order: None }
  }

  /// True if the series is known to be exactly zero.
  pub fn is_exact_zero(&self) -> bool {
    self.terms.is_empty() && self.order.is_none()
  }

  pub fn order(&self) -> Option<&BigRational> {
    self.order.as_ref()
  }

  pub fn leading_term(&self) -> Option<(&BigRational, &Expr)> {
    self.terms.iter().next()
  }

  /// The exponent of the leading term, or the truncation order if
  /// there are no known terms. `None` for the exact zero series.
  pub fn valuation(&self) -> Option<BigRational> {
    match self.leading_term() {
      Some((e, _)) => Some(e.clone()),
      None => self.order.clone(),
    }
  }

  pub fn coeff(&self, exponent: &BigRational) -> Option<&Expr> {
    self.terms.get(exponent)
  }

  pub fn terms(&self) -> impl Iterator<Item = (&BigRational, &Expr)> {
    self.terms.iter()
  }

  /// Forgets everything at or above `order`.
  pub fn truncate(mut self, order: &BigRational) -> Series {
    if self.order.as_ref().map_or(true, |o| o > order) {
      self.order = Some(order.clone());
    }
    self.terms.retain(|e, _| e < order);
    self
  }

  pub fn add(&self, other: &Series) -> Series {
    let order = min_order(self.order.as_ref(), other.order.as_ref());
    let mut sums: BTreeMap<BigRational, Expr> = BTreeMap::new();
    for (e, c) in self.terms.iter().chain(other.terms.iter()) {
      let sum = match sums.remove(e) {
        None => c.clone(),
        Some(acc) => Expr::add(acc, c.clone()),
      };
      sums.insert(e.clone(), sum);
    }
    Series::from_raw_terms(sums, order)
  }

  pub fn neg(&self) -> Series {
    let terms = self.terms.iter()
      .map(|(e, c)| (e.clone(), Expr::neg(c.clone())))
      .collect();
    Series::from_raw_terms(terms, self.order.clone())
  }

  pub fn sub(&self, other: &Series) -> Series {
    self.add(&other.neg())
  }

  pub fn scale(&self, factor: &Expr) -> Series {
    if normalize_coeff(factor.clone()).is_none() {
      return Series::zero();
    }
    let terms = self.terms.iter()
      .map(|(e, c)| (e.clone(), Expr::mul(factor.clone(), c.clone())))
      .collect();
    Series::from_raw_terms(terms, self.order.clone())
  }

  /// Multiplies the series by `h^k`.
  pub fn shift(&self, k: &BigRational) -> Series {
    Series {
      terms: self.terms.iter().map(|(e, c)| (e + k, c.clone())).collect(),
      order: self.order.as_ref().map(|o| o + k),
    }
  }

  pub fn mul(&self, other: &Series) -> Series {
    let (Some(self_val), Some(other_val)) = (self.valuation(), other.valuation()) else {
      return Series::zero();
    };
    let order = min_order(
      self.order.as_ref().map(|o| o + &other_val).as_ref(),
      other.order.as_ref().map(|o| o + &self_val).as_ref(),
    );
    let mut products: BTreeMap<BigRational, Expr> = BTreeMap::new();
    for (e1, c1) in &self.terms {
      for (e2, c2) in &other.terms {
        let e = e1 + e2;
        if order.as_ref().is_some_and(|o| &e >= o) {
          continue;
        }
        let term = Expr::mul(c1.clone(), c2.clone());
        let sum = match products.remove(&e) {
          None => term,
          Some(acc) => Expr::add(acc, term),
        };
        products.insert(e, sum);
      }
    }
    Series::from_raw_terms(products, order)
  }

  /// Termwise derivative with respect to `h`.
  pub fn derivative(&self) -> Series {
    let terms = self.terms.iter()
      .filter(|(e, _)| !e.is_zero())
      .map(|(e, c)| (e - BigRational::one(), Expr::mul(rational_expr(e), c.clone())))
      .collect();
    let order = self.order.as_ref().map(|o| o - BigRational::one());
    Series::from_raw_terms(terms, order)
  }

  /// Termwise antiderivative with respect to `h`, vanishing at
  /// `h = 0`. Fails if the result would contain `log(h)` or would not
  /// vanish at zero.
  pub fn integral(&self) -> Result<Series, SeriesError> {
    let mut terms = BTreeMap::new();
    for (e, c) in &self.terms {
      let raised = e + BigRational::one();
      if !raised.is_positive() {
        return Err(SeriesError::NonPower);
      }
      terms.insert(raised.clone(), Expr::div(c.clone(), rational_expr(&raised)));
    }
    let order = self.order.as_ref().map(|o| o + BigRational::one());
    Ok(Series::from_raw_terms(terms, order))
  }

  /// The series without its constant term.
  pub fn without_constant(&self) -> Series {
    let mut copy = self.clone();
    copy.terms.remove(&BigRational::zero());
    copy
  }

  fn from_raw_terms(terms: BTreeMap<BigRational, Expr>, order: Option<BigRational>) -> Series {
    let terms = terms.into_iter()
      .filter(|(e, _)| order.as_ref().map_or(true, |o| e < o))
      .filter_map(|(e, c)| normalize_coeff(c).map(|c| (e, c)))
      .collect();
    Series { terms, order }
  }
}

fn min_order(a: Option<&BigRational>, b: Option<&BigRational>) -> Option<BigRational> {
  match (a, b) {
    (None, None) => None,
    (Some(a), None) => Some(a.clone()),
    (None, Some(b)) => Some(b.clone()),
    (Some(a), Some(b)) => Some(a.min(b).clone()),
  }
}

fn rational_expr(r: &BigRational) -> Expr {
  Expr::from(Number::from(r.clone()))
}

/// Simplifies a coefficient, returning `None` if it is (numerically)
/// zero.
fn normalize_coeff(c: Expr) -> Option<Expr> {
  let c = simplify(c);
  if c.is_zero() {
    return None;
  }
  let value = eval_constant(&c);
  if value.is_finite() && value.abs() < COEFF_EPSILON {
    return None;
  }
  Some(c)
}

/// The sign of a constant coefficient.
pub fn coeff_sign(c: &Expr) -> Result<Sign, SeriesError> {
  let value = eval_constant(c);
  if value.is_nan() {
    Err(SeriesError::NotReal)
  } else if value > 0.0 {
    Ok(Sign::Positive)
  } else if value < 0.0 {
    Ok(Sign::Negative)
  } else {
    Err(SeriesError::Precision)
  }
}

/// The exact rational value of a constant exponent, if it has one.
/// Float exponents are read through their decimal representation.
fn exponent_rational(alpha: &Expr) -> Option<BigRational> {
  let n = alpha.as_number()?;
  match n.to_rational() {
    Some(r) => Some(r),
    None => Number::from_decimal(n.to_f64()?)?.to_rational(),
  }
}

/// Expands expressions in a variable `x` around `x = point ± h`.
#[derive(Debug, Clone)]
pub struct Expander<'a> {
  var: &'a Var,
  point: Number,
  direction: Direction,
  precision: BigRational,
}

impl<'a> Expander<'a> {
  /// An expander which tracks terms up to (but not including)
  /// `h^precision`.
  pub fn new(var: &'a Var, point: Number, direction: Direction, precision: usize) -> Expander<'a> {
    Expander {
      var,
      point,
      direction,
      precision: BigRational::from_integer(BigInt::from(precision)),
    }
  }

  pub fn expand(&self, expr: &Expr) -> Result<Series, SeriesError> {
    if !expr.contains_var(self.var) {
      return self.constant(expr);
    }
    let series = match expr {
      Expr::Constant(_) => self.constant(expr)?,
      Expr::Variable(_) => {
        // `x` is the only variable left here.
        let mut terms = BTreeMap::new();
        if !self.point.is_zero() {
          terms.insert(BigRational::zero(), Expr::from(self.point.clone()));
        }
        terms.insert(BigRational::one(), Expr::from(self.direction.sign().as_i64()));
        Series { terms, order: None }
      }
      Expr::BinaryOp(op, left, right) => {
        match op {
          BinaryOp::Add => self.expand(left)?.add(&self.expand(right)?),
          BinaryOp::Sub => self.expand(left)?.sub(&self.expand(right)?),
          BinaryOp::Mul => self.expand(left)?.mul(&self.expand(right)?),
          BinaryOp::Div => {
            let numer = self.expand(left)?;
            let denom = self.expand(right)?;
            numer.mul(&self.recip(&denom)?)
          }
          BinaryOp::Pow => {
            if right.contains_var(self.var) {
              // u^v = exp(v * ln(u))
              let log = self.ln(&self.expand(left)?)?;
              let exponent = self.expand(right)?.mul(&log);
              self.exp(&self.cap(exponent))?
            } else {
              self.pow(&self.expand(left)?, &simplify((**right).clone()))?
            }
          }
        }
      }
      Expr::UnaryFunc(func, arg) => {
        let arg = self.expand(arg)?;
        self.apply(*func, &arg)?
      }
    };
    Ok(self.cap(series))
  }

  /// Truncates at the working precision, counted from the leading
  /// term when that term vanishes at the point. Exact series which fit
  /// are left exact.
  fn cap(&self, series: Series) -> Series {
    let limit = self.relative_limit(series.valuation().as_ref());
    let fits = series.order.is_none() && series.terms.keys().all(|e| e < &limit);
    if fits {
      series
    } else {
      series.truncate(&limit)
    }
  }

  /// The truncation order for a series of valuation `val`. A series
  /// which vanishes like `h^v` keeps `precision` more orders than that,
  /// so that `(x - 2)^50` survives until it is divided by `(x - 2)^49`.
  fn relative_limit(&self, val: Option<&BigRational>) -> BigRational {
    match val {
      Some(v) if v.is_positive() => &self.precision + v,
      _ => self.precision.clone(),
    }
  }

  fn constant(&self, expr: &Expr) -> Result<Series, SeriesError> {
    let value = simplify(expr.clone());
    let numeric = eval_constant(&value);
    if numeric.is_nan() {
      Err(SeriesError::NotReal)
    } else if numeric.is_infinite() {
      Err(SeriesError::DivisionByZero)
    } else {
      Ok(Series::constant(value))
    }
  }

  /// Evaluates `func` at a constant, failing if the value is not a
  /// finite real number.
  fn constant_value(&self, func: UnaryFunc, c: &Expr) -> Result<Expr, SeriesError> {
    let value = simplify(Expr::call(func, c.clone()));
    let numeric = eval_constant(&value);
    if numeric.is_finite() {
      Ok(value)
    } else {
      Err(SeriesError::NotReal)
    }
  }

  fn recip(&self, a: &Series) -> Result<Series, SeriesError> {
    if a.is_exact_zero() {
      return Err(SeriesError::DivisionByZero);
    }
    let (k, c) = a.leading_term().ok_or(SeriesError::Precision)?;
    let (k, c) = (k.clone(), c.clone());
    let c_inv = simplify(Expr::div(Expr::one(), c.clone()));
    let rest = self.normalized_rest(a, &k, &c);
    if rest.is_exact_zero() {
      return Ok(Series::monomial(c_inv, - k));
    }
    // 1/(c h^k (1 + R)) = c^-1 h^-k (1 - R + R^2 - ...)
    let target = min_order(rest.order(), Some(&(&self.precision + &k))).ok_or(SeriesError::Precision)?;
    if !target.is_positive() {
      return Err(SeriesError::Precision);
    }
    let geometric = self.power_sum(&rest.neg(), &target, |_| Expr::one())?;
    Ok(geometric.shift(&- k).scale(&c_inv))
  }

  /// Given `a = c h^k + ...`, computes `R` such that
  /// `a = c h^k (1 + R)`.
  fn normalized_rest(&self, a: &Series, k: &BigRational, c: &Expr) -> Series {
    let mut rest = a.clone();
    rest.terms.remove(k);
    let c_inv = Expr::div(Expr::one(), c.clone());
    rest.shift(&- k).scale(&c_inv)
  }

  /// Computes `sum(coeff(j) * base^j)` for as many `j` as are needed
  /// to reach order `target`. `base` must have positive valuation.
  fn power_sum(&self, base: &Series, target: &BigRational, coeff: impl Fn(usize) -> Expr) -> Result<Series, SeriesError> {
    let Some(val) = base.valuation() else {
      return Ok(Series::constant(coeff(0)));
    };
    if !val.is_positive() {
      return Err(SeriesError::Precision);
    }
    let count = (target / &val).ceil().to_integer().to_usize().ok_or(SeriesError::Precision)?;
    if count > MAX_SUM_TERMS {
      return Err(SeriesError::Precision);
    }
    let mut result = Series::zero();
    let mut power = Series::one();
    for j in 0..count.max(1) {
      result = result.add(&power.scale(&coeff(j)));
      power = power.mul(base).truncate(target);
    }
    Ok(result.truncate(target))
  }

  fn pow(&self, a: &Series, alpha: &Expr) -> Result<Series, SeriesError> {
    if let Some(n) = alpha.as_number().and_then(Number::to_i64) {
      return self.powi(a, n);
    }
    if a.is_exact_zero() {
      return match coeff_sign(alpha)? {
        Sign::Positive => Ok(Series::zero()),
        Sign::Negative => Err(SeriesError::DivisionByZero),
      };
    }
    let (k, c) = a.leading_term().ok_or(SeriesError::Precision)?;
    let (k, c) = (k.clone(), c.clone());
    let alpha_rational = exponent_rational(alpha);

    let shift = if k.is_zero() {
      BigRational::zero()
    } else {
      match &alpha_rational {
        Some(r) => &k * r,
        None => return Err(SeriesError::NonPower),
      }
    };

    let leading = match coeff_sign(&c)? {
      Sign::Positive => simplify(Expr::pow(c.clone(), alpha.clone())),
      Sign::Negative => {
        // Real odd roots of negative numbers.
        let Some(r) = alpha_rational.filter(|r| r.denom().is_odd()) else {
          return Err(SeriesError::NotReal);
        };
        let magnitude = simplify(Expr::pow(Expr::neg(c.clone()), alpha.clone()));
        if r.numer().is_odd() {
          simplify(Expr::neg(magnitude))
        } else {
          magnitude
        }
      }
    };

    let rest = self.normalized_rest(a, &k, &c);
    let relative = if shift.is_positive() { self.precision.clone() } else { &self.precision - &shift };
    let target = min_order(rest.order(), Some(&relative)).ok_or(SeriesError::Precision)?;
    if !target.is_positive() {
      return Err(SeriesError::Precision);
    }
    let expansion = self.power_sum(&rest, &target, |j| binomial(alpha, j))?;
    Ok(expansion.shift(&shift).scale(&leading))
  }

  fn powi(&self, a: &Series, n: i64) -> Result<Series, SeriesError> {
    if n < 0 {
      let inverse = self.recip(a)?;
      return self.powi(&inverse, - n);
    }
    let mut result = Series::one();
    let mut base = a.clone();
    let mut n = n;
    while n > 0 {
      if n % 2 == 1 {
        result = self.cap(result.mul(&base));
      }
      n /= 2;
      if n > 0 {
        base = self.cap(base.mul(&base));
      }
    }
    Ok(result)
  }

  /// Splits `a` into its constant term and the rest, which must have
  /// positive valuation. Fails with `NonPower` if `a` is unbounded.
  fn split_constant(&self, a: &Series) -> Result<(Expr, Series), SeriesError> {
    if let Some((e, _)) = a.leading_term() {
      if e.is_negative() {
        return Err(SeriesError::NonPower);
      }
    }
    let c0 = a.coeff(&BigRational::zero()).cloned().unwrap_or_else(Expr::zero);
    Ok((c0, a.without_constant()))
  }

  fn target_for(&self, rest: &Series) -> BigRational {
    min_order(rest.order(), Some(&self.precision)).unwrap_or_else(|| self.precision.clone())
  }

  fn apply(&self, func: UnaryFunc, a: &Series) -> Result<Series, SeriesError> {
    match func {
      UnaryFunc::Neg => Ok(a.neg()),
      UnaryFunc::Exp => self.exp(a),
      UnaryFunc::Ln => self.ln(a),
      UnaryFunc::Sqrt => self.pow(a, &Expr::from(Number::ratio(1, 2))),
      UnaryFunc::Sin => Ok(self.sin_cos(a, false)?.0),
      UnaryFunc::Cos => Ok(self.sin_cos(a, false)?.1),
      UnaryFunc::Sinh => Ok(self.sin_cos(a, true)?.0),
      UnaryFunc::Cosh => Ok(self.sin_cos(a, true)?.1),
      UnaryFunc::Tan => {
        let (sin, cos) = self.sin_cos(a, false)?;
        Ok(self.cap(sin.mul(&self.recip(&cos)?)))
      }
      UnaryFunc::Cot => {
        let (sin, cos) = self.sin_cos(a, false)?;
        Ok(self.cap(cos.mul(&self.recip(&sin)?)))
      }
      UnaryFunc::Sec => self.recip(&self.sin_cos(a, false)?.1),
      UnaryFunc::Csc => self.recip(&self.sin_cos(a, false)?.0),
      UnaryFunc::Tanh => {
        let (sinh, cosh) = self.sin_cos(a, true)?;
        Ok(self.cap(sinh.mul(&self.recip(&cosh)?)))
      }
      UnaryFunc::Atan => self.atan(a),
      UnaryFunc::Asin | UnaryFunc::Acos => self.asin_acos(func, a),
      UnaryFunc::Abs => {
        if a.is_exact_zero() {
          return Ok(Series::zero());
        }
        let (_, c) = a.leading_term().ok_or(SeriesError::Precision)?;
        match coeff_sign(c)? {
          Sign::Positive => Ok(a.clone()),
          Sign::Negative => Ok(a.neg()),
        }
      }
      UnaryFunc::Sign => {
        if a.is_exact_zero() {
          return Ok(Series::zero());
        }
        let (_, c) = a.leading_term().ok_or(SeriesError::Precision)?;
        Ok(Series::constant(Expr::from(coeff_sign(c)?.as_i64())))
      }
    }
  }

  fn exp(&self, a: &Series) -> Result<Series, SeriesError> {
    if let Some((e, c)) = a.leading_term() {
      if e.is_negative() {
        // exp(-inf) vanishes faster than any power of h.
        return match coeff_sign(c)? {
          Sign::Negative => Ok(Series::zero()),
          Sign::Positive => Err(SeriesError::NonPower),
        };
      }
    }
    let (c0, rest) = self.split_constant(a)?;
    let target = self.target_for(&rest);
    let sum = self.power_sum(&rest, &target, inverse_factorial)?;
    Ok(sum.scale(&self.constant_value(UnaryFunc::Exp, &c0)?))
  }

  fn ln(&self, a: &Series) -> Result<Series, SeriesError> {
    if a.is_exact_zero() {
      return Err(SeriesError::NotReal);
    }
    let (k, c) = a.leading_term().ok_or(SeriesError::Precision)?;
    if coeff_sign(c)? == Sign::Negative {
      return Err(SeriesError::NotReal);
    }
    if !k.is_zero() {
      // log(h) or log(1/h)
      return Err(SeriesError::NonPower);
    }
    let c0 = c.clone();
    let rest = a.without_constant().scale(&Expr::div(Expr::one(), c0.clone()));
    let target = self.target_for(&rest);
    // ln(1 + u) = u - u^2/2 + u^3/3 - ...
    let sum = self.power_sum(&rest, &target, |j| {
      match j {
        0 => Expr::zero(),
        j if j % 2 == 1 => Expr::from(Number::ratio(1, j as i64)),
        j => Expr::from(Number::ratio(-1, j as i64)),
      }
    })?;
    Ok(sum.add(&Series::constant(self.constant_value(UnaryFunc::Ln, &c0)?)))
  }

  /// Both `(sin(a), cos(a))`, or `(sinh(a), cosh(a))` if `hyperbolic`.
  fn sin_cos(&self, a: &Series, hyperbolic: bool) -> Result<(Series, Series), SeriesError> {
    let (c0, rest) = self.split_constant(a)?;
    let target = self.target_for(&rest);
    let alternating = |j: usize| {
      let f = inverse_factorial(j);
      if !hyperbolic && (j / 2) % 2 == 1 { Expr::neg(f) } else { f }
    };
    let odd = self.power_sum(&rest, &target, |j| if j % 2 == 1 { alternating(j) } else { Expr::zero() })?;
    let even = self.power_sum(&rest, &target, |j| if j % 2 == 0 { alternating(j) } else { Expr::zero() })?;

    let (sin_f, cos_f) = if hyperbolic {
      (UnaryFunc::Sinh, UnaryFunc::Cosh)
    } else {
      (UnaryFunc::Sin, UnaryFunc::Cos)
    };
    let sin_c0 = self.constant_value(sin_f, &c0)?;
    let cos_c0 = self.constant_value(cos_f, &c0)?;

    // sin(c0 + u) = sin(c0) cos(u) + cos(c0) sin(u)
    // cos(c0 + u) = cos(c0) cos(u) - sin(c0) sin(u)
    // and the same for the hyperbolic functions, with + in both.
    let sin = even.scale(&sin_c0).add(&odd.scale(&cos_c0));
    let cos_tail = odd.scale(&sin_c0);
    let cos_tail = if hyperbolic { cos_tail } else { cos_tail.neg() };
    let cos = even.scale(&cos_c0).add(&cos_tail);
    Ok((sin, cos))
  }

  fn atan(&self, a: &Series) -> Result<Series, SeriesError> {
    if let Some((e, c)) = a.leading_term() {
      if e.is_negative() {
        // atan(A) = ±pi/2 - atan(1/A) for large A
        let sign = coeff_sign(c)?;
        let half_pi = Expr::div(Expr::pi(), Expr::from(2));
        let half_pi = Series::constant(Expr::mul(Expr::from(sign.as_i64()), half_pi));
        let inverse = self.atan(&self.recip(a)?)?;
        return Ok(half_pi.sub(&inverse));
      }
    }
    let (c0, _) = self.split_constant(a)?;
    // atan(a)' = a' / (1 + a^2)
    let denom = Series::one().add(&self.cap(a.mul(a)));
    let integrand = self.cap(a.derivative().mul(&self.recip(&denom)?));
    let integral = integrand.integral()?;
    Ok(integral.add(&Series::constant(self.constant_value(UnaryFunc::Atan, &c0)?)))
  }

  fn asin_acos(&self, func: UnaryFunc, a: &Series) -> Result<Series, SeriesError> {
    let (c0, rest) = self.split_constant(a)?;
    let value = self.constant_value(func, &c0)?;
    if rest.is_exact_zero() {
      return Ok(Series::constant(value));
    }
    // asin(a)' = a' / sqrt(1 - a^2), and acos' = - asin'
    let radicand = Series::one().sub(&self.cap(a.mul(a)));
    let root = self.pow(&radicand, &Expr::from(Number::ratio(-1, 2)))?;
    let integral = self.cap(a.derivative().mul(&root)).integral()?;
    let integral = if func == UnaryFunc::Acos { integral.neg() } else { integral };
    Ok(integral.add(&Series::constant(value)))
  }
}

/// `1/j!`
fn inverse_factorial(j: usize) -> Expr {
  let factorial: BigInt = (1..=j).map(BigInt::from).product();
  Expr::from(Number::from(BigRational::new(BigInt::one(), factorial)))
}

/// The generalized binomial coefficient `binom(alpha, j)`.
fn binomial(alpha: &Expr, j: usize) -> Expr {
  let numer = (0..j)
    .map(|i| Expr::sub(alpha.clone(), Expr::from(i as i64)))
    .fold(Expr::one(), Expr::mul);
  simplify(Expr::mul(numer, inverse_factorial(j)))
}
