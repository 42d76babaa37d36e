//! Small helpers shared across the crate.

pub mod point;
pub mod stricteq;

use std::ops::{Mul, Neg};

/// Which side of zero a nonzero value lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
  Negative,
  Positive,
}

impl Sign {
  /// `-1` or `+1`.
  pub fn as_i64(self) -> i64 {
    match self {
      Sign::Negative => -1,
      Sign::Positive => 1,
    }
  }
}

/// Signs multiply like `-1` and `+1`.
impl Mul for Sign {
  type Output = Sign;

  fn mul(self, other: Sign) -> Sign {
    if self == other { Sign::Positive } else { Sign::Negative }
  }
}

impl Neg for Sign {
  type Output = Sign;

  fn neg(self) -> Sign {
    match self {
      Sign::Negative => Sign::Positive,
      Sign::Positive => Sign::Negative,
    }
  }
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
/// `start > end` gives a descending sequence.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
  if n < 2 {
    return vec![start; n];
  }
  let step = (end - start) / (n - 1) as f64;
  // The last value is pinned so that rounding never overshoots `end`.
  (0..n).map(|i| if i + 1 == n { end } else { start + step * i as f64 }).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  #[test]
  fn test_sign() {
    assert_eq!(Sign::Negative.as_i64(), -1);
    assert!(Sign::Negative < Sign::Positive);
  }

  #[test]
  fn test_sign_arithmetic() {
    assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
    assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
    assert_eq!(Sign::Positive * Sign::Positive, Sign::Positive);
    assert_eq!(-Sign::Negative, Sign::Positive);
    assert_eq!(-Sign::Positive, Sign::Negative);
  }

  #[test]
  fn test_linspace_ascending() {
    let v = linspace(-10.0, 10.0, 400);
    assert_eq!(v.len(), 400);
    assert_eq!(v[0], -10.0);
    assert_eq!(v[399], 10.0);
    assert_abs_diff_eq!(v[1] - v[0], 20.0 / 399.0, epsilon = 1e-12);
  }

  #[test]
  fn test_linspace_descending() {
    let v = linspace(1.0, 0.01, 20);
    assert_eq!(v.len(), 20);
    assert_eq!(v[19], 0.01);
    assert!(v.windows(2).all(|w| w[0] > w[1]));
  }

  #[test]
  fn test_linspace_short() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
  }
}
