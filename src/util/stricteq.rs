//! Equality that also distinguishes exact values from approximate
//! ones, so that `2` and `2.0` compare unequal.

use std::fmt::{self, Debug, Formatter};

/// A refinement of `PartialEq`: `a.strict_eq(b)` implies `a == b`,
/// but not the other way around.
pub trait StrictEq: PartialEq {
  fn strict_eq(&self, other: &Self) -> bool;

  fn strict_ne(&self, other: &Self) -> bool {
    !self.strict_eq(other)
  }
}

/// Borrowed wrapper whose `==` is [`StrictEq::strict_eq`]. Prints
/// exactly like the wrapped value.
pub struct Strict<'a, T>(pub &'a T);

impl<T: StrictEq> PartialEq for Strict<'_, T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.strict_eq(other.0)
  }
}

impl<T: Debug> Debug for Strict<'_, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self.0, f)
  }
}

impl<T: StrictEq> StrictEq for Option<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Some(a), Some(b)) => a.strict_eq(b),
      (None, None) => true,
      _ => false,
    }
  }
}

impl<T: StrictEq> StrictEq for Vec<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
  }
}

/// `assert_eq!`, but using [`StrictEq`].
#[macro_export]
macro_rules! assert_strict_eq {
  ($left:expr, $right:expr $(,)?) => {
    assert_eq!($crate::util::stricteq::Strict(&$left), $crate::util::stricteq::Strict(&$right))
  };
}

/// `assert_ne!`, but using [`StrictEq`].
#[macro_export]
macro_rules! assert_strict_ne {
  ($left:expr, $right:expr $(,)?) => {
    assert_ne!($crate::util::stricteq::Strict(&$left), $crate::util::stricteq::Strict(&$right))
  };
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::number::Number;

  #[test]
  fn test_option_and_vec() {
    assert!(Some(Number::from(2)).strict_eq(&Some(Number::from(2))));
    assert!(Some(Number::from(2)).strict_ne(&Some(Number::from(2.0))));
    assert!(None::<Number>.strict_eq(&None));
    assert!(vec![Number::from(1), Number::ratio(1, 2)].strict_ne(&vec![Number::from(1)]));
  }

  #[test]
  fn test_debug_is_transparent() {
    assert_eq!(format!("{:?}", Strict(&3)), "3");
  }
}
