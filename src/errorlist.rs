//! Accumulating several recoverable errors so they can be reported
//! together.

use itertools::Itertools;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::slice;
use std::vec;

/// A non-failing collector of errors. Validation code pushes each
/// problem as it finds it and converts to a `Result` at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorList<E> {
  errors: Vec<E>,
}

impl<E> ErrorList<E> {
  pub fn new() -> Self {
    Self { errors: Vec::new() }
  }

  pub fn push(&mut self, error: E) {
    self.errors.push(error);
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn iter(&self) -> slice::Iter<'_, E> {
    self.errors.iter()
  }

  /// Unwraps `result`, recording its error (converted into `E`) on
  /// failure.
  pub fn check<T, F: Into<E>>(&mut self, result: Result<T, F>) -> Option<T> {
    result.map_err(|err| self.push(err.into())).ok()
  }

  pub fn into_result<T>(self, value: T) -> Result<T, Self> {
    if self.errors.is_empty() { Ok(value) } else { Err(self) }
  }

  pub fn into_vec(self) -> Vec<E> {
    self.errors
  }
}

impl<E> Default for ErrorList<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Display> Display for ErrorList<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.errors.iter().join("; "))
  }
}

impl<E: StdError> StdError for ErrorList<E> {}

impl<E> IntoIterator for ErrorList<E> {
  type Item = E;
  type IntoIter = vec::IntoIter<E>;

  fn into_iter(self) -> Self::IntoIter {
    self.errors.into_iter()
  }
}

impl<E> FromIterator<E> for ErrorList<E> {
  fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
    Self { errors: iter.into_iter().collect() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn list(errors: &[&str]) -> ErrorList<String> {
    errors.iter().map(|e| e.to_string()).collect()
  }

  #[test]
  fn test_into_result() {
    assert_eq!(list(&[]).into_result(3), Ok(3));
    assert_eq!(list(&["a"]).into_result(3), Err(list(&["a"])));
  }

  #[test]
  fn test_check_converts_errors() {
    let mut errors: ErrorList<String> = ErrorList::new();
    assert_eq!(errors.check(Ok::<_, &str>(1)), Some(1));
    assert_eq!(errors.check(Err::<i32, _>("bad")), None);
    assert_eq!(errors.into_vec(), vec![String::from("bad")]);
  }

  #[test]
  fn test_display_joins_errors() {
    assert_eq!(list(&["first", "second"]).to_string(), "first; second");
    assert_eq!(list(&[]).to_string(), "");
  }
}
