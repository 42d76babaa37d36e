//! Structures for generating points for a graph.

use crate::util::linspace;

use thiserror::Error;

/// The x values at which every curve on a figure is sampled.
///
/// A grid is an interval `[min, max]` split into a fixed number of
/// evenly spaced points. Both bounds are included, except in corner
/// cases where the grid has fewer than 2 points.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
  min: f64,
  max: f64,
  points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Data set length mismatch (expected {expected}, got {actual})")]
pub struct LengthError {
  expected: usize,
  actual: usize,
}

impl SampleGrid {
  pub const DEFAULT_MIN: f64 = -10.0;
  pub const DEFAULT_MAX: f64 = 10.0;
  pub const DEFAULT_POINTS: usize = 400;

  /// An interval grid of `len` points from `min` to `max`.
  ///
  /// Panics if `min > max`.
  pub fn interval(min: f64, max: f64, len: usize) -> Self {
    assert!(min <= max, "Invalid interval ({min} .. {max})");
    Self { min, max, points: linspace(min, max, len) }
  }

  pub fn min(&self) -> f64 {
    self.min
  }

  pub fn max(&self) -> f64 {
    self.max
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn points(&self) -> &[f64] {
    &self.points
  }

  /// Checks that a set of y values lines up with this grid.
  pub fn check_len(&self, actual: usize) -> Result<(), LengthError> {
    if actual == self.len() {
      Ok(())
    } else {
      Err(LengthError { expected: self.len(), actual })
    }
  }
}

impl Default for SampleGrid {
  /// 400 points over `[-10, 10]`.
  fn default() -> Self {
    Self::interval(Self::DEFAULT_MIN, Self::DEFAULT_MAX, Self::DEFAULT_POINTS)
  }
}
