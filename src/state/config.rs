//! Per-session configuration: everything the user can change on the
//! page.

use crate::page::content::PROBLEMS;

use serde::{Serialize, Deserialize};

pub const SOLUTION_COUNT: usize = PROBLEMS.len();

/// A numeric input with a fixed range, snapped to a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
  pub min: f64,
  pub max: f64,
  pub default: f64,
  /// Number of steps per unit. A value of 10 means a step of 0.1.
  pub steps_per_unit: u32,
}

/// The state of the page controls. Derived results are never stored
/// here; they are recomputed from this on every rerun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
  function: String,
  tangent_x: f64,
  limit_x: f64,
  revealed: [bool; SOLUTION_COUNT],
}

impl Slider {
  pub const X_VALUE: Slider = Slider { min: -10.0, max: 10.0, default: 1.0, steps_per_unit: 10 };

  /// Clamps `value` into range and rounds it to the nearest step.
  /// NaN becomes the default.
  pub fn snap(&self, value: f64) -> f64 {
    if value.is_nan() {
      return self.default;
    }
    let scale = f64::from(self.steps_per_unit);
    let value = value.clamp(self.min, self.max);
    // Dividing an integral tick count produces the same f64 as
    // parsing the decimal literal, so 0.3 comes out as 0.3.
    (value * scale).round() / scale
  }
}

impl SessionConfig {
  pub const DEFAULT_FUNCTION: &'static str = "sin(x)";

  pub fn new(function: impl Into<String>, tangent_x: f64, limit_x: f64) -> Self {
    let mut config = Self::default();
    config.set_function(function);
    config.set_tangent_x(tangent_x);
    config.set_limit_x(limit_x);
    config
  }

  pub fn function(&self) -> &str {
    &self.function
  }

  pub fn tangent_x(&self) -> f64 {
    self.tangent_x
  }

  pub fn limit_x(&self) -> f64 {
    self.limit_x
  }

  pub fn set_function(&mut self, function: impl Into<String>) {
    self.function = function.into();
  }

  pub fn set_tangent_x(&mut self, value: f64) {
    self.tangent_x = Slider::X_VALUE.snap(value);
  }

  pub fn set_limit_x(&mut self, value: f64) {
    self.limit_x = Slider::X_VALUE.snap(value);
  }

  pub fn is_revealed(&self, index: usize) -> bool {
    self.revealed.get(index).copied().unwrap_or(false)
  }

  /// Marks the solution to problem `index` (zero-based) as revealed.
  /// Returns false if there is no such problem.
  pub fn reveal(&mut self, index: usize) -> bool {
    match self.revealed.get_mut(index) {
      Some(flag) => {
        *flag = true;
        true
      }
      None => false,
    }
  }

  pub fn hide_solutions(&mut self) {
    self.revealed = [false; SOLUTION_COUNT];
  }
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      function: String::from(Self::DEFAULT_FUNCTION),
      tangent_x: Slider::X_VALUE.default,
      limit_x: Slider::X_VALUE.default,
      revealed: [false; SOLUTION_COUNT],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.function(), "sin(x)");
    assert_eq!(config.tangent_x(), 1.0);
    assert_eq!(config.limit_x(), 1.0);
    assert!((0..SOLUTION_COUNT).all(|i| !config.is_revealed(i)));
  }

  #[test]
  fn test_slider_snaps_to_step() {
    let slider = Slider::X_VALUE;
    assert_eq!(slider.snap(0.3), 0.3);
    assert_eq!(slider.snap(0.1 + 0.2), 0.3);
    assert_eq!(slider.snap(2.46), 2.5);
    assert_eq!(slider.snap(-1.04), -1.0);
  }

  #[test]
  fn test_slider_clamps() {
    let slider = Slider::X_VALUE;
    assert_eq!(slider.snap(11.0), 10.0);
    assert_eq!(slider.snap(-250.0), -10.0);
    assert_eq!(slider.snap(f64::INFINITY), 10.0);
    assert_eq!(slider.snap(f64::NAN), 1.0);
  }

  #[test]
  fn test_reveal() {
    let mut config = SessionConfig::default();
    assert!(config.reveal(2));
    assert!(config.is_revealed(2));
    assert!(!config.is_revealed(1));
    assert!(!config.reveal(SOLUTION_COUNT));
    assert!(!config.is_revealed(SOLUTION_COUNT));
    config.hide_solutions();
    assert!(!config.is_revealed(2));
  }

  #[test]
  fn test_new_snaps_sliders() {
    let config = SessionConfig::new("x^2", 3.14159, 42.0);
    assert_eq!(config.function(), "x^2");
    assert_eq!(config.tangent_x(), 3.1);
    assert_eq!(config.limit_x(), 10.0);
  }
}
