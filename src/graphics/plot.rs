//! Functionality for producing two-dimensional plots of data.

use crate::util::point::Point2D;
use crate::expr::eval::CompiledFunction;
use super::dataset::{SampleGrid, LengthError};

use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
  #[default]
  Solid,
  Dashed,
}

/// A single curve on a figure. Points whose `y` value is not finite
/// are kept, and serialize as gaps in the curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
  pub label: String,
  pub style: LineStyle,
  pub color: String,
  pub points: Vec<Point2D>,
}

impl LineSeries {
  pub fn from_points(label: impl Into<String>, grid: &SampleGrid, y_points: &[f64]) -> Result<LineSeries, LengthError> {
    grid.check_len(y_points.len())?;
    let points = grid.points().iter().zip(y_points).map(|(x, y)| Point2D::new(*x, *y)).collect();
    Ok(LineSeries {
      label: label.into(),
      style: LineStyle::default(),
      color: String::from(super::colors::FUNCTION),
      points,
    })
  }

  pub fn from_function(label: impl Into<String>, grid: &SampleGrid, function: &CompiledFunction) -> LineSeries {
    Self::from_fn(label, grid, |x| function.eval(x))
  }

  /// Samples an arbitrary closure on the grid. Used for overlays,
  /// such as tangent and secant lines, which are not expressions.
  pub fn from_fn<F>(label: impl Into<String>, grid: &SampleGrid, f: F) -> LineSeries
  where F: Fn(f64) -> f64 {
    let points = grid.points().iter().map(|x| Point2D::new(*x, f(*x))).collect();
    LineSeries {
      label: label.into(),
      style: LineStyle::default(),
      color: String::from(super::colors::FUNCTION),
      points,
    }
  }

  pub fn with_style(mut self, style: LineStyle) -> Self {
    self.style = style;
    self
  }

  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.color = color.into();
    self
  }

  pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
    self.points.iter().map(|p| p.y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::parser::parse_function;
  use crate::expr::var::Var;

  #[test]
  fn test_from_function() {
    let grid = SampleGrid::interval(-1.0, 1.0, 3);
    let f = CompiledFunction::vectorize(parse_function("1/x").unwrap(), Var::x()).unwrap();
    let series = LineSeries::from_function("f(x)", &grid, &f);
    assert_eq!(series.points, vec![
      Point2D::new(-1.0, -1.0),
      Point2D::new(0.0, f64::INFINITY),
      Point2D::new(1.0, 1.0),
    ]);
    assert_eq!(series.style, LineStyle::Solid);
  }

  #[test]
  fn test_serialized_gaps() {
    let grid = SampleGrid::interval(-1.0, 1.0, 3);
    let series = LineSeries::from_points("g", &grid, &[1.0, f64::NAN, 2.0]).unwrap()
      .with_style(LineStyle::Dashed)
      .with_color("red");
    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(json["style"], "dashed");
    assert_eq!(json["color"], "red");
    assert!(json["points"][1]["y"].is_null());
    assert_eq!(json["points"][2]["y"], 2.0);
  }

  #[test]
  fn test_from_points_length_mismatch() {
    let grid = SampleGrid::interval(-1.0, 1.0, 3);
    assert!(LineSeries::from_points("g", &grid, &[1.0]).is_err());
  }
}
