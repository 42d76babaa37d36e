//! A complete plot, as sent to the frontend.

use crate::util::point::Point2D;
use super::plot::LineSeries;

use serde::{Serialize, Deserialize};

use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
  pub title: String,
  pub x_label: String,
  pub y_label: String,
  pub x_bounds: Range<f64>,
  pub series: Vec<LineSeries>,
  pub markers: Vec<Marker>,
  pub grid: bool,
}

/// A single highlighted point, drawn as a scatter marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
  pub label: Option<String>,
  pub color: String,
  pub position: Point2D,
}

impl Figure {
  /// An empty figure with the standard `x` and `y` axis labels and
  /// grid lines enabled.
  pub fn new(title: impl Into<String>, x_bounds: Range<f64>) -> Self {
    Self {
      title: title.into(),
      x_label: String::from("x"),
      y_label: String::from("y"),
      x_bounds,
      series: Vec::new(),
      markers: Vec::new(),
      grid: true,
    }
  }

  pub fn with_series(mut self, series: LineSeries) -> Self {
    self.series.push(series);
    self
  }

  pub fn with_marker(mut self, marker: Marker) -> Self {
    self.markers.push(marker);
    self
  }

  pub fn find_series(&self, label: &str) -> Option<&LineSeries> {
    self.series.iter().find(|s| s.label == label)
  }
}

impl Marker {
  pub fn new(position: Point2D) -> Self {
    Self { label: None, color: String::from(super::colors::MARKER), position }
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.color = color.into();
    self
  }
}
