//! Structs for manipulating points in 2D space.

use serde::{Serialize, Deserialize, Serializer, Deserializer};

use std::fmt::{self, Display, Formatter};

/// A point on a plotted curve. The `y` coordinate may be non-finite
/// (NaN or infinite) where the function is undefined; such values
/// serialize as `null` and are drawn as gaps.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
  pub x: f64,
  #[serde(serialize_with = "serialize_finite_or_null", deserialize_with = "deserialize_finite_or_null")]
  pub y: f64,
}

impl Point2D {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }
}

impl Display for Point2D {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

fn serialize_finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
  if value.is_finite() {
    serializer.serialize_some(value)
  } else {
    serializer.serialize_none()
  }
}

fn deserialize_finite_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
  let value = Option::<f64>::deserialize(deserializer)?;
  Ok(value.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serialize_finite_point() {
    let json = serde_json::to_string(&Point2D::new(1.5, -2.0)).unwrap();
    assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
  }

  #[test]
  fn test_serialize_gap() {
    let json = serde_json::to_string(&Point2D::new(0.0, f64::NAN)).unwrap();
    assert_eq!(json, r#"{"x":0.0,"y":null}"#);
    let json = serde_json::to_string(&Point2D::new(0.0, f64::INFINITY)).unwrap();
    assert_eq!(json, r#"{"x":0.0,"y":null}"#);
  }

  #[test]
  fn test_deserialize_gap() {
    let point: Point2D = serde_json::from_str(r#"{"x":2.0,"y":null}"#).unwrap();
    assert_eq!(point.x, 2.0);
    assert!(point.y.is_nan());
    assert!(!point.is_finite());
  }
}
