//! Support for plotting and graphical output.
//!
//! Nothing in this module draws anything. A [`Figure`] is a
//! serializable description of a plot, which the frontend renders.

pub mod dataset;
pub mod figure;
pub mod plot;

pub use dataset::SampleGrid;
pub use figure::{Figure, Marker};
pub use plot::{LineSeries, LineStyle};

/// Colors used for the standard curves on the page.
pub mod colors {
  pub const FUNCTION: &str = "blue";
  pub const DERIVATIVE: &str = "green";
  pub const TANGENT: &str = "red";
  pub const SECANT: &str = "orange";
  pub const MARKER: &str = "black";
}
