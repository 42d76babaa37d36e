//! The secant-to-tangent animation.
//!
//! Frames are computed up front by [`secant_frames`] and then played
//! back into a [`FrameSink`] by [`play_animation`], which is the only
//! place where the per-frame delay happens.

use crate::graphics::{Figure, LineSeries, LineStyle, Marker, SampleGrid, colors};
use crate::pipeline::Pipeline;
use crate::util::linspace;
use crate::util::point::Point2D;

use serde::{Serialize, Deserialize};
use tracing::debug;

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

pub const FRAME_COUNT: usize = 20;
pub const H_START: f64 = 1.0;
pub const H_END: f64 = 0.01;
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(200);

/// The secant line through `(a, f(a))` and `(a + h, f(a + h))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Secant {
  pub a: f64,
  pub h: f64,
  pub y0: f64,
  pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecantFrame {
  pub index: usize,
  pub h: f64,
  pub slope: f64,
  pub figure: Figure,
}

/// A consumer of animation frames.
pub trait FrameSink {
  type Error;

  fn send_frame(&mut self, frame: &SecantFrame) -> Result<(), Self::Error>;
}

impl Secant {
  pub fn new(pipeline: &Pipeline, a: f64, h: f64) -> Secant {
    let f = pipeline.function();
    Secant { a, h, y0: f.eval(a), y1: f.eval(a + h) }
  }

  /// `(f(a + h) - f(a)) / h`
  pub fn slope(&self) -> f64 {
    (self.y1 - self.y0) / self.h
  }

  pub fn eval(&self, x: f64) -> f64 {
    self.slope() * (x - self.a) + self.y0
  }

  pub fn label(&self) -> String {
    format!("Secant h={:.4}", self.h)
  }

  pub fn figure(&self, pipeline: &Pipeline, grid: &SampleGrid) -> Figure {
    Figure::new(format!("Secant \u{2192} Tangent at x={:.2}", self.a), grid.min()..grid.max())
      .with_series(LineSeries::from_function("f(x)", grid, pipeline.function()))
      .with_series(
        LineSeries::from_fn(self.label(), grid, |x| self.eval(x))
          .with_style(LineStyle::Dashed)
          .with_color(colors::SECANT),
      )
      .with_marker(Marker::new(Point2D::new(self.a, self.y0)))
      .with_marker(Marker::new(Point2D::new(self.a + self.h, self.y1)))
  }
}

/// The values of `h` used by the animation, shrinking from 1 to 0.01.
pub fn h_values() -> Vec<f64> {
  linspace(H_START, H_END, FRAME_COUNT)
}

pub fn secant_frames(pipeline: &Pipeline, grid: &SampleGrid, a: f64) -> Vec<SecantFrame> {
  h_values().into_iter().enumerate().map(|(index, h)| {
    let secant = Secant::new(pipeline, a, h);
    SecantFrame { index, h, slope: secant.slope(), figure: secant.figure(pipeline, grid) }
  }).collect()
}

/// Sends each frame to `sink`, waiting `delay` between consecutive
/// frames. Stops at the first error from the sink.
pub fn play_animation<S>(frames: &[SecantFrame], sink: &mut S, delay: Duration) -> Result<(), S::Error>
where S: FrameSink + ?Sized {
  for frame in frames {
    if frame.index > 0 && !delay.is_zero() {
      thread::sleep(delay);
    }
    debug!(index = frame.index, h = frame.h, slope = frame.slope, "sending animation frame");
    sink.send_frame(frame)?;
  }
  Ok(())
}

impl FrameSink for Vec<SecantFrame> {
  type Error = Infallible;

  fn send_frame(&mut self, frame: &SecantFrame) -> Result<(), Infallible> {
    self.push(frame.clone());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  fn slope_errors(source: &str, a: f64) -> Vec<f64> {
    let pipeline = Pipeline::from_source(source).unwrap();
    let exact = pipeline.derivative().eval(a);
    secant_frames(&pipeline, &SampleGrid::default(), a)
      .into_iter()
      .map(|frame| (frame.slope - exact).abs())
      .collect()
  }

  #[test]
  fn test_h_values() {
    let hs = h_values();
    assert_eq!(hs.len(), 20);
    assert_eq!(hs[0], 1.0);
    assert_eq!(hs[19], 0.01);
  }

  #[test]
  fn test_secant_slope() {
    let pipeline = Pipeline::from_source("x^2").unwrap();
    let secant = Secant::new(&pipeline, 1.0, 0.5);
    assert_abs_diff_eq!(secant.slope(), 2.5, epsilon = 1e-12);
    assert_eq!(secant.eval(1.0), 1.0);
    assert_abs_diff_eq!(secant.eval(1.5), 2.25, epsilon = 1e-12);
    assert_eq!(secant.label(), "Secant h=0.5000");
  }

  #[test]
  fn test_slopes_converge_monotonically() {
    for (source, a) in [("x^2", 1.0), ("sin(x)", 1.0), ("exp(x)", 0.0), ("x^3 - x", 0.5)] {
      let errors = slope_errors(source, a);
      assert_eq!(errors.len(), FRAME_COUNT);
      assert!(errors.windows(2).all(|w| w[1] < w[0]), "{source}: {errors:?}");
      assert!(errors[FRAME_COUNT - 1] < 0.05, "{source}: {errors:?}");
    }
  }

  #[test]
  fn test_frame_contents() {
    let pipeline = Pipeline::from_source("x^2").unwrap();
    let frames = secant_frames(&pipeline, &SampleGrid::default(), 1.0);
    let first = &frames[0];
    assert_eq!(first.figure.title, "Secant \u{2192} Tangent at x=1.00");
    assert!(first.figure.find_series("Secant h=1.0000").is_some());
    assert_eq!(first.figure.markers[1].position, Point2D::new(2.0, 4.0));
    assert_eq!(frames[19].figure.series[1].label, "Secant h=0.0100");
  }

  #[test]
  fn test_play_animation() {
    let pipeline = Pipeline::from_source("x^2").unwrap();
    let frames = secant_frames(&pipeline, &SampleGrid::interval(-1.0, 1.0, 5), 0.0);
    let mut sink: Vec<SecantFrame> = Vec::new();
    play_animation(&frames, &mut sink, Duration::ZERO).unwrap();
    assert_eq!(sink, frames);
  }

  #[test]
  fn test_play_animation_stops_on_error() {
    struct FailAfter(usize);

    impl FrameSink for FailAfter {
      type Error = String;

      fn send_frame(&mut self, frame: &SecantFrame) -> Result<(), String> {
        if frame.index >= self.0 { Err(format!("failed at {}", frame.index)) } else { Ok(()) }
      }
    }

    let pipeline = Pipeline::from_source("x").unwrap();
    let frames = secant_frames(&pipeline, &SampleGrid::interval(-1.0, 1.0, 2), 0.0);
    let err = play_animation(&frames, &mut FailAfter(3), Duration::ZERO).unwrap_err();
    assert_eq!(err, "failed at 3");
  }
}
