use crate::graphics::{Figure, LineSeries, LineStyle, Marker, SampleGrid, colors};
use crate::pipeline::Pipeline;
use crate::util::point::Point2D;

/// The tangent line to a function at `x = a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent {
  pub a: f64,
  /// `f(a)`
  pub value: f64,
  /// `f'(a)`
  pub slope: f64,
}

impl Tangent {
  pub fn at(pipeline: &Pipeline, a: f64) -> Tangent {
    Tangent {
      a,
      value: pipeline.function().eval(a),
      slope: pipeline.derivative().eval(a),
    }
  }

  /// `f(a) + f'(a) * (x - a)`
  pub fn eval(&self, x: f64) -> f64 {
    self.value + self.slope * (x - self.a)
  }

  pub fn point(&self) -> Point2D {
    Point2D::new(self.a, self.value)
  }

  pub fn label(&self) -> String {
    format!("Tangent at x={:.2}", self.a)
  }

  /// The function plotted alongside its tangent line, with the point
  /// of tangency marked.
  pub fn figure(&self, pipeline: &Pipeline, grid: &SampleGrid) -> Figure {
    let mut figure = Figure::new(format!("Function and Tangent at x = {:.2}", self.a), grid.min()..grid.max())
      .with_series(LineSeries::from_function("f(x)", grid, pipeline.function()))
      .with_series(
        LineSeries::from_fn(self.label(), grid, |x| self.eval(x))
          .with_style(LineStyle::Dashed)
          .with_color(colors::TANGENT),
      )
      .with_marker(Marker::new(self.point()));
    figure.y_label = String::from("f(x)");
    figure
  }

  /// Markdown lines describing the derivative and its value at `a`.
  pub fn describe(&self, pipeline: &Pipeline) -> Vec<String> {
    vec![
      format!("**f'(x)** = `{}`", pipeline.derivative_expr()),
      format!("**f'({:.2})** = `{:.4}`", self.a, self.slope),
    ]
  }
}
