//! The expression pipeline: everything derived from the user's
//! function text on a single rerun.

use crate::expr::Expr;
use crate::expr::calculus::{DifferentiationFailure, LimitError, LimitPair, differentiate, evaluate_limit};
use crate::expr::eval::{CompiledFunction, EvaluationError};
use crate::expr::parser::{ParseError, parse_function};
use crate::expr::var::Var;

use thiserror::Error;
use tracing::{debug, info};

/// A parsed function together with its derivative, both ready for
/// evaluation. Built fresh from the source text on every rerun.
#[derive(Debug, Clone)]
pub struct Pipeline {
  source: String,
  function: CompiledFunction,
  derivative: CompiledFunction,
}

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  Evaluation(#[from] EvaluationError),
  #[error("{0}")]
  Differentiation(#[from] DifferentiationFailure),
}

impl Pipeline {
  /// Parses `source` as a function of `x`, vectorizes it, and
  /// computes its derivative.
  pub fn from_source(source: &str) -> Result<Pipeline, PipelineError> {
    let var = Var::x();
    let expr = parse_function(source)?;
    debug!(source, expr = %expr, "parsed function");
    let function = CompiledFunction::vectorize(expr.clone(), var.clone())?;
    let derivative = differentiate(expr, var.clone())?;
    debug!(derivative = %derivative, "differentiated function");
    let derivative = CompiledFunction::vectorize(derivative, var)?;
    Ok(Pipeline { source: source.to_owned(), function, derivative })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn expr(&self) -> &Expr {
    self.function.expr()
  }

  pub fn derivative_expr(&self) -> &Expr {
    self.derivative.expr()
  }

  pub fn function(&self) -> &CompiledFunction {
    &self.function
  }

  pub fn derivative(&self) -> &CompiledFunction {
    &self.derivative
  }

  /// The one-sided limits of the function at `point`.
  pub fn limit_at(&self, point: f64) -> Result<LimitPair, LimitError> {
    let result = evaluate_limit(self.expr(), point);
    match &result {
      Ok(pair) => info!(point, left = %pair.left, right = %pair.right, "evaluated limit"),
      Err(err) => info!(point, error = %err, "limit evaluation failed"),
    }
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::calculus::LimitValue;
  use crate::util::stricteq::StrictEq;

  use approx::assert_abs_diff_eq;

  #[test]
  fn test_sin_pipeline() {
    let pipeline = Pipeline::from_source("sin(x)").unwrap();
    assert_eq!(pipeline.source(), "sin(x)");
    assert_eq!(pipeline.function().eval(0.0), 0.0);
    assert_eq!(pipeline.derivative_expr().to_string(), "cos(x)");
    assert_eq!(pipeline.derivative().eval(0.0), 1.0);
  }

  #[test]
  fn test_parse_failure() {
    let err = Pipeline::from_source("((").unwrap_err();
    assert!(matches!(err, PipelineError::Parse(_)));
  }

  #[test]
  fn test_unbound_variable() {
    let err = Pipeline::from_source("x + y").unwrap_err();
    assert!(matches!(err, PipelineError::Evaluation(_)));
    assert_eq!(err.to_string(), "Unbound variable 'y' (only 'x' may appear in the function)");
  }

  #[test]
  fn test_removable_discontinuity() {
    let pipeline = Pipeline::from_source("(x^2 - 1)/(x - 1)").unwrap();
    assert!(pipeline.function().eval(1.0).is_nan());
    let pair = pipeline.limit_at(1.0).unwrap();
    assert!(pair.left.strict_eq(&LimitValue::Finite(Expr::from(2))));
    assert!(pair.exists());
  }

  #[test]
  fn test_derivative_values() {
    let pipeline = Pipeline::from_source("x^3").unwrap();
    assert_abs_diff_eq!(pipeline.derivative().eval(2.0), 12.0, epsilon = 1e-12);
  }
}
