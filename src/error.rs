use crate::config::ConfigError;
use crate::expr::calculus::LimitError;
use crate::pipeline::PipelineError;
use crate::state::SessionError;

use thiserror::Error;

use std::io;

/// Any error the library can produce. The event loop only ever returns
/// the I/O and JSON variants; the others are shown to the user on the
/// page, and convert here for callers driving the pipeline directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  PipelineError(#[from] PipelineError),
  #[error("{0}")]
  LimitError(#[from] LimitError),
  #[error("{0}")]
  SessionError(#[from] SessionError),
  #[error("{0}")]
  ConfigError(#[from] ConfigError),
  #[error("{0}")]
  IoError(#[from] io::Error),
  #[error("{0}")]
  JsonError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_conversions() {
    let err: Error = LimitError::Oscillation(0.0).into();
    assert_eq!(err.to_string(), "The function oscillates without approaching a value near x = 0");
    let err: Error = SessionError::NoSuchProblem { index: 9, count: 5 }.into();
    assert_eq!(err.to_string(), "No such problem: 9 (expected an index less than 5)");
    let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
    assert!(matches!(err, Error::IoError(_)));
  }
}
