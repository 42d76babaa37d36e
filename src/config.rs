//! Application configuration, loaded from an optional TOML file.
//!
//! ```toml
//! function = "x^2"
//! tangent-x = 2.0
//! limit-x = 0.0
//! frame-delay-ms = 200
//! ```

use crate::errorlist::ErrorList;
use crate::expr::parser::{ParseError, parse_function};
use crate::state::config::{SessionConfig, Slider};
use crate::visualize::secant::DEFAULT_FRAME_DELAY;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AppConfig {
  /// The function shown when the session starts.
  pub function: String,
  pub tangent_x: f64,
  pub limit_x: f64,
  /// Delay between animation frames, in milliseconds.
  pub frame_delay_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Could not read {}: {source}", .path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("Could not parse {}: {source}", .path.display())]
  Toml { path: PathBuf, source: toml::de::Error },
  #[error("Invalid configuration: {0}")]
  Invalid(#[from] ErrorList<ValidationError>),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("Default function does not parse: {0}")]
  Function(#[from] ParseError),
  #[error("{name} must be between {min} and {max}, got {value}")]
  OutOfRange { name: &'static str, value: f64, min: f64, max: f64 },
  #[error("frame-delay-ms must be at most {max}, got {value}")]
  FrameDelayTooLong { value: u64, max: u64 },
}

impl AppConfig {
  pub const MAX_FRAME_DELAY_MS: u64 = 10_000;

  pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
    let config = Self::from_toml(&text)
      .map_err(|source| ConfigError::Toml { path: path.to_owned(), source })?;
    config.validate()?;
    debug!(path = %path.display(), config = ?config, "loaded configuration");
    Ok(config)
  }

  pub fn from_toml(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
  }

  /// Checks every field, reporting all problems together.
  pub fn validate(&self) -> Result<(), ErrorList<ValidationError>> {
    let mut errors = ErrorList::new();
    errors.check(parse_function(&self.function));
    for (name, value) in [("tangent-x", self.tangent_x), ("limit-x", self.limit_x)] {
      let slider = Slider::X_VALUE;
      if !(slider.min..=slider.max).contains(&value) {
        errors.push(ValidationError::OutOfRange { name, value, min: slider.min, max: slider.max });
      }
    }
    if self.frame_delay_ms > Self::MAX_FRAME_DELAY_MS {
      errors.push(ValidationError::FrameDelayTooLong { value: self.frame_delay_ms, max: Self::MAX_FRAME_DELAY_MS });
    }
    errors.into_result(())
  }

  pub fn frame_delay(&self) -> Duration {
    Duration::from_millis(self.frame_delay_ms)
  }

  pub fn session_config(&self) -> SessionConfig {
    SessionConfig::new(self.function.clone(), self.tangent_x, self.limit_x)
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      function: String::from(SessionConfig::DEFAULT_FUNCTION),
      tangent_x: Slider::X_VALUE.default,
      limit_x: Slider::X_VALUE.default,
      frame_delay_ms: DEFAULT_FRAME_DELAY.as_millis() as u64,
    }
  }
}
