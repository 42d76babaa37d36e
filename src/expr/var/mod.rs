use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

/// A free variable, named by an identifier (a letter or underscore,
/// then letters, digits and underscores).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Var(String);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid variable name '{0}'")]
pub struct InvalidVarName(pub String);

impl Var {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  /// The variable every plotted function is a function of.
  pub fn x() -> Self {
    Self(String::from("x"))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Var {
  type Error = InvalidVarName;

  fn try_from(name: String) -> Result<Self, InvalidVarName> {
    if IDENTIFIER.is_match(&name) { Ok(Self(name)) } else { Err(InvalidVarName(name)) }
  }
}

impl From<Var> for String {
  fn from(var: Var) -> Self {
    var.0
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
