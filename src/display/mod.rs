//! Rendering of expressions for the user, either as plain text
//! (using the same syntax the input box accepts) or as LaTeX.

pub mod language;

use crate::expr::Expr;
use language::LanguageMode;
use language::basic::BasicLanguageMode;
use language::latex::LatexLanguageMode;

use once_cell::sync::Lazy;

use std::fmt::{self, Display, Formatter};

static BASIC_MODE: Lazy<BasicLanguageMode> = Lazy::new(BasicLanguageMode::from_common_operators);
static LATEX_MODE: Lazy<LatexLanguageMode> = Lazy::new(LatexLanguageMode::from_common_operators);

/// Renders `expr` in the plaintext input syntax, such as
/// `12*x**2 - 4*x + 1`.
pub fn to_plain(expr: &Expr) -> String {
  BASIC_MODE.render(expr)
}

pub fn to_latex(expr: &Expr) -> String {
  LATEX_MODE.render(expr)
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", to_plain(self))
  }
}
