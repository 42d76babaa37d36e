pub mod basic;
pub mod latex;

use crate::expr::{Expr, BinaryOp};
use crate::parsing::operator::{Precedence, OperatorTable, InfixProperties, FixityType};

/// A language mode provides a mechanism to convert Exprs into
/// strings for display within the frontend.
pub trait LanguageMode {
  /// Writes `expr` to `out`. If the expression binds more loosely
  /// than `prec`, it must be parenthesized.
  fn write_expr(&self, out: &mut String, expr: &Expr, prec: Precedence);

  fn render(&self, expr: &Expr) -> String {
    let mut out = String::new();
    self.write_expr(&mut out, expr, Precedence::MIN);
    out
  }
}

/// The operator that `op` is written with, if the table has one.
pub fn infix_properties(table: &OperatorTable, op: BinaryOp) -> Option<&InfixProperties> {
  table.get_by_function_name(op.function_name(), FixityType::Infix)
    .and_then(|operator| operator.fixity().as_infix())
}

/// The precedence of prefix negation. Negative number literals are
/// printed at this level too.
pub fn negation_precedence(table: &OperatorTable) -> Precedence {
  table.get_by_function_name("negate", FixityType::Prefix)
    .and_then(|operator| operator.fixity().as_prefix())
    .map_or(Precedence::MAX, |prefix| prefix.precedence())
}

/// The precedence at which the operand of a negation is printed.
/// Products and quotients need no parentheses, since `-(a*b)` and
/// `(-a)*b` are equal.
pub fn negated_operand_precedence(table: &OperatorTable, arg: &Expr) -> Precedence {
  match arg {
    Expr::BinaryOp(op @ (BinaryOp::Mul | BinaryOp::Div), _, _) => {
      infix_properties(table, *op).map_or(Precedence::MAX, |props| props.precedence())
    }
    _ => negation_precedence(table).incremented(),
  }
}
