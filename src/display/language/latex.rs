use super::{LanguageMode, infix_properties, negation_precedence, negated_operand_precedence};
use super::basic::number_precedence;
use crate::expr::{Expr, Constant, BinaryOp};
use crate::expr::function::UnaryFunc;
use crate::expr::number::Number;
use crate::parsing::operator::{OperatorTable, Precedence};

use num::Signed;

/// LaTeX output, for the formula blocks on the page.
#[derive(Clone, Debug)]
pub struct LatexLanguageMode {
  operators: OperatorTable,
}

impl LatexLanguageMode {
  pub fn from_common_operators() -> Self {
    Self { operators: OperatorTable::common_operators() }
  }

  fn write_number(&self, out: &mut String, n: &Number, prec: Precedence) {
    let needs_parens = number_precedence(&self.operators, n) < prec;
    if needs_parens {
      out.push_str("\\left(");
    }
    match n.to_rational().filter(|r| !r.is_integer()) {
      Some(r) => {
        if r.is_negative() {
          out.push('-');
        }
        out.push_str(&format!("\\frac{{{}}}{{{}}}", r.numer().abs(), r.denom()));
      }
      None => {
        out.push_str(&n.to_string());
      }
    }
    if needs_parens {
      out.push_str("\\right)");
    }
  }

  fn write_braced(&self, out: &mut String, expr: &Expr) {
    out.push('{');
    self.write_expr(out, expr, Precedence::MIN);
    out.push('}');
  }
}

fn function_command(func: UnaryFunc) -> &'static str {
  match func {
    UnaryFunc::Asin => "\\arcsin",
    UnaryFunc::Acos => "\\arccos",
    UnaryFunc::Atan => "\\arctan",
    UnaryFunc::Sign => "\\operatorname{sign}",
    UnaryFunc::Sin => "\\sin",
    UnaryFunc::Cos => "\\cos",
    UnaryFunc::Tan => "\\tan",
    UnaryFunc::Cot => "\\cot",
    UnaryFunc::Sec => "\\sec",
    UnaryFunc::Csc => "\\csc",
    UnaryFunc::Sinh => "\\sinh",
    UnaryFunc::Cosh => "\\cosh",
    UnaryFunc::Tanh => "\\tanh",
    UnaryFunc::Ln => "\\log",
    // These have dedicated layouts and never reach this table.
    UnaryFunc::Neg | UnaryFunc::Exp | UnaryFunc::Sqrt | UnaryFunc::Abs => "",
  }
}

/// Juxtaposition is only safe when the right factor cannot be read as
/// a continuation of the left one.
fn needs_explicit_times(left: &Expr, right: &Expr) -> bool {
  match (left, right) {
    (_, Expr::Constant(Constant::Number(_))) => true,
    (_, Expr::UnaryFunc(UnaryFunc::Neg, _)) => true,
    (Expr::Constant(Constant::Number(_)), _) => false,
    _ => true,
  }
}

impl LanguageMode for LatexLanguageMode {
  fn write_expr(&self, out: &mut String, expr: &Expr, prec: Precedence) {
    match expr {
      Expr::Constant(Constant::Number(n)) => {
        self.write_number(out, n, prec);
      }
      Expr::Constant(Constant::Pi) => {
        out.push_str("\\pi");
      }
      Expr::Constant(Constant::E) => {
        out.push('e');
      }
      Expr::Variable(v) => {
        out.push_str(v.as_str());
      }
      Expr::BinaryOp(BinaryOp::Div, left, right) => {
        out.push_str("\\frac");
        self.write_braced(out, left);
        self.write_braced(out, right);
      }
      Expr::BinaryOp(BinaryOp::Pow, base, exponent) => {
        let (own_prec, base_prec) = match infix_properties(&self.operators, BinaryOp::Pow) {
          Some(props) => (props.precedence(), props.left_precedence()),
          None => (Precedence::MIN, Precedence::MAX),
        };
        let needs_parens = own_prec < prec;
        if needs_parens {
          out.push_str("\\left(");
        }
        // A function call as the base is always parenthesized, so the
        // exponent does not read as applying to the argument.
        if matches!(**base, Expr::UnaryFunc(func, _) if func != UnaryFunc::Neg) {
          out.push_str("\\left(");
          self.write_expr(out, base, Precedence::MIN);
          out.push_str("\\right)");
        } else {
          self.write_expr(out, base, base_prec);
        }
        out.push('^');
        self.write_braced(out, exponent);
        if needs_parens {
          out.push_str("\\right)");
        }
      }
      Expr::BinaryOp(op, left, right) => {
        let (own_prec, left_prec, right_prec) = match infix_properties(&self.operators, *op) {
          Some(props) => (props.precedence(), props.left_precedence(), props.right_precedence()),
          None => (Precedence::MIN, Precedence::MAX, Precedence::MAX),
        };
        let needs_parens = own_prec < prec;
        if needs_parens {
          out.push_str("\\left(");
        }
        self.write_expr(out, left, left_prec);
        match op {
          BinaryOp::Add => out.push_str(" + "),
          BinaryOp::Sub => out.push_str(" - "),
          _ if needs_explicit_times(left, right) => out.push_str(" \\cdot "),
          _ => out.push(' '),
        }
        self.write_expr(out, right, right_prec);
        if needs_parens {
          out.push_str("\\right)");
        }
      }
      Expr::UnaryFunc(UnaryFunc::Neg, arg) => {
        let own_prec = negation_precedence(&self.operators);
        let needs_parens = own_prec < prec;
        if needs_parens {
          out.push_str("\\left(");
        }
        out.push('-');
        self.write_expr(out, arg, negated_operand_precedence(&self.operators, arg));
        if needs_parens {
          out.push_str("\\right)");
        }
      }
      Expr::UnaryFunc(UnaryFunc::Exp, arg) => {
        out.push_str("e^");
        self.write_braced(out, arg);
      }
      Expr::UnaryFunc(UnaryFunc::Sqrt, arg) => {
        out.push_str("\\sqrt");
        self.write_braced(out, arg);
      }
      Expr::UnaryFunc(UnaryFunc::Abs, arg) => {
        out.push_str("\\left|");
        self.write_expr(out, arg, Precedence::MIN);
        out.push_str("\\right|");
      }
      Expr::UnaryFunc(func, arg) => {
        out.push_str(function_command(*func));
        out.push_str("\\left(");
        self.write_expr(out, arg, Precedence::MIN);
        out.push_str("\\right)");
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(expr: &Expr) -> String {
    LatexLanguageMode::from_common_operators().render(expr)
  }

  #[test]
  fn test_polynomial() {
    let expr = Expr::add(
      Expr::sub(
        Expr::mul(Expr::from(12), Expr::pow(Expr::x(), Expr::from(2))),
        Expr::mul(Expr::from(4), Expr::x()),
      ),
      Expr::from(1),
    );
    assert_eq!(render(&expr), "12 x^{2} - 4 x + 1");
  }

  #[test]
  fn test_fraction_and_constants() {
    let expr = Expr::div(Expr::pi(), Expr::from(2));
    assert_eq!(render(&expr), "\\frac{\\pi}{2}");
    assert_eq!(render(&Expr::from(Number::ratio(-3, 10))), "-\\frac{3}{10}");
    assert_eq!(render(&Expr::call(UnaryFunc::Exp, Expr::x())), "e^{x}");
  }

  #[test]
  fn test_functions() {
    assert_eq!(render(&Expr::call(UnaryFunc::Sin, Expr::from(1))), "\\sin\\left(1\\right)");
    assert_eq!(render(&Expr::call(UnaryFunc::Abs, Expr::x())), "\\left|x\\right|");
    assert_eq!(render(&Expr::call(UnaryFunc::Sqrt, Expr::x())), "\\sqrt{x}");
    assert_eq!(
      render(&Expr::pow(Expr::call(UnaryFunc::Tan, Expr::x()), Expr::from(2))),
      "\\left(\\tan\\left(x\\right)\\right)^{2}",
    );
  }

  #[test]
  fn test_product_separators() {
    assert_eq!(render(&Expr::mul(Expr::from(2), Expr::from(3))), "2 \\cdot 3");
    assert_eq!(render(&Expr::mul(Expr::x(), Expr::x())), "x \\cdot x");
  }
}
