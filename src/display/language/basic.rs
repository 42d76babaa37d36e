use super::{LanguageMode, infix_properties, negation_precedence, negated_operand_precedence};
use crate::expr::{Expr, Constant, BinaryOp};
use crate::expr::function::UnaryFunc;
use crate::expr::number::{Number, NumberKind};
use crate::parsing::operator::{OperatorTable, Precedence};

/// Plaintext output, in the same syntax that the function input box
/// accepts. Exponentiation is written `**`.
#[derive(Clone, Debug)]
pub struct BasicLanguageMode {
  operators: OperatorTable,
}

impl BasicLanguageMode {
  pub fn from_common_operators() -> Self {
    Self { operators: OperatorTable::common_operators() }
  }

  fn write_number(&self, out: &mut String, n: &Number, prec: Precedence) {
    let own_prec = number_precedence(&self.operators, n);
    let needs_parens = own_prec < prec;
    if needs_parens {
      out.push('(');
    }
    out.push_str(&n.to_string());
    if needs_parens {
      out.push(')');
    }
  }
}

/// The precedence at which a number literal prints. Negative numbers
/// print like a negation, and fractions like a division.
pub(super) fn number_precedence(operators: &OperatorTable, n: &Number) -> Precedence {
  if n.is_negative() {
    negation_precedence(operators)
  } else if n.kind() == NumberKind::Ratio {
    infix_properties(operators, BinaryOp::Div).map_or(Precedence::MIN, |p| p.precedence())
  } else {
    Precedence::MAX
  }
}

fn operator_symbol(op: BinaryOp) -> &'static str {
  match op {
    BinaryOp::Add => " + ",
    BinaryOp::Sub => " - ",
    BinaryOp::Mul => "*",
    BinaryOp::Div => "/",
    BinaryOp::Pow => "**",
  }
}

impl LanguageMode for BasicLanguageMode {
  fn write_expr(&self, out: &mut String, expr: &Expr, prec: Precedence) {
    match expr {
      Expr::Constant(Constant::Number(n)) => {
        self.write_number(out, n, prec);
      }
      Expr::Constant(Constant::Pi) => {
        out.push_str("pi");
      }
      Expr::Constant(Constant::E) => {
        out.push('E');
      }
      Expr::Variable(v) => {
        out.push_str(v.as_str());
      }
      Expr::BinaryOp(op, left, right) => {
        let (own_prec, left_prec, right_prec) = match infix_properties(&self.operators, *op) {
          Some(props) => (props.precedence(), props.left_precedence(), props.right_precedence()),
          None => (Precedence::MIN, Precedence::MAX, Precedence::MAX),
        };
        let needs_parens = own_prec < prec;
        if needs_parens {
          out.push('(');
        }
        self.write_expr(out, left, left_prec);
        out.push_str(operator_symbol(*op));
        self.write_expr(out, right, right_prec);
        if needs_parens {
          out.push(')');
        }
      }
      Expr::UnaryFunc(UnaryFunc::Neg, arg) => {
        let own_prec = negation_precedence(&self.operators);
        let needs_parens = own_prec < prec;
        if needs_parens {
          out.push('(');
        }
        out.push('-');
        self.write_expr(out, arg, negated_operand_precedence(&self.operators, arg));
        if needs_parens {
          out.push(')');
        }
      }
      Expr::UnaryFunc(func, arg) => {
        out.push_str(func.name());
        out.push('(');
        self.write_expr(out, arg, Precedence::MIN);
        out.push(')');
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(expr: &Expr) -> String {
    BasicLanguageMode::from_common_operators().render(expr)
  }

  fn x() -> Expr {
    Expr::x()
  }

  #[test]
  fn test_atoms() {
    assert_eq!(render(&Expr::from(3)), "3");
    assert_eq!(render(&Expr::pi()), "pi");
    assert_eq!(render(&Expr::e()), "E");
    assert_eq!(render(&x()), "x");
    assert_eq!(render(&Expr::from(Number::ratio(1, 2))), "1/2");
  }

  #[test]
  fn test_polynomial() {
    let expr = Expr::add(
      Expr::sub(
        Expr::mul(Expr::from(12), Expr::pow(x(), Expr::from(2))),
        Expr::mul(Expr::from(4), x()),
      ),
      Expr::from(1),
    );
    assert_eq!(render(&expr), "12*x**2 - 4*x + 1");
  }

  #[test]
  fn test_parenthesization() {
    let expr = Expr::mul(Expr::add(x(), Expr::from(1)), Expr::sub(x(), Expr::from(1)));
    assert_eq!(render(&expr), "(x + 1)*(x - 1)");

    let expr = Expr::sub(x(), Expr::sub(x(), Expr::from(1)));
    assert_eq!(render(&expr), "x - (x - 1)");

    let expr = Expr::div(x(), Expr::mul(x(), Expr::from(2)));
    assert_eq!(render(&expr), "x/(x*2)");

    let expr = Expr::pow(Expr::pow(x(), Expr::from(2)), Expr::from(3));
    assert_eq!(render(&expr), "(x**2)**3");

    let expr = Expr::pow(x(), Expr::pow(Expr::from(2), Expr::from(3)));
    assert_eq!(render(&expr), "x**2**3");
  }

  #[test]
  fn test_negation() {
    assert_eq!(render(&Expr::neg(Expr::pow(x(), Expr::from(2)))), "-x**2");
    assert_eq!(render(&Expr::pow(Expr::neg(x()), Expr::from(2))), "(-x)**2");
    assert_eq!(render(&Expr::neg(Expr::neg(x()))), "-(-x)");
    assert_eq!(render(&Expr::neg(Expr::add(x(), Expr::from(1)))), "-(x + 1)");
    assert_eq!(render(&Expr::mul(Expr::from(-4), x())), "-4*x");
    assert_eq!(render(&Expr::pow(x(), Expr::from(-1))), "x**(-1)");
    assert_eq!(render(&Expr::neg(Expr::div(Expr::pi(), Expr::from(2)))), "-pi/2");
    assert_eq!(render(&Expr::neg(Expr::mul(x(), Expr::call(UnaryFunc::Sin, x())))), "-x*sin(x)");
  }

  #[test]
  fn test_functions() {
    let expr = Expr::call(UnaryFunc::Sin, Expr::mul(Expr::from(2), x()));
    assert_eq!(render(&expr), "sin(2*x)");
    assert_eq!(render(&Expr::call(UnaryFunc::Ln, x())), "log(x)");
    assert_eq!(render(&Expr::call(UnaryFunc::Abs, x())), "Abs(x)");
  }
}
