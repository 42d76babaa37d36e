//! Operator-precedence resolution for a flat stream of scalars and
//! operators.
//!
//! The caller classifies each operator as prefix or infix (an
//! operator that does not follow a complete operand is prefix), and
//! handles parentheses itself by resolving each parenthesized run
//! separately. This module only has to arrange one flat run into a
//! tree.

use super::operator::{Operator, PrefixProperties, InfixProperties, FixityType, Precedence};
use super::source::Span;

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::marker::PhantomData;

/// A token, for the purposes of the shunting yard algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
  data: TokenData<T>,
  span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenData<T> {
  Scalar(T),
  Operator(Operator, FixityType),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuntingYardError {
  #[error("Unexpected end of input")]
  UnexpectedEOF,
  #[error("Unexpected '{name}' at position {}", .span.start)]
  UnexpectedToken { name: String, span: Span },
}

/// Builds output values from the pieces of a resolved expression.
pub trait ShuntingYardDriver<T> {
  type Output;

  fn compile_scalar(&mut self, scalar: T) -> Self::Output;
  fn compile_infix_op(&mut self, left: Self::Output, infix: &InfixProperties, right: Self::Output) -> Self::Output;
  fn compile_prefix_op(&mut self, prefix: &PrefixProperties, right: Self::Output) -> Self::Output;
}

/// An operator waiting on the stack for its operands.
#[derive(Debug, Clone)]
struct PendingOp {
  operator: Operator,
  fixity: FixityType,
  span: Span,
}

/// An output value, with the name and position of the token it
/// started at, for error reporting.
struct Operand<O> {
  output: O,
  name: String,
  span: Span,
}

struct ShuntingYard<'d, D: ShuntingYardDriver<T>, T> {
  driver: &'d mut D,
  operators: Vec<PendingOp>,
  operands: Vec<Operand<D::Output>>,
  _scalar: PhantomData<fn(T)>,
}

impl<T> Token<T> {
  pub fn scalar(data: T, span: Span) -> Self {
    Self { data: TokenData::Scalar(data), span }
  }

  /// A token for `op` used in infix position. `op` should have an
  /// infix fixity; if it doesn't, resolution fails on this token.
  pub fn infix_operator(op: Operator, span: Span) -> Self {
    Self { data: TokenData::Operator(op, FixityType::Infix), span }
  }

  pub fn prefix_operator(op: Operator, span: Span) -> Self {
    Self { data: TokenData::Operator(op, FixityType::Prefix), span }
  }

  pub fn span(&self) -> Span {
    self.span
  }
}

impl<T: Display> Display for Token<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.data {
      TokenData::Scalar(s) => write!(f, "{s}"),
      TokenData::Operator(op, _) => write!(f, "{}", op.operator_name()),
    }
  }
}

impl PendingOp {
  fn precedence(&self) -> Precedence {
    let fixity = self.operator.fixity();
    match self.fixity {
      FixityType::Prefix => fixity.as_prefix().map(|p| p.precedence()),
      FixityType::Infix => fixity.as_infix().map(|i| i.precedence()),
    }.unwrap_or(Precedence::MIN)
  }

  /// Whether this operator must be applied before pushing `incoming`.
  fn binds_before(&self, incoming: &InfixProperties) -> bool {
    let prec = self.precedence();
    prec > incoming.precedence() || (prec == incoming.precedence() && incoming.associativity().groups_left())
  }

  fn unexpected(&self) -> ShuntingYardError {
    ShuntingYardError::UnexpectedToken { name: self.operator.operator_name().to_owned(), span: self.span }
  }
}

impl<'d, D: ShuntingYardDriver<T>, T: Display> ShuntingYard<'d, D, T> {
  fn new(driver: &'d mut D) -> Self {
    Self { driver, operators: Vec::new(), operands: Vec::new(), _scalar: PhantomData }
  }

  fn push(&mut self, token: Token<T>) -> Result<(), ShuntingYardError> {
    let span = token.span;
    match token.data {
      TokenData::Scalar(scalar) => {
        let name = scalar.to_string();
        let output = self.driver.compile_scalar(scalar);
        self.operands.push(Operand { output, name, span });
      }
      TokenData::Operator(operator, FixityType::Prefix) => {
        // Nothing to its left can be resolved yet.
        self.operators.push(PendingOp { operator, fixity: FixityType::Prefix, span });
      }
      TokenData::Operator(operator, FixityType::Infix) => {
        let pending = PendingOp { operator, fixity: FixityType::Infix, span };
        let Some(infix) = pending.operator.fixity().as_infix() else {
          return Err(pending.unexpected());
        };
        while self.operators.last().is_some_and(|top| top.binds_before(infix)) {
          if let Some(top) = self.operators.pop() {
            self.reduce(top, ShuntingYardError::UnexpectedEOF)?;
          }
        }
        self.operators.push(pending);
      }
    }
    Ok(())
  }

  /// Applies `op` to the operands on top of the stack. `missing` is
  /// reported if there aren't enough of them.
  fn reduce(&mut self, op: PendingOp, missing: ShuntingYardError) -> Result<(), ShuntingYardError> {
    match op.fixity {
      FixityType::Infix => {
        let Some(infix) = op.operator.fixity().as_infix() else {
          return Err(op.unexpected());
        };
        let right = self.operands.pop().ok_or_else(|| missing.clone())?;
        let left = self.operands.pop().ok_or(missing)?;
        let output = self.driver.compile_infix_op(left.output, infix, right.output);
        self.operands.push(Operand { output, name: left.name, span: left.span });
      }
      FixityType::Prefix => {
        let Some(prefix) = op.operator.fixity().as_prefix() else {
          return Err(op.unexpected());
        };
        let arg = self.operands.pop().ok_or(missing)?;
        let output = self.driver.compile_prefix_op(prefix, arg.output);
        let name = op.operator.operator_name().to_owned();
        self.operands.push(Operand { output, name, span: op.span });
      }
    }
    Ok(())
  }

  fn finish(mut self) -> Result<D::Output, ShuntingYardError> {
    while let Some(op) = self.operators.pop() {
      self.reduce(op, ShuntingYardError::UnexpectedEOF)?;
    }
    let result = self.operands.pop().ok_or(ShuntingYardError::UnexpectedEOF)?;
    if let Some(extra) = self.operands.pop() {
      return Err(ShuntingYardError::UnexpectedToken { name: extra.name, span: extra.span });
    }
    Ok(result.output)
  }
}

/// Resolves `input` into a single output value.
pub fn parse<T, D, I>(driver: &mut D, input: I) -> Result<D::Output, ShuntingYardError>
where T: Display,
      D: ShuntingYardDriver<T>,
      I: IntoIterator<Item = Token<T>> {
  let mut state = ShuntingYard::new(driver);
  for token in input {
    state.push(token)?;
  }
  state.finish()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::SourceOffset;
  use crate::parsing::operator::{Associativity, Fixity};

  /// Renders the resolved tree as an S-expression.
  struct SexpDriver;

  impl ShuntingYardDriver<i64> for SexpDriver {
    type Output = String;

    fn compile_scalar(&mut self, scalar: i64) -> String {
      scalar.to_string()
    }

    fn compile_infix_op(&mut self, left: String, infix: &InfixProperties, right: String) -> String {
      format!("({} {left} {right})", infix.function_name())
    }

    fn compile_prefix_op(&mut self, prefix: &PrefixProperties, right: String) -> String {
      format!("({} {right})", prefix.function_name())
    }
  }

  fn operator(name: &str) -> Operator {
    let fixity = match name {
      "+" => Fixity::new().with_infix("plus", Associativity::Full, Precedence::new(10)),
      "-" => Fixity::new()
        .with_infix("minus", Associativity::Left, Precedence::new(10))
        .with_prefix("negate", Precedence::new(25)),
      "*" => Fixity::new().with_infix("times", Associativity::Full, Precedence::new(20)),
      "^" => Fixity::new().with_infix("pow", Associativity::Right, Precedence::new(30)),
      "!" => Fixity::new().with_prefix("not", Precedence::new(5)),
      _ => panic!("no test operator {name}"),
    };
    Operator::new(name, fixity)
  }

  /// Tokenizes a space-separated string. Numbers are scalars; an
  /// operator is prefix unless it follows a scalar.
  fn tokens(input: &str) -> Vec<Token<i64>> {
    let mut after_operand = false;
    input.split(' ').enumerate().map(|(i, word)| {
      let span = Span::new(SourceOffset(i), SourceOffset(i + 1));
      if let Ok(n) = word.parse() {
        after_operand = true;
        Token::scalar(n, span)
      } else if after_operand {
        after_operand = false;
        Token::infix_operator(operator(word), span)
      } else {
        Token::prefix_operator(operator(word), span)
      }
    }).collect()
  }

  fn resolve(input: &str) -> Result<String, ShuntingYardError> {
    parse(&mut SexpDriver, tokens(input))
  }

  #[test]
  fn test_associativity() {
    assert_eq!(resolve("1 + 2 + 3").unwrap(), "(plus (plus 1 2) 3)");
    assert_eq!(resolve("1 - 2 - 3").unwrap(), "(minus (minus 1 2) 3)");
    assert_eq!(resolve("1 ^ 2 ^ 3").unwrap(), "(pow 1 (pow 2 3))");
  }

  #[test]
  fn test_differing_precedence() {
    assert_eq!(resolve("1 + 2 * 3 + 4").unwrap(), "(plus (plus 1 (times 2 3)) 4)");
    assert_eq!(resolve("1 * 2 ^ 3 * 4").unwrap(), "(times (times 1 (pow 2 3)) 4)");
  }

  #[test]
  fn test_prefix_operators() {
    // -2^3 is -(2^3), but -2*3 is (-2)*3.
    assert_eq!(resolve("- 2 ^ 3").unwrap(), "(negate (pow 2 3))");
    assert_eq!(resolve("- 2 * 3").unwrap(), "(times (negate 2) 3)");
    assert_eq!(resolve("2 ^ - 3").unwrap(), "(pow 2 (negate 3))");
    assert_eq!(resolve("- - 7").unwrap(), "(negate (negate 7))");
    assert_eq!(resolve("! 1 + 2").unwrap(), "(not (plus 1 2))");
  }

  #[test]
  fn test_missing_operands() {
    assert_eq!(resolve("1 +"), Err(ShuntingYardError::UnexpectedEOF));
    assert_eq!(parse(&mut SexpDriver, Vec::new()), Err(ShuntingYardError::UnexpectedEOF));
  }

  #[test]
  fn test_adjacent_scalars() {
    let err = resolve("1 2").unwrap_err();
    assert_eq!(err, ShuntingYardError::UnexpectedToken {
      name: String::from("1"),
      span: Span::new(SourceOffset(0), SourceOffset(1)),
    });
    assert_eq!(err.to_string(), "Unexpected '1' at position 0");
  }

  #[test]
  fn test_prefix_only_operator_in_infix_position() {
    let err = resolve("1 ! 2").unwrap_err();
    assert!(matches!(err, ShuntingYardError::UnexpectedToken { name, .. } if name == "!"));
  }
}
