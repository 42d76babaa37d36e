//! Parser for the function input box.
//!
//! Parenthesized groups and function calls are resolved recursively
//! into single scalar tokens, and each flat run of scalars and
//! operators is then handed to the shunting yard algorithm.

use super::{Expr, BinaryOp};
use super::function::UnaryFunc;
use super::walker::depth;
use super::tokenizer::{ExprTokenizer, Token, TokenData, TokenizerError};
use crate::parsing::operator::{OperatorTable, InfixProperties, PrefixProperties};
use crate::parsing::shunting_yard::{self, ShuntingYardDriver, ShuntingYardError};
use crate::parsing::source::{SourceOffset, Span};

use thiserror::Error;

/// The deepest expression tree the parser accepts, counting both
/// parentheses and operator chains. Everything downstream of the
/// parser recurses on the tree.
pub const MAX_DEPTH: usize = 100;

#[derive(Clone, Debug)]
pub struct ExprParser<'a> {
  tokenizer: ExprTokenizer<'a>,
}

#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ExprShuntingYardDriver {}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("{0}")]
  TokenizerError(#[from] TokenizerError),
  #[error("Empty expression")]
  EmptyInput,
  #[error("Unexpected end of input")]
  UnexpectedEOF,
  #[error("Unexpected '{0}' at position {1}")]
  UnexpectedToken(String, SourceOffset),
  #[error("Expected an operand at position {0}")]
  MissingOperand(SourceOffset),
  #[error("Unmatched '(' at position {0}")]
  UnmatchedLeftParen(SourceOffset),
  #[error("Unmatched ')' at position {0}")]
  UnmatchedRightParen(SourceOffset),
  #[error("Unknown function '{0}' at position {1}")]
  UnknownFunction(String, SourceOffset),
  #[error("Function '{name}' expects {expected} argument(s) but got {actual}")]
  WrongArity { name: String, expected: usize, actual: usize },
  #[error("Expression is nested too deeply (at most {} levels are allowed)", MAX_DEPTH)]
  TooDeep,
}

/// How a flat run of tokens ended.
#[derive(Debug, Clone, Copy)]
enum Terminator {
  EndOfInput(SourceOffset),
  RightParen(Span),
  Comma(Span),
}

/// A flat run of tokens at one parenthesization level.
struct Sequence {
  tokens: Vec<shunting_yard::Token<Expr>>,
  terminator: Terminator,
}

impl<'a> ExprParser<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    Self {
      tokenizer: ExprTokenizer::new(operator_table),
    }
  }

  pub fn parse(&self, input: &str) -> Result<Expr, ParseError> {
    let tokens = self.tokenizer.tokenize(input)?;
    if tokens.is_empty() {
      return Err(ParseError::EmptyInput);
    }
    let mut tokens = tokens.into_iter();
    let sequence = self.read_sequence(&mut tokens, SourceOffset(input.len()), 0)?;
    match sequence.terminator {
      Terminator::EndOfInput(_) => {
        let expr = resolve(sequence.tokens, ParseError::EmptyInput)?;
        if depth(&expr) > MAX_DEPTH {
          return Err(ParseError::TooDeep);
        }
        Ok(expr)
      }
      Terminator::RightParen(span) => Err(ParseError::UnmatchedRightParen(span.start)),
      Terminator::Comma(span) => Err(ParseError::UnexpectedToken(String::from(","), span.start)),
    }
  }

  fn read_sequence<I>(&self, tokens: &mut I, eof: SourceOffset, nesting: usize) -> Result<Sequence, ParseError>
  where I: Iterator<Item = Token> {
    let mut output = Vec::new();
    let mut expecting_operand = true;
    while let Some(token) = tokens.next() {
      let Token { data, span } = token;
      let operand = match data {
        TokenData::Number(n) => {
          Expr::from(n)
        }
        TokenData::Identifier(name) => {
          identifier_to_expr(&name).ok_or(ParseError::UnexpectedToken(name, span.start))?
        }
        TokenData::LeftParen | TokenData::FunctionCallStart(_) if nesting >= MAX_DEPTH => {
          return Err(ParseError::TooDeep);
        }
        TokenData::LeftParen => {
          self.read_parenthesized(tokens, span, eof, nesting + 1)?
        }
        TokenData::FunctionCallStart(name) => {
          self.read_function_call(tokens, name, span, eof, nesting + 1)?
        }
        TokenData::Operator(op) => {
          if expecting_operand {
            if !op.fixity().is_prefix() {
              return Err(ParseError::UnexpectedToken(op.operator_name().to_owned(), span.start));
            }
            output.push(shunting_yard::Token::prefix_operator(op, span));
          } else {
            if !op.fixity().is_infix() {
              return Err(ParseError::UnexpectedToken(op.operator_name().to_owned(), span.start));
            }
            output.push(shunting_yard::Token::infix_operator(op, span));
            expecting_operand = true;
          }
          continue;
        }
        TokenData::RightParen => {
          return finish_sequence(output, expecting_operand, Terminator::RightParen(span));
        }
        TokenData::Comma => {
          return finish_sequence(output, expecting_operand, Terminator::Comma(span));
        }
      };
      if !expecting_operand {
        // Implicit multiplication is not supported.
        return Err(ParseError::UnexpectedToken(operand.to_string(), span.start));
      }
      output.push(shunting_yard::Token::scalar(operand, span));
      expecting_operand = false;
    }
    finish_sequence(output, expecting_operand, Terminator::EndOfInput(eof))
  }

  fn read_parenthesized<I>(&self, tokens: &mut I, open: Span, eof: SourceOffset, nesting: usize) -> Result<Expr, ParseError>
  where I: Iterator<Item = Token> {
    let sequence = self.read_sequence(tokens, eof, nesting)?;
    match sequence.terminator {
      Terminator::RightParen(close) => {
        resolve(sequence.tokens, ParseError::UnexpectedToken(String::from(")"), close.start))
      }
      Terminator::EndOfInput(_) => Err(ParseError::UnmatchedLeftParen(open.start)),
      Terminator::Comma(span) => Err(ParseError::UnexpectedToken(String::from(","), span.start)),
    }
  }

  fn read_function_call<I>(&self, tokens: &mut I, name: String, open: Span, eof: SourceOffset, nesting: usize) -> Result<Expr, ParseError>
  where I: Iterator<Item = Token> {
    let mut args = Vec::new();
    loop {
      let sequence = self.read_sequence(tokens, eof, nesting)?;
      match sequence.terminator {
        Terminator::EndOfInput(_) => {
          return Err(ParseError::UnmatchedLeftParen(open.start));
        }
        Terminator::Comma(span) => {
          args.push(resolve(sequence.tokens, ParseError::UnexpectedToken(String::from(","), span.start))?);
        }
        Terminator::RightParen(span) => {
          if sequence.tokens.is_empty() && args.is_empty() {
            break;
          }
          args.push(resolve(sequence.tokens, ParseError::UnexpectedToken(String::from(")"), span.start))?);
          break;
        }
      }
    }
    build_call(name, args, open)
  }
}

fn finish_sequence(
  tokens: Vec<shunting_yard::Token<Expr>>,
  expecting_operand: bool,
  terminator: Terminator,
) -> Result<Sequence, ParseError> {
  if expecting_operand && !tokens.is_empty() {
    let pos = match terminator {
      Terminator::EndOfInput(pos) => pos,
      Terminator::RightParen(span) | Terminator::Comma(span) => span.start,
    };
    return Err(ParseError::MissingOperand(pos));
  }
  Ok(Sequence { tokens, terminator })
}

fn resolve(tokens: Vec<shunting_yard::Token<Expr>>, if_empty: ParseError) -> Result<Expr, ParseError> {
  if tokens.is_empty() {
    return Err(if_empty);
  }
  shunting_yard::parse(&mut ExprShuntingYardDriver::new(), tokens).map_err(|err| {
    match err {
      ShuntingYardError::UnexpectedEOF => ParseError::UnexpectedEOF,
      ShuntingYardError::UnexpectedToken { name, span } => ParseError::UnexpectedToken(name, span.start),
    }
  })
}

fn identifier_to_expr(name: &str) -> Option<Expr> {
  match name {
    "pi" => Some(Expr::pi()),
    "E" => Some(Expr::e()),
    _ => Expr::var(name),
  }
}

fn build_call(name: String, mut args: Vec<Expr>, open: Span) -> Result<Expr, ParseError> {
  // Two-argument logarithm, with the base second.
  if name == "log" && args.len() == 2 {
    let base = args.pop();
    let value = args.pop();
    if let (Some(value), Some(base)) = (value, base) {
      return Ok(Expr::div(Expr::call(UnaryFunc::Ln, value), Expr::call(UnaryFunc::Ln, base)));
    }
  }
  let Some(func) = UnaryFunc::from_name(&name) else {
    return Err(ParseError::UnknownFunction(name, open.start));
  };
  if args.len() != 1 {
    return Err(ParseError::WrongArity { name, expected: 1, actual: args.len() });
  }
  let arg = args.remove(0);
  Ok(Expr::call(func, arg))
}

impl ExprShuntingYardDriver {
  pub fn new() -> Self {
    Self {}
  }
}

impl ShuntingYardDriver<Expr> for ExprShuntingYardDriver {
  type Output = Expr;

  fn compile_scalar(&mut self, scalar: Expr) -> Expr {
    scalar
  }

  fn compile_infix_op(&mut self, left: Expr, infix: &InfixProperties, right: Expr) -> Expr {
    // Every infix operator in the common table has a BinaryOp.
    let op = BinaryOp::from_function_name(infix.function_name()).unwrap_or(BinaryOp::Mul);
    Expr::binary(op, left, right)
  }

  fn compile_prefix_op(&mut self, prefix: &PrefixProperties, right: Expr) -> Expr {
    match prefix.function_name() {
      "negate" => Expr::neg(right),
      _ => right,
    }
  }
}

/// Parses `input` with the common operator table.
pub fn parse_function(input: &str) -> Result<Expr, ParseError> {
  let table = OperatorTable::common_operators();
  ExprParser::new(&table).parse(input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::number::Number;
  use crate::assert_strict_eq;

  fn x() -> Expr {
    Expr::x()
  }

  #[test]
  fn test_simple_arithmetic() {
    assert_strict_eq!(parse_function("1 + 2").unwrap(), Expr::add(Expr::from(1), Expr::from(2)));
    assert_strict_eq!(
      parse_function("x - 2 - 3").unwrap(),
      Expr::sub(Expr::sub(x(), Expr::from(2)), Expr::from(3)),
    );
    assert_strict_eq!(
      parse_function("x / 2 * 3").unwrap(),
      Expr::mul(Expr::div(x(), Expr::from(2)), Expr::from(3)),
    );
  }

  #[test]
  fn test_power_and_negation() {
    assert_strict_eq!(
      parse_function("-x^2").unwrap(),
      Expr::neg(Expr::pow(x(), Expr::from(2))),
    );
    assert_strict_eq!(
      parse_function("-x**2").unwrap(),
      Expr::neg(Expr::pow(x(), Expr::from(2))),
    );
    assert_strict_eq!(
      parse_function("2^-x").unwrap(),
      Expr::pow(Expr::from(2), Expr::neg(x())),
    );
    assert_strict_eq!(
      parse_function("x^2^3").unwrap(),
      Expr::pow(x(), Expr::pow(Expr::from(2), Expr::from(3))),
    );
    assert_strict_eq!(parse_function("+x").unwrap(), x());
  }

  #[test]
  fn test_polynomial() {
    let expr = parse_function("4*x^3 - 2*x^2 + x - 7").unwrap();
    assert_eq!(expr.to_string(), "4*x**3 - 2*x**2 + x - 7");
  }

  #[test]
  fn test_functions() {
    assert_strict_eq!(parse_function("sin(x)").unwrap(), Expr::call(UnaryFunc::Sin, x()));
    assert_strict_eq!(parse_function("Abs(x)/x").unwrap(), Expr::div(Expr::call(UnaryFunc::Abs, x()), x()));
    assert_strict_eq!(parse_function("ln(x)").unwrap(), Expr::call(UnaryFunc::Ln, x()));
    assert_strict_eq!(
      parse_function("log(x, 2)").unwrap(),
      Expr::div(Expr::call(UnaryFunc::Ln, x()), Expr::call(UnaryFunc::Ln, Expr::from(2))),
    );
    assert_strict_eq!(
      parse_function("exp(sin(x))").unwrap(),
      Expr::call(UnaryFunc::Exp, Expr::call(UnaryFunc::Sin, x())),
    );
  }

  #[test]
  fn test_constants_and_free_symbols() {
    assert_strict_eq!(parse_function("pi").unwrap(), Expr::pi());
    assert_strict_eq!(parse_function("E").unwrap(), Expr::e());
    assert_strict_eq!(parse_function("y").unwrap(), Expr::var("y").unwrap());
    assert_strict_eq!(parse_function("0.5").unwrap(), Expr::from(Number::from(0.5)));
  }

  #[test]
  fn test_parenthesized() {
    assert_strict_eq!(
      parse_function("(x^2 - 1)/(x - 1)").unwrap(),
      Expr::div(
        Expr::sub(Expr::pow(x(), Expr::from(2)), Expr::from(1)),
        Expr::sub(x(), Expr::from(1)),
      ),
    );
  }

  #[test]
  fn test_unbalanced_parens() {
    assert_eq!(parse_function("(("), Err(ParseError::UnmatchedLeftParen(SourceOffset(1))));
    assert_eq!(parse_function("(x + 1"), Err(ParseError::UnmatchedLeftParen(SourceOffset(0))));
    assert_eq!(parse_function("x + 1)"), Err(ParseError::UnmatchedRightParen(SourceOffset(5))));
    assert!(matches!(parse_function("sin(x"), Err(ParseError::UnmatchedLeftParen(_))));
  }

  #[test]
  fn test_errors() {
    assert_eq!(parse_function(""), Err(ParseError::EmptyInput));
    assert_eq!(parse_function("   "), Err(ParseError::EmptyInput));
    assert_eq!(parse_function("x +"), Err(ParseError::MissingOperand(SourceOffset(3))));
    assert_eq!(parse_function("* x"), Err(ParseError::UnexpectedToken(String::from("*"), SourceOffset(0))));
    assert_eq!(parse_function("2 x"), Err(ParseError::UnexpectedToken(String::from("x"), SourceOffset(2))));
    assert_eq!(parse_function("foo(x)"), Err(ParseError::UnknownFunction(String::from("foo"), SourceOffset(0))));
    assert_eq!(
      parse_function("sin(x, 2)"),
      Err(ParseError::WrongArity { name: String::from("sin"), expected: 1, actual: 2 }),
    );
    assert_eq!(
      parse_function("sin()"),
      Err(ParseError::WrongArity { name: String::from("sin"), expected: 1, actual: 0 }),
    );
    assert!(matches!(parse_function("x @ 2"), Err(ParseError::TokenizerError(_))));
  }

  #[test]
  fn test_deep_input_is_rejected() {
    let long_sum = vec!["x"; 2000].join("+");
    assert_eq!(parse_function(&long_sum), Err(ParseError::TooDeep));
    let nested = format!("{}x{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse_function(&nested), Err(ParseError::TooDeep));
    let calls = format!("{}x{}", "sin(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse_function(&calls), Err(ParseError::TooDeep));
  }

  #[test]
  fn test_moderate_depth_is_accepted() {
    let sum = vec!["x"; 50].join(" + ");
    assert!(parse_function(&sum).is_ok());
    let nested = format!("{}x{}", "(".repeat(90), ")".repeat(90));
    assert_strict_eq!(parse_function(&nested).unwrap(), x());
  }

  #[test]
  fn test_error_messages() {
    assert_eq!(parse_function("((").unwrap_err().to_string(), "Unmatched '(' at position 1");
    assert_eq!(parse_function("foo(x)").unwrap_err().to_string(), "Unknown function 'foo' at position 0");
  }
}
