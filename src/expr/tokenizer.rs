//! Splits the function input into numbers, names, operators and
//! punctuation.

use super::number::{Number, ParseNumberError};
use crate::parsing::cursor::Cursor;
use crate::parsing::operator::{Operator, OperatorTable};
use crate::parsing::source::{SourceOffset, Span};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use std::cmp::Reverse;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug)]
pub struct ExprTokenizer<'a> {
  operator_table: &'a OperatorTable,
  operator_regex: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub data: TokenData,
  pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenData {
  Number(Number),
  Identifier(String),
  Operator(Operator),
  /// A name immediately followed by `(`. The parenthesis is part of
  /// the token.
  FunctionCallStart(String),
  LeftParen,
  Comma,
  RightParen,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum TokenizerError {
  #[error("Unexpected character '{0}' at position {1}")]
  UnexpectedChar(char, SourceOffset),
  #[error("Invalid number '{text}' at position {}", .span.start)]
  InvalidNumber { text: String, span: Span, source: ParseNumberError },
}

static NUMBER: Lazy<Regex> = Lazy::new(|| {
  // No sign; `-` and `+` are always operators.
  Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap());
static CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)\s*\(").unwrap());

impl<'a> ExprTokenizer<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    let operator_regex = longest_first(operator_table.iter().map(|op| op.operator_name()));
    Self { operator_table, operator_regex }
  }

  pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizerError> {
    let mut cursor = Cursor::new(input);
    let mut tokens = Vec::new();
    loop {
      cursor.skip_whitespace();
      let Some(next) = cursor.peek() else {
        return Ok(tokens);
      };
      match self.next_token(&mut cursor)? {
        Some(token) => tokens.push(token),
        None => return Err(TokenizerError::UnexpectedChar(next, cursor.offset())),
      }
    }
  }

  fn next_token(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, TokenizerError> {
    for (literal, data) in [("(", TokenData::LeftParen), (")", TokenData::RightParen), (",", TokenData::Comma)] {
      if let Some(lexeme) = cursor.eat_literal(literal) {
        return Ok(Some(Token::new(data, lexeme.span)));
      }
    }
    if let Some((caps, span)) = cursor.eat_captures(&CALL) {
      return Ok(Some(Token::new(TokenData::FunctionCallStart(caps[1].to_owned()), span)));
    }
    if let Some(lexeme) = cursor.eat_regex(&NAME) {
      return Ok(Some(Token::new(TokenData::Identifier(lexeme.text.to_owned()), lexeme.span)));
    }
    if let Some(lexeme) = cursor.eat_regex(&NUMBER) {
      let number = lexeme.text.parse::<Number>().map_err(|source| {
        TokenizerError::InvalidNumber { text: lexeme.text.to_owned(), span: lexeme.span, source }
      })?;
      return Ok(Some(Token::new(TokenData::Number(number), lexeme.span)));
    }
    let operator = cursor.eat_regex(&self.operator_regex).and_then(|lexeme| {
      let op = self.operator_table.get_by_operator_name(lexeme.text)?;
      Some(Token::new(TokenData::Operator(op.clone()), lexeme.span))
    });
    Ok(operator)
  }
}

/// An anchored regex matching any of `options`, trying longer options
/// first so that `**` wins over `*`.
fn longest_first<'s>(options: impl IntoIterator<Item = &'s str>) -> Regex {
  let alternation = options.into_iter()
    .sorted_by_key(|s| Reverse(s.len()))
    .map(regex::escape)
    .join("|");
  // Escaped literals always form a valid regex.
  Regex::new(&format!("^(?:{alternation})")).unwrap()
}

impl Token {
  pub fn new(data: TokenData, span: Span) -> Self {
    Self { data, span }
  }
}

impl Display for TokenData {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Number(n) => n.fmt(f),
      TokenData::Identifier(name) => f.write_str(name),
      TokenData::Operator(op) => f.write_str(op.operator_name()),
      TokenData::FunctionCallStart(name) => write!(f, "{name}("),
      TokenData::LeftParen => f.write_str("("),
      TokenData::Comma => f.write_str(","),
      TokenData::RightParen => f.write_str(")"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  fn span(start: usize, end: usize) -> Span {
    Span::new(SourceOffset(start), SourceOffset(end))
  }

  fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    let table = OperatorTable::common_operators();
    ExprTokenizer::new(&table).tokenize(input)
  }

  #[test]
  fn test_punctuation() {
    assert_eq!(tokenize("( , )").unwrap(), vec![
      Token::new(TokenData::LeftParen, span(0, 1)),
      Token::new(TokenData::Comma, span(2, 3)),
      Token::new(TokenData::RightParen, span(4, 5)),
    ]);
  }

  #[test]
  fn test_power_operator_is_one_token() {
    let tokens = tokenize("x**2").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[1].data, TokenData::Operator(op) if op.operator_name() == "**"));
    assert_eq!(tokens[1].span, span(1, 3));
  }

  #[test]
  fn test_function_call_start() {
    let tokens = tokenize("sin (x)").unwrap();
    assert_eq!(tokens[0], Token::new(TokenData::FunctionCallStart(String::from("sin")), span(0, 5)));
    assert_eq!(tokens[1], Token::new(TokenData::Identifier(String::from("x")), span(5, 6)));
  }

  #[test]
  fn test_numbers() {
    let numbers: Vec<_> = tokenize("12 0.5 3e2 .25").unwrap().into_iter().filter_map(|t| match t.data {
      TokenData::Number(n) => Some(n),
      _ => None,
    }).collect();
    assert_eq!(numbers.len(), 4);
    assert_strict_eq!(numbers[0], Number::from(12));
    assert_strict_eq!(numbers[1], Number::from(0.5));
    assert_strict_eq!(numbers[2], Number::from(300.0));
    assert_strict_eq!(numbers[3], Number::from(0.25));
  }

  #[test]
  fn test_sign_is_an_operator() {
    let tokens = tokenize("-3").unwrap();
    assert!(matches!(&tokens[0].data, TokenData::Operator(op) if op.operator_name() == "-"));
    assert!(matches!(tokens[1].data, TokenData::Number(_)));
  }

  #[test]
  fn test_whitespace_is_ignored() {
    assert_eq!(tokenize("    1  ( a() , )        ").unwrap().len(), 6);
    assert_eq!(tokenize("   ").unwrap(), vec![]);
  }

  #[test]
  fn test_unexpected_char() {
    assert_eq!(tokenize("x + @"), Err(TokenizerError::UnexpectedChar('@', SourceOffset(4))));
  }

  #[test]
  fn test_number_overflowing_to_infinity() {
    let err = tokenize("1e999").unwrap_err();
    assert!(matches!(err, TokenizerError::InvalidNumber { ref text, .. } if text == "1e999"));
  }
}
