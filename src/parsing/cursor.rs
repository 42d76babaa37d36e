//! A position in an input string that tokenizers advance by matching
//! literals and anchored regexes.

use super::source::{SourceOffset, Span};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
  input: &'a str,
  pos: usize,
}

/// A piece of input consumed by a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
  pub text: &'a str,
  pub span: Span,
}

impl<'a> Cursor<'a> {
  pub fn new(input: &'a str) -> Self {
    Self { input, pos: 0 }
  }

  pub fn offset(&self) -> SourceOffset {
    SourceOffset(self.pos)
  }

  /// The unconsumed input.
  pub fn rest(&self) -> &'a str {
    &self.input[self.pos..]
  }

  pub fn is_eof(&self) -> bool {
    self.rest().is_empty()
  }

  pub fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  /// Moves back to an earlier offset. Offsets past the end of the
  /// input stop at the end.
  pub fn rewind(&mut self, offset: SourceOffset) {
    self.pos = offset.0.min(self.input.len());
  }

  /// Consumes `len` bytes, or whatever is left if that is fewer.
  pub fn bump(&mut self, len: usize) -> Lexeme<'a> {
    let start = self.pos;
    let end = (start + len).min(self.input.len());
    self.pos = end;
    Lexeme {
      text: &self.input[start..end],
      span: Span::new(SourceOffset(start), SourceOffset(end)),
    }
  }

  pub fn eat_literal(&mut self, literal: &str) -> Option<Lexeme<'a>> {
    self.rest().starts_with(literal).then(|| self.bump(literal.len()))
  }

  /// Consumes a match of `regex` at the cursor. Matches that don't
  /// begin at the cursor are ignored, so the regex should be anchored
  /// with `^`.
  pub fn eat_regex(&mut self, regex: &Regex) -> Option<Lexeme<'a>> {
    let m = regex.find(self.rest()).filter(|m| m.start() == 0)?;
    Some(self.bump(m.end()))
  }

  /// As [`Cursor::eat_regex`], also returning the capture groups.
  pub fn eat_captures(&mut self, regex: &Regex) -> Option<(Captures<'a>, Span)> {
    let caps = regex.captures(self.rest())?;
    let whole = caps.get(0).filter(|m| m.start() == 0)?;
    let span = self.bump(whole.end()).span;
    Some((caps, span))
  }

  pub fn skip_whitespace(&mut self) {
    static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").unwrap());
    self.eat_regex(&WHITESPACE);
  }
}
