//! Operators of the function input language, and how tightly they
//! bind.

mod precedence;
mod table;

pub use precedence::{Associativity, Precedence};
pub use table::OperatorTable;

/// A symbol such as `+` or `**`, together with what it means in
/// prefix and infix position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
  operator_name: String,
  fixity: Fixity,
}

/// The positions an operator may appear in. Operators in a table
/// should have at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixity {
  prefix: Option<PrefixProperties>,
  infix: Option<InfixProperties>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixityType {
  Prefix,
  Infix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixProperties {
  function_name: String,
  precedence: Precedence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixProperties {
  function_name: String,
  associativity: Associativity,
  precedence: Precedence,
}

impl Operator {
  pub fn new(name: impl Into<String>, fixity: Fixity) -> Self {
    Self { operator_name: name.into(), fixity }
  }

  /// The symbol the user types.
  pub fn operator_name(&self) -> &str {
    &self.operator_name
  }

  pub fn fixity(&self) -> &Fixity {
    &self.fixity
  }
}

impl Fixity {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_prefix(mut self, function_name: impl Into<String>, precedence: Precedence) -> Self {
    self.prefix = Some(PrefixProperties { function_name: function_name.into(), precedence });
    self
  }

  pub fn with_infix(mut self, function_name: impl Into<String>, associativity: Associativity, precedence: Precedence) -> Self {
    self.infix = Some(InfixProperties { function_name: function_name.into(), associativity, precedence });
    self
  }

  pub fn as_prefix(&self) -> Option<&PrefixProperties> {
    self.prefix.as_ref()
  }

  pub fn as_infix(&self) -> Option<&InfixProperties> {
    self.infix.as_ref()
  }

  pub fn is_prefix(&self) -> bool {
    self.prefix.is_some()
  }

  pub fn is_infix(&self) -> bool {
    self.infix.is_some()
  }
}

impl PrefixProperties {
  pub fn function_name(&self) -> &str {
    &self.function_name
  }

  pub fn precedence(&self) -> Precedence {
    self.precedence
  }
}

impl InfixProperties {
  pub fn function_name(&self) -> &str {
    &self.function_name
  }

  pub fn associativity(&self) -> Associativity {
    self.associativity
  }

  pub fn precedence(&self) -> Precedence {
    self.precedence
  }

  /// The lowest precedence a left operand can have and still be
  /// written without parentheses.
  pub fn left_precedence(&self) -> Precedence {
    self.operand_precedence(self.associativity.groups_left())
  }

  /// As [`InfixProperties::left_precedence`], for the right operand.
  pub fn right_precedence(&self) -> Precedence {
    self.operand_precedence(self.associativity.groups_right())
  }

  fn operand_precedence(&self, groups: bool) -> Precedence {
    if groups { self.precedence } else { self.precedence.incremented() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn infix(associativity: Associativity) -> InfixProperties {
    let fixity = Fixity::new().with_infix("#", associativity, Precedence::new(1));
    fixity.as_infix().cloned().unwrap()
  }

  #[test]
  fn test_operand_precedence() {
    let (level, above) = (Precedence::from_raw(10), Precedence::from_raw(11));
    let left = infix(Associativity::Left);
    assert_eq!((left.left_precedence(), left.right_precedence()), (level, above));
    let right = infix(Associativity::Right);
    assert_eq!((right.left_precedence(), right.right_precedence()), (above, level));
    let full = infix(Associativity::Full);
    assert_eq!((full.left_precedence(), full.right_precedence()), (level, level));
  }

  #[test]
  fn test_dual_fixity() {
    let minus = Operator::new(
      "-",
      Fixity::new()
        .with_prefix("negate", Precedence::new(2))
        .with_infix("-", Associativity::Left, Precedence::new(1)),
    );
    assert!(minus.fixity().is_prefix() && minus.fixity().is_infix());
    assert_eq!(minus.fixity().as_prefix().map(|p| p.function_name()), Some("negate"));
    assert!(!Fixity::new().with_prefix("not", Precedence::MIN).is_infix());
  }
}
