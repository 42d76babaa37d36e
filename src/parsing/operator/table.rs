use super::{Associativity, Fixity, FixityType, Operator, Precedence};

use std::collections::HashMap;

/// Operators indexed by the symbol the user types.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
  operators: HashMap<String, Operator>,
}

impl OperatorTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, op: Operator) {
    self.operators.insert(op.operator_name().to_owned(), op);
  }

  pub fn get_by_operator_name(&self, name: &str) -> Option<&Operator> {
    self.operators.get(name)
  }

  /// The operator that writes `function_name` in the given position.
  /// Where several do (`^` and `**`), the shortest symbol is chosen.
  pub fn get_by_function_name(&self, function_name: &str, fixity: FixityType) -> Option<&Operator> {
    let implements = |op: &&Operator| match fixity {
      FixityType::Prefix => op.fixity().as_prefix().is_some_and(|p| p.function_name() == function_name),
      FixityType::Infix => op.fixity().as_infix().is_some_and(|i| i.function_name() == function_name),
    };
    self.operators.values()
      .filter(implements)
      .min_by(|a, b| (a.operator_name().len(), a.operator_name()).cmp(&(b.operator_name().len(), b.operator_name())))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Operator> {
    self.operators.values()
  }

  /// Arithmetic on real numbers. Powers bind tighter than prefix
  /// signs, so `-x^2` is `-(x^2)`; `*` and `/` share a level so they
  /// read left to right.
  pub fn common_operators() -> Self {
    let power = || Fixity::new().with_infix("^", Associativity::Right, Precedence::new(200));
    let sign_precedence = Precedence::new(197);
    [
      Operator::new("^", power()),
      Operator::new("**", power()),
      Operator::new("*", Fixity::new().with_infix("*", Associativity::Full, Precedence::new(190))),
      Operator::new("/", Fixity::new().with_infix("/", Associativity::Left, Precedence::new(190))),
      Operator::new("+", Fixity::new()
        .with_prefix("identity", sign_precedence)
        .with_infix("+", Associativity::Full, Precedence::new(180))),
      Operator::new("-", Fixity::new()
        .with_prefix("negate", sign_precedence)
        .with_infix("-", Associativity::Left, Precedence::new(180))),
    ].into_iter().collect()
  }
}

impl FromIterator<Operator> for OperatorTable {
  fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
    let mut table = Self::new();
    iter.into_iter().for_each(|op| table.insert(op));
    table
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_by_operator_name() {
    let table = OperatorTable::common_operators();
    let minus = table.get_by_operator_name("-").unwrap();
    assert!(minus.fixity().is_prefix() && minus.fixity().is_infix());
    assert!(table.get_by_operator_name("%").is_none());
  }

  #[test]
  fn test_lookup_by_function_name_prefers_short_symbol() {
    let table = OperatorTable::common_operators();
    assert_eq!(table.get_by_function_name("^", FixityType::Infix).unwrap().operator_name(), "^");
    assert_eq!(table.get_by_function_name("negate", FixityType::Prefix).unwrap().operator_name(), "-");
    assert!(table.get_by_function_name("negate", FixityType::Infix).is_none());
  }

  #[test]
  fn test_power_binds_tighter_than_sign() {
    let table = OperatorTable::common_operators();
    let infix = |name| table.get_by_operator_name(name).unwrap().fixity().as_infix().unwrap().precedence();
    let negate = table.get_by_operator_name("-").unwrap().fixity().as_prefix().unwrap().precedence();
    assert!(infix("**") > negate);
    assert!(negate > infix("*"));
  }
}
