//! Binding strength of operators.

/// How an infix operator groups when it appears several times in a
/// row without parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
  /// `a - b - c` is `(a - b) - c`.
  Left,
  /// `a ^ b ^ c` is `a ^ (b ^ c)`.
  Right,
  /// Grouping makes no difference, as with `*`.
  Full,
}

/// The precedence of an operator. Higher values bind tighter.
///
/// Values built with [`Precedence::new`] are spaced ten apart, which
/// leaves room for [`Precedence::incremented`] to sit strictly between
/// one operator level and the next. An operand which must not
/// re-associate with its parent is parsed (or printed) one step above
/// the parent's precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(u64);

impl Associativity {
  /// Whether the left operand may be another use of the same
  /// operator without parentheses.
  pub const fn groups_left(self) -> bool {
    matches!(self, Associativity::Left | Associativity::Full)
  }

  pub const fn groups_right(self) -> bool {
    matches!(self, Associativity::Right | Associativity::Full)
  }
}

impl Precedence {
  pub const MIN: Precedence = Precedence(0);
  pub const MAX: Precedence = Precedence(u64::MAX);

  pub const fn new(level: u64) -> Precedence {
    Precedence(level * 10)
  }

  /// A precedence with no spacing applied.
  pub const fn from_raw(n: u64) -> Precedence {
    Precedence(n)
  }

  pub const fn incremented(self) -> Precedence {
    Precedence(self.0 + 1)
  }
}
