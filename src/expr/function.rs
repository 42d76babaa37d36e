//! The elementary one-argument functions understood by the parser,
//! the differentiator, and the evaluators.

use super::{Expr, Constant};
use super::number::Number;

use phf::phf_map;
use num::{Zero, One};

use std::fmt::{self, Display, Formatter};

/// Values closer to zero than this are treated as zero when deciding
/// whether a function is continuous at a (floating-point) argument.
pub const CONTINUITY_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunc {
  Neg,
  Sin,
  Cos,
  Tan,
  Cot,
  Sec,
  Csc,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Exp,
  Ln,
  Sqrt,
  Abs,
  Sign,
}

/// Functions accessible by name in the input language. Negation is
/// only reachable through the prefix `-` operator.
static FUNCTIONS: phf::Map<&'static str, UnaryFunc> = phf_map! {
  "sin" => UnaryFunc::Sin,
  "cos" => UnaryFunc::Cos,
  "tan" => UnaryFunc::Tan,
  "cot" => UnaryFunc::Cot,
  "sec" => UnaryFunc::Sec,
  "csc" => UnaryFunc::Csc,
  "asin" => UnaryFunc::Asin,
  "acos" => UnaryFunc::Acos,
  "atan" => UnaryFunc::Atan,
  "sinh" => UnaryFunc::Sinh,
  "cosh" => UnaryFunc::Cosh,
  "tanh" => UnaryFunc::Tanh,
  "exp" => UnaryFunc::Exp,
  "ln" => UnaryFunc::Ln,
  "log" => UnaryFunc::Ln,
  "sqrt" => UnaryFunc::Sqrt,
  "abs" => UnaryFunc::Abs,
  "Abs" => UnaryFunc::Abs,
  "sign" => UnaryFunc::Sign,
};

impl UnaryFunc {
  pub fn from_name(name: &str) -> Option<UnaryFunc> {
    FUNCTIONS.get(name).copied()
  }

  /// All names accepted by [`UnaryFunc::from_name`].
  pub fn known_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.keys().copied()
  }

  /// The canonical output name of the function.
  pub fn name(self) -> &'static str {
    match self {
      UnaryFunc::Neg => "-",
      UnaryFunc::Sin => "sin",
      UnaryFunc::Cos => "cos",
      UnaryFunc::Tan => "tan",
      UnaryFunc::Cot => "cot",
      UnaryFunc::Sec => "sec",
      UnaryFunc::Csc => "csc",
      UnaryFunc::Asin => "asin",
      UnaryFunc::Acos => "acos",
      UnaryFunc::Atan => "atan",
      UnaryFunc::Sinh => "sinh",
      UnaryFunc::Cosh => "cosh",
      UnaryFunc::Tanh => "tanh",
      UnaryFunc::Exp => "exp",
      UnaryFunc::Ln => "log",
      UnaryFunc::Sqrt => "sqrt",
      UnaryFunc::Abs => "Abs",
      UnaryFunc::Sign => "sign",
    }
  }

  pub fn eval_f64(self, x: f64) -> f64 {
    match self {
      UnaryFunc::Neg => - x,
      UnaryFunc::Sin => x.sin(),
      UnaryFunc::Cos => x.cos(),
      UnaryFunc::Tan => x.tan(),
      UnaryFunc::Cot => 1.0 / x.tan(),
      UnaryFunc::Sec => 1.0 / x.cos(),
      UnaryFunc::Csc => 1.0 / x.sin(),
      UnaryFunc::Asin => x.asin(),
      UnaryFunc::Acos => x.acos(),
      UnaryFunc::Atan => x.atan(),
      UnaryFunc::Sinh => x.sinh(),
      UnaryFunc::Cosh => x.cosh(),
      UnaryFunc::Tanh => x.tanh(),
      UnaryFunc::Exp => x.exp(),
      UnaryFunc::Ln => x.ln(),
      UnaryFunc::Sqrt => x.sqrt(),
      UnaryFunc::Abs => x.abs(),
      UnaryFunc::Sign => {
        // f64::signum is 1.0 at zero, which is not what we want.
        if x.is_nan() || x == 0.0 { x } else { x.signum() }
      }
    }
  }

  /// Whether the function is real-valued and continuous in a
  /// neighborhood of `x`.
  pub fn is_continuous_at(self, x: f64) -> bool {
    if !x.is_finite() {
      return false;
    }
    match self {
      UnaryFunc::Neg | UnaryFunc::Sin | UnaryFunc::Cos | UnaryFunc::Atan |
      UnaryFunc::Sinh | UnaryFunc::Cosh | UnaryFunc::Tanh | UnaryFunc::Exp |
      UnaryFunc::Abs => true,
      UnaryFunc::Tan | UnaryFunc::Sec => x.cos().abs() > CONTINUITY_EPSILON,
      UnaryFunc::Cot | UnaryFunc::Csc => x.sin().abs() > CONTINUITY_EPSILON,
      UnaryFunc::Asin | UnaryFunc::Acos => x.abs() < 1.0 - CONTINUITY_EPSILON,
      UnaryFunc::Ln | UnaryFunc::Sqrt => x > CONTINUITY_EPSILON,
      UnaryFunc::Sign => x.abs() > CONTINUITY_EPSILON,
    }
  }

  /// The derivative of the function, evaluated at `u`. The chain rule
  /// factor is NOT included.
  pub fn derivative_at(self, u: Expr) -> Expr {
    fn square(e: Expr) -> Expr {
      Expr::pow(e, Expr::from(2))
    }
    match self {
      UnaryFunc::Neg => Expr::from(-1),
      UnaryFunc::Sin => Expr::call(UnaryFunc::Cos, u),
      UnaryFunc::Cos => Expr::neg(Expr::call(UnaryFunc::Sin, u)),
      UnaryFunc::Tan => Expr::add(square(Expr::call(UnaryFunc::Tan, u)), Expr::one()),
      UnaryFunc::Cot => Expr::neg(Expr::add(square(Expr::call(UnaryFunc::Cot, u)), Expr::one())),
      UnaryFunc::Sec => Expr::mul(Expr::call(UnaryFunc::Tan, u.clone()), Expr::call(UnaryFunc::Sec, u)),
      UnaryFunc::Csc => Expr::neg(Expr::mul(Expr::call(UnaryFunc::Cot, u.clone()), Expr::call(UnaryFunc::Csc, u))),
      UnaryFunc::Asin => Expr::div(Expr::one(), Expr::call(UnaryFunc::Sqrt, Expr::sub(Expr::one(), square(u)))),
      UnaryFunc::Acos => Expr::neg(Expr::div(Expr::one(), Expr::call(UnaryFunc::Sqrt, Expr::sub(Expr::one(), square(u))))),
      UnaryFunc::Atan => Expr::div(Expr::one(), Expr::add(square(u), Expr::one())),
      UnaryFunc::Sinh => Expr::call(UnaryFunc::Cosh, u),
      UnaryFunc::Cosh => Expr::call(UnaryFunc::Sinh, u),
      UnaryFunc::Tanh => Expr::sub(Expr::one(), square(Expr::call(UnaryFunc::Tanh, u))),
      UnaryFunc::Exp => Expr::call(UnaryFunc::Exp, u),
      UnaryFunc::Ln => Expr::div(Expr::one(), u),
      UnaryFunc::Sqrt => Expr::div(Expr::one(), Expr::mul(Expr::from(2), Expr::call(UnaryFunc::Sqrt, u))),
      UnaryFunc::Abs => Expr::call(UnaryFunc::Sign, u),
      UnaryFunc::Sign => Expr::zero(),
    }
  }

  /// The value of the function at a constant argument, when it can be
  /// written down without the function itself. Float arguments
  /// produce float results; exact arguments only produce a result at
  /// well-known special points.
  pub fn special_value(self, arg: &Expr) -> Option<Expr> {
    match arg {
      Expr::Constant(Constant::Number(n)) => self.special_value_at_number(n),
      Expr::Constant(Constant::Pi) => match self {
        UnaryFunc::Sin | UnaryFunc::Tan => Some(Expr::zero()),
        UnaryFunc::Cos | UnaryFunc::Sec => Some(Expr::from(-1)),
        UnaryFunc::Abs => Some(Expr::pi()),
        UnaryFunc::Sign => Some(Expr::one()),
        _ => None,
      },
      Expr::Constant(Constant::E) => match self {
        UnaryFunc::Ln => Some(Expr::one()),
        UnaryFunc::Abs => Some(Expr::e()),
        UnaryFunc::Sign => Some(Expr::one()),
        _ => None,
      },
      Expr::UnaryFunc(inner, inner_arg) => match (self, inner) {
        (UnaryFunc::Ln, UnaryFunc::Exp) => Some((**inner_arg).clone()),
        (UnaryFunc::Neg, UnaryFunc::Neg) => Some((**inner_arg).clone()),
        _ => None,
      },
      _ => None,
    }
  }

  fn special_value_at_number(self, n: &Number) -> Option<Expr> {
    if !n.is_exact() {
      let value = self.eval_f64(n.to_f64_or_nan());
      return value.is_finite().then(|| Expr::from(Number::from(value)));
    }
    let half_pi = || Expr::div(Expr::pi(), Expr::from(2));
    let quarter_pi = || Expr::div(Expr::pi(), Expr::from(4));
    match self {
      UnaryFunc::Neg => Some(Expr::from(- n)),
      UnaryFunc::Abs => Some(Expr::from(n.abs())),
      UnaryFunc::Sign => Some(Expr::from(n.sign().map_or(0, |s| s.as_i64()))),
      UnaryFunc::Sqrt => n.exact_root(2).map(Expr::from),
      UnaryFunc::Sin | UnaryFunc::Tan | UnaryFunc::Asin | UnaryFunc::Atan |
      UnaryFunc::Sinh | UnaryFunc::Tanh if n.is_zero() => Some(Expr::zero()),
      UnaryFunc::Cos | UnaryFunc::Sec | UnaryFunc::Cosh | UnaryFunc::Exp if n.is_zero() => Some(Expr::one()),
      UnaryFunc::Ln | UnaryFunc::Acos if n.is_one() => Some(Expr::zero()),
      UnaryFunc::Acos if n.is_zero() => Some(half_pi()),
      UnaryFunc::Acos if *n == Number::from(-1) => Some(Expr::pi()),
      UnaryFunc::Asin if n.is_one() => Some(half_pi()),
      UnaryFunc::Asin if *n == Number::from(-1) => Some(Expr::neg(half_pi())),
      UnaryFunc::Atan if n.is_one() => Some(quarter_pi()),
      UnaryFunc::Atan if *n == Number::from(-1) => Some(Expr::neg(quarter_pi())),
      _ => None,
    }
  }
}

impl Display for UnaryFunc {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
