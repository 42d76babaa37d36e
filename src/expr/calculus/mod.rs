//! Subsystems for doing basic calculus on expressions: derivatives
//! and one-sided limits.

mod derivative;
pub mod limit;
pub mod series;

pub use derivative::{DerivativeEngine, DifferentiationFailure, DifferentiationError, differentiate};
pub use limit::{LimitValue, LimitPair, LimitError, evaluate_limit};
