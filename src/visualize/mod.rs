//! Overlays which illustrate the derivative of a function: the
//! tangent line at a point and the secant lines converging to it.

pub mod secant;
pub mod tangent;

pub use secant::{FrameSink, Secant, SecantFrame, play_animation, secant_frames};
pub use tangent::Tangent;
