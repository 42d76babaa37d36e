//! An interactive visualizer for limits and derivatives of a function
//! of one variable.
//!
//! [`pipeline::Pipeline`] turns the function text into compiled
//! function and derivative values, the [`visualize`] module builds the
//! tangent and secant overlays from it, and [`page::render_page`] lays
//! everything out as a serializable [`page::Page`]. [`state::Session`]
//! keeps the slider state between UI events.

pub mod config;
pub mod display;
pub mod error;
pub mod errorlist;
pub mod expr;
pub mod graphics;
pub mod page;
pub mod parsing;
pub mod pipeline;
pub mod runner;
pub mod state;
pub mod util;
pub mod visualize;

pub use error::Error;
