//! Session state manager.
//!
//! A [`Session`] owns the page controls and nothing else. Every event
//! updates the controls and reruns the whole page from scratch. Button
//! presses (the animation and the solution reveals) only affect the
//! rerun they trigger.

pub mod config;
pub mod events;

use config::{SessionConfig, SOLUTION_COUNT};
use events::UiEvent;
use crate::graphics::SampleGrid;
use crate::page::{Page, render_page};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Session {
  config: SessionConfig,
  grid: SampleGrid,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
  #[error("No such problem: {index} (expected an index less than {count})")]
  NoSuchProblem { index: usize, count: usize },
}

impl Session {
  pub fn new(config: SessionConfig) -> Self {
    Self { config, grid: SampleGrid::default() }
  }

  pub fn config(&self) -> &SessionConfig {
    &self.config
  }

  pub fn grid(&self) -> &SampleGrid {
    &self.grid
  }

  /// Applies `event` and rerenders the page. Errors in the event
  /// itself are reported on the page rather than returned.
  pub fn handle_event(&mut self, event: UiEvent) -> Page {
    info!(event = event.name(), "handling event");
    self.config.hide_solutions();
    let animate = matches!(event, UiEvent::RunAnimation);
    match self.apply(event) {
      Ok(()) => self.render(animate),
      Err(err) => self.render_with_error(err.to_string()),
    }
  }

  pub fn apply(&mut self, event: UiEvent) -> Result<(), SessionError> {
    match event {
      UiEvent::SetFunction { text } => {
        self.config.set_function(text);
      }
      UiEvent::SetTangentX { x } => {
        self.config.set_tangent_x(x);
      }
      UiEvent::SetLimitX { x } => {
        self.config.set_limit_x(x);
      }
      UiEvent::RunAnimation => {}
      UiEvent::RevealSolution { index } => {
        if !self.config.reveal(index) {
          return Err(SessionError::NoSuchProblem { index, count: SOLUTION_COUNT });
        }
      }
    }
    debug!(config = ?self.config, "applied event");
    Ok(())
  }

  pub fn render(&self, animate: bool) -> Page {
    render_page(&self.config, &self.grid, animate)
  }

  /// Renders the page with an extra error message at the top, such as
  /// for an event which could not be applied.
  pub fn render_with_error(&self, message: impl Into<String>) -> Page {
    let mut page = self.render(false);
    page.insert_error(message);
    page
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::page::Block;
  use crate::page::content::PROBLEMS;

  #[test]
  fn test_set_function_reruns() {
    let mut session = Session::default();
    let page = session.handle_event(UiEvent::SetFunction { text: String::from("x^2") });
    assert_eq!(session.config().function(), "x^2");
    assert!(page.blocks.contains(&Block::code("f(x) = x**2")));
    assert!(page.blocks.contains(&Block::markdown("**f'(x)** = `2*x`")));
  }

  #[test]
  fn test_sliders_are_snapped() {
    let mut session = Session::default();
    session.handle_event(UiEvent::SetTangentX { x: 2.345 });
    session.handle_event(UiEvent::SetLimitX { x: -99.0 });
    assert_eq!(session.config().tangent_x(), 2.3);
    assert_eq!(session.config().limit_x(), -10.0);
  }

  #[test]
  fn test_animation_only_for_that_event() {
    let mut session = Session::default();
    let page = session.handle_event(UiEvent::RunAnimation);
    assert_eq!(page.animation_frames().map(<[_]>::len), Some(20));
    let page = session.handle_event(UiEvent::SetLimitX { x: 0.5 });
    assert!(page.animation_frames().is_none());
  }

  #[test]
  fn test_reveal_out_of_range() {
    let mut session = Session::default();
    let page = session.handle_event(UiEvent::RevealSolution { index: 5 });
    assert_eq!(page.blocks[1], Block::error("No such problem: 5 (expected an index less than 5)"));
    // The rest of the page still renders.
    assert_eq!(page.errors().count(), 1);
    assert!(page.blocks.iter().any(|b| matches!(b, Block::Plot { .. })));
  }

  #[test]
  fn test_reveal_only_for_that_event() {
    let mut session = Session::default();
    let solution = Block::latex(PROBLEMS[0].solution[0]);
    let page = session.handle_event(UiEvent::RevealSolution { index: 0 });
    assert!(page.iter_blocks().any(|b| b == &solution));
    assert!(session.config().is_revealed(0));
    let page = session.handle_event(UiEvent::SetFunction { text: String::from("cos(x)") });
    assert!(!page.iter_blocks().any(|b| b == &solution));
    assert!(!session.config().is_revealed(0));
  }

  #[test]
  fn test_reveals_do_not_accumulate() {
    let mut session = Session::default();
    session.handle_event(UiEvent::RevealSolution { index: 1 });
    session.handle_event(UiEvent::RevealSolution { index: 3 });
    assert!(!session.config().is_revealed(1));
    assert!(session.config().is_revealed(3));
  }
}
