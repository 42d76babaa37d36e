//! Serializable events that the frontend can send to the session.

use serde::{Serialize, Deserialize};

/// A single user interaction. Each one triggers a full rerun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEvent {
  SetFunction { text: String },
  SetTangentX { x: f64 },
  SetLimitX { x: f64 },
  RunAnimation,
  /// Reveal the solution to a practice problem, by zero-based index.
  RevealSolution { index: usize },
}

impl UiEvent {
  /// The name of the event, for logging.
  pub fn name(&self) -> &'static str {
    match self {
      UiEvent::SetFunction { .. } => "setFunction",
      UiEvent::SetTangentX { .. } => "setTangentX",
      UiEvent::SetLimitX { .. } => "setLimitX",
      UiEvent::RunAnimation => "runAnimation",
      UiEvent::RevealSolution { .. } => "revealSolution",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_events() {
    let event: UiEvent = serde_json::from_str(r#"{"type": "setFunction", "text": "x^2"}"#).unwrap();
    assert_eq!(event, UiEvent::SetFunction { text: String::from("x^2") });
    let event: UiEvent = serde_json::from_str(r#"{"type": "setTangentX", "x": -2.5}"#).unwrap();
    assert_eq!(event, UiEvent::SetTangentX { x: -2.5 });
    let event: UiEvent = serde_json::from_str(r#"{"type": "runAnimation"}"#).unwrap();
    assert_eq!(event, UiEvent::RunAnimation);
    let event: UiEvent = serde_json::from_str(r#"{"type": "revealSolution", "index": 4}"#).unwrap();
    assert_eq!(event, UiEvent::RevealSolution { index: 4 });
  }

  #[test]
  fn test_malformed_events() {
    assert!(serde_json::from_str::<UiEvent>(r#"{"type": "explode"}"#).is_err());
    assert!(serde_json::from_str::<UiEvent>(r#"{"type": "setLimitX"}"#).is_err());
    assert!(serde_json::from_str::<UiEvent>("not json").is_err());
  }

  #[test]
  fn test_name_matches_tag() {
    let event = UiEvent::SetLimitX { x: 0.0 };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], event.name());
  }
}
