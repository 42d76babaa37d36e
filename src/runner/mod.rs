//! The host loop: reads UI events as JSON lines and writes rendered
//! pages (and animation frames) as JSON lines.

use crate::error::Error;
use crate::page::Page;
use crate::state::Session;
use crate::state::events::UiEvent;
use crate::visualize::{FrameSink, SecantFrame, play_animation};

use serde::Serialize;
use tracing::{info, warn};

use std::io::{BufRead, Write};
use std::time::Duration;

/// One line of output.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Output<'a> {
  Frame(&'a SecantFrame),
  Page(&'a Page),
}

/// Writes each frame as a JSON line, flushing after every frame so
/// the frontend can draw it right away.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
  writer: W,
}

impl<W: Write> JsonLinesSink<W> {
  pub fn new(writer: W) -> Self {
    Self { writer }
  }

  pub fn into_inner(self) -> W {
    self.writer
  }

  pub fn write_output(&mut self, output: &Output) -> Result<(), Error> {
    serde_json::to_writer(&mut self.writer, output)?;
    writeln!(self.writer)?;
    self.writer.flush()?;
    Ok(())
  }

  /// Plays the page's animation, if any, and then writes the page.
  pub fn write_page(&mut self, page: &Page, frame_delay: Duration) -> Result<(), Error> {
    if let Some(frames) = page.animation_frames() {
      play_animation(frames, self, frame_delay)?;
    }
    self.write_output(&Output::Page(page))
  }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
  type Error = Error;

  fn send_frame(&mut self, frame: &SecantFrame) -> Result<(), Error> {
    self.write_output(&Output::Frame(frame))
  }
}

/// Renders the initial page, then one page per event until `input`
/// is exhausted. Malformed events are reported on the page.
pub fn run_event_loop<R, W>(session: &mut Session, input: R, output: W, frame_delay: Duration) -> Result<(), Error>
where R: BufRead,
      W: Write {
  let mut sink = JsonLinesSink::new(output);
  sink.write_page(&session.render(false), frame_delay)?;
  for line in input.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    let page = match serde_json::from_str::<UiEvent>(&line) {
      Ok(event) => session.handle_event(event),
      Err(err) => {
        warn!(error = %err, "malformed event");
        session.render_with_error(format!("Malformed event: {err}"))
      }
    };
    sink.write_page(&page, frame_delay)?;
  }
  info!("input closed, exiting event loop");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::Value;

  fn run(input: &str) -> Vec<Value> {
    let mut session = Session::default();
    let mut output = Vec::new();
    run_event_loop(&mut session, input.as_bytes(), &mut output, Duration::ZERO).unwrap();
    String::from_utf8(output).unwrap()
      .lines()
      .map(|line| serde_json::from_str(line).unwrap())
      .collect()
  }

  #[test]
  fn test_initial_page_only() {
    let lines = run("");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "page");
    assert_eq!(lines[0]["title"], "CalCS: Interactive Visualizer");
  }

  #[test]
  fn test_one_page_per_event() {
    let lines = run("{\"type\": \"setFunction\", \"text\": \"x^2\"}\n\n{\"type\": \"setLimitX\", \"x\": 0}\n");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line["kind"] == "page"));
  }

  #[test]
  fn test_animation_frames_precede_page() {
    let lines = run("{\"type\": \"runAnimation\"}\n");
    assert_eq!(lines.len(), 1 + 20 + 1);
    assert!(lines[1..21].iter().all(|line| line["kind"] == "frame"));
    assert_eq!(lines[1]["index"], 0);
    assert_eq!(lines[20]["index"], 19);
    assert_eq!(lines[21]["kind"], "page");
  }

  #[test]
  fn test_malformed_event_is_reported() {
    let lines = run("{\"type\": \"explode\"}\n");
    assert_eq!(lines.len(), 2);
    let error = &lines[1]["blocks"][1];
    assert_eq!(error["type"], "error");
    assert!(error["text"].as_str().unwrap().starts_with("Malformed event: "));
  }
}
