//! The rendered page, as a serializable list of blocks.
//!
//! The frontend draws blocks in order and knows nothing about
//! calculus. Every block is recomputed from scratch on each rerun.

pub mod content;
mod render;

pub use render::render_page;

use crate::graphics::Figure;
use crate::visualize::SecantFrame;

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
  pub title: String,
  pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
  Header { text: String },
  Markdown { text: String },
  Latex { text: String },
  Code { text: String },
  Success { text: String },
  Error { text: String },
  Plot { figure: Figure },
  /// A collapsible section.
  Expander { title: String, blocks: Vec<Block> },
  Animation { frames: Vec<SecantFrame> },
}

impl Page {
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), blocks: Vec::new() }
  }

  pub fn push(&mut self, block: Block) {
    self.blocks.push(block);
  }

  /// Inserts an error message just below the page heading, for
  /// problems with the triggering event rather than the function.
  pub fn insert_error(&mut self, text: impl Into<String>) {
    let index = self.blocks.iter()
      .position(|block| matches!(block, Block::Header { .. }))
      .map_or(0, |i| i + 1);
    self.blocks.insert(index, Block::error(text));
  }

  /// All blocks on the page, including those nested in expanders,
  /// in document order.
  pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> {
    let mut out = Vec::new();
    for block in &self.blocks {
      block.collect_into(&mut out);
    }
    out.into_iter()
  }

  pub fn animation_frames(&self) -> Option<&[SecantFrame]> {
    self.blocks.iter().find_map(|block| match block {
      Block::Animation { frames } => Some(frames.as_slice()),
      _ => None,
    })
  }

  pub fn errors(&self) -> impl Iterator<Item = &str> {
    self.iter_blocks().filter_map(|block| match block {
      Block::Error { text } => Some(text.as_str()),
      _ => None,
    })
  }
}

impl Block {
  pub fn header(text: impl Into<String>) -> Self {
    Block::Header { text: text.into() }
  }

  pub fn markdown(text: impl Into<String>) -> Self {
    Block::Markdown { text: text.into() }
  }

  pub fn latex(text: impl Into<String>) -> Self {
    Block::Latex { text: text.into() }
  }

  pub fn code(text: impl Into<String>) -> Self {
    Block::Code { text: text.into() }
  }

  pub fn success(text: impl Into<String>) -> Self {
    Block::Success { text: text.into() }
  }

  pub fn error(text: impl Into<String>) -> Self {
    Block::Error { text: text.into() }
  }

  pub fn expander(title: impl Into<String>, blocks: Vec<Block>) -> Self {
    Block::Expander { title: title.into(), blocks }
  }

  fn collect_into<'a>(&'a self, out: &mut Vec<&'a Block>) {
    out.push(self);
    if let Block::Expander { blocks, .. } = self {
      for block in blocks {
        block.collect_into(out);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_insert_error_below_heading() {
    let mut page = Page::new("t");
    page.push(Block::header("Heading"));
    page.push(Block::markdown("body"));
    page.insert_error("oops");
    assert_eq!(page.blocks[1], Block::error("oops"));
    assert_eq!(page.errors().collect::<Vec<_>>(), vec!["oops"]);
  }

  #[test]
  fn test_insert_error_without_heading() {
    let mut page = Page::new("t");
    page.insert_error("oops");
    assert_eq!(page.blocks, vec![Block::error("oops")]);
  }

  #[test]
  fn test_iter_blocks_descends_into_expanders() {
    let mut page = Page::new("t");
    page.push(Block::expander("outer", vec![Block::latex("a"), Block::error("b")]));
    page.push(Block::code("c"));
    assert_eq!(page.iter_blocks().count(), 4);
    assert_eq!(page.errors().collect::<Vec<_>>(), vec!["b"]);
  }

  #[test]
  fn test_block_json_shape() {
    let json = serde_json::to_value(Block::expander("E", vec![Block::success("ok")])).unwrap();
    assert_eq!(json["type"], "expander");
    assert_eq!(json["title"], "E");
    assert_eq!(json["blocks"][0]["type"], "success");
    assert_eq!(json["blocks"][0]["text"], "ok");
  }
}
