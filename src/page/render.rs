use super::{Page, Block};
use super::content::{self, Concept, Problem, CONCEPTS, PROBLEMS, APPLICATION};
use crate::graphics::SampleGrid;
use crate::pipeline::Pipeline;
use crate::state::config::SessionConfig;
use crate::visualize::{Tangent, secant_frames};

use tracing::{debug, warn};

/// Renders the whole page for `config`. Nothing is carried over from
/// previous renders.
///
/// If the function fails to parse, only the page heading, the About
/// section, and the error are rendered.
pub fn render_page(config: &SessionConfig, grid: &SampleGrid, animate: bool) -> Page {
  let mut page = Page::new(content::PAGE_TITLE);
  page.push(Block::header(content::HEADING));
  page.push(Block::expander(content::ABOUT_TITLE, vec![Block::markdown(content::ABOUT)]));

  let pipeline = match Pipeline::from_source(config.function()) {
    Ok(pipeline) => pipeline,
    Err(err) => {
      warn!(function = config.function(), error = %err, "could not prepare function");
      page.push(Block::error(format!("Error parsing function: {err}")));
      return page;
    }
  };
  page.push(Block::code(format!("f(x) = {}", pipeline.expr())));

  page.push(Block::header("Learn the Concepts"));
  page.blocks.extend(CONCEPTS.iter().map(concept_block));

  page.push(Block::header("Tangent Line Visualizer"));
  render_tangent(&mut page, &pipeline, grid, config.tangent_x());

  page.push(Block::header("Limit Calculator"));
  render_limit(&mut page, &pipeline, config.limit_x());

  page.push(Block::header("Animation: Secant Line to Tangent"));
  if animate {
    let frames = secant_frames(&pipeline, grid, config.tangent_x());
    debug!(frames = frames.len(), "rendered animation");
    page.push(Block::Animation { frames });
  }

  page.push(Block::header("Problem Set"));
  page.blocks.extend(PROBLEMS.iter().enumerate().map(|(i, problem)| problem_block(problem, config.is_revealed(i))));

  page.push(Block::header("Real-World Application"));
  page.push(application_block());

  page
}

fn render_tangent(page: &mut Page, pipeline: &Pipeline, grid: &SampleGrid, a: f64) {
  let tangent = Tangent::at(pipeline, a);
  page.push(Block::Plot { figure: tangent.figure(pipeline, grid) });
  page.blocks.extend(tangent.describe(pipeline).into_iter().map(Block::markdown));
}

fn render_limit(page: &mut Page, pipeline: &Pipeline, point: f64) {
  let pair = match pipeline.limit_at(point) {
    Ok(pair) => pair,
    Err(err) => {
      page.push(Block::error(format!("Limit error: {err}")));
      return;
    }
  };
  page.push(Block::latex(format!(
    "\\text{{Left Limit: }} \\lim_{{x \\to {point:.1}^-}} f(x) = {}",
    pair.left.to_latex(),
  )));
  page.push(Block::latex(format!(
    "\\text{{Right Limit: }} \\lim_{{x \\to {point:.1}^+}} f(x) = {}",
    pair.right.to_latex(),
  )));
  if pair.exists() {
    page.push(Block::success(format!("\u{2705} Limit exists and equals `{}`", pair.left)));
  } else if pair.left == pair.right {
    page.push(Block::error(format!("\u{274c} Limit does not exist (f is undefined near x = {point:.1})")));
  } else {
    page.push(Block::error("\u{274c} Limit does not exist (left \u{2260} right)"));
  }
}

fn concept_block(concept: &Concept) -> Block {
  let mut blocks = vec![Block::markdown(concept.intro)];
  if let Some(formula) = concept.formula {
    blocks.push(Block::latex(formula));
  }
  blocks.push(Block::markdown(concept.note));
  Block::expander(concept.title, blocks)
}

fn problem_block(problem: &Problem, revealed: bool) -> Block {
  let mut blocks = vec![Block::markdown(problem.statement)];
  if revealed {
    blocks.extend(problem.solution.iter().map(|line| Block::latex(*line)));
  }
  Block::expander(problem.title, blocks)
}

fn application_block() -> Block {
  let mut blocks = vec![Block::markdown(APPLICATION.intro)];
  for (text, formula) in APPLICATION.steps {
    blocks.push(Block::markdown(*text));
    blocks.push(Block::latex(*formula));
  }
  blocks.push(Block::markdown(APPLICATION.conclusion));
  Block::expander(APPLICATION.title, blocks)
}
