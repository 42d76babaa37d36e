use super::Simplifier;
use crate::expr::Expr;
use crate::expr::walker::map_postorder;
use crate::util::stricteq::StrictEq;

/// A sequence of node-local stages, applied in order at every node.
/// Whole-tree passes repeat until one changes nothing, or until
/// `max_passes` is reached.
pub struct Passes {
  stages: Vec<Box<dyn Simplifier>>,
  max_passes: usize,
}

impl Passes {
  pub fn new(max_passes: usize) -> Self {
    Self { stages: Vec::new(), max_passes }
  }

  pub fn with_stage(mut self, stage: impl Simplifier + 'static) -> Self {
    self.stages.push(Box::new(stage));
    self
  }
}

impl Simplifier for Passes {
  fn simplify_expr_part(&self, expr: Expr) -> Expr {
    self.stages.iter().fold(expr, |e, stage| stage.simplify_expr_part(e))
  }

  fn simplify_expr(&self, mut expr: Expr) -> Expr {
    for _ in 0..self.max_passes {
      let next = map_postorder(expr.clone(), |e| self.simplify_expr_part(e));
      if next.strict_eq(&expr) {
        break;
      }
      expr = next;
    }
    expr
  }
}
