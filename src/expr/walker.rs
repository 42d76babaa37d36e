//! Bottom-up traversals of an expression tree.

use super::Expr;

/// Rebuilds `expr` bottom-up, replacing every node (children first)
/// with `f` applied to it.
pub fn map_postorder<F>(expr: Expr, mut f: F) -> Expr
where F: FnMut(Expr) -> Expr {
  fn go<F: FnMut(Expr) -> Expr>(expr: Expr, f: &mut F) -> Expr {
    let rebuilt = match expr {
      Expr::BinaryOp(op, left, right) => {
        let left = go(*left, f);
        Expr::binary(op, left, go(*right, f))
      }
      Expr::UnaryFunc(func, arg) => Expr::call(func, go(*arg, f)),
      leaf => leaf,
    };
    f(rebuilt)
  }
  go(expr, &mut f)
}

/// Calls `f` on every node of `expr`, children before parents.
pub fn visit_postorder<'e, F>(expr: &'e Expr, mut f: F)
where F: FnMut(&'e Expr) {
  fn go<'e, F: FnMut(&'e Expr)>(expr: &'e Expr, f: &mut F) {
    for child in expr.children() {
      go(child, f);
    }
    f(expr);
  }
  go(expr, &mut f)
}

/// Whether `pred` holds for `expr` or any node beneath it. Stops at
/// the first match.
pub fn any<F>(expr: &Expr, pred: F) -> bool
where F: Fn(&Expr) -> bool {
  fn go<F: Fn(&Expr) -> bool>(expr: &Expr, pred: &F) -> bool {
    pred(expr) || expr.children().into_iter().any(|child| go(child, pred))
  }
  go(expr, &pred)
}

/// The number of nodes on the longest path from the root of `expr` to
/// a leaf. Iterative, so it is safe on arbitrarily deep trees.
pub fn depth(expr: &Expr) -> usize {
  let mut deepest = 0;
  let mut stack = vec![(expr, 1)];
  while let Some((node, level)) = stack.pop() {
    deepest = deepest.max(level);
    stack.extend(node.children().into_iter().map(|child| (child, level + 1)));
  }
  deepest
}

impl Expr {
  /// Immediate subexpressions, left to right.
  pub fn children(&self) -> Vec<&Expr> {
    match self {
      Expr::Constant(_) | Expr::Variable(_) => vec![],
      Expr::BinaryOp(_, left, right) => vec![&**left, &**right],
      Expr::UnaryFunc(_, arg) => vec![&**arg],
    }
  }
}
