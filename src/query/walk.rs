//! Depth-first leaf traversal over any [`QueryNode`] tree.

use std::iter::FusedIterator;

use crate::error::{Result, RewriteError};
use crate::query::node::{NodeView, QueryNode};
use crate::query::term::WordTerm;

/// Walk the leaves under `root`, depth-first and left to right.
///
/// Every call starts a fresh traversal. A malformed node produces one
/// `Err` item and ends the walk.
pub fn walk_leaves<N: QueryNode>(root: &N) -> Leaves<'_, N> {
    Leaves {
        stack: vec![(root, 0)],
        failed: false,
    }
}

/// Lazy iterator returned by [`walk_leaves`].
#[derive(Debug)]
pub struct Leaves<'a, N> {
    /// Pending nodes with their depth, top of stack is visited next.
    stack: Vec<(&'a N, usize)>,
    failed: bool,
}

impl<'a, N: QueryNode> Iterator for Leaves<'a, N> {
    type Item = Result<&'a WordTerm>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some((node, depth)) = self.stack.pop() {
            match node.view() {
                Some(NodeView::Leaf(term)) => return Some(Ok(term)),
                Some(NodeView::Composite(_, children)) => {
                    // Reversed so the leftmost child is popped first.
                    self.stack
                        .extend(children.iter().rev().map(|child| (child, depth + 1)));
                }
                None => {
                    self.failed = true;
                    self.stack.clear();
                    return Some(Err(RewriteError::malformed_tree(format!(
                        "node at depth {depth} is neither a leaf nor a composite"
                    ))));
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stack.is_empty() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<N: QueryNode> FusedIterator for Leaves<'_, N> {}

/// Check whether any leaf under `root` satisfies `predicate`.
///
/// Stops at the first matching leaf and returns it.
pub fn find_leaf<'a, N, P>(root: &'a N, mut predicate: P) -> Result<Option<&'a WordTerm>>
where
    N: QueryNode,
    P: FnMut(&WordTerm) -> bool,
{
    for leaf in walk_leaves(root) {
        let leaf = leaf?;
        if predicate(leaf) {
            return Ok(Some(leaf));
        }
    }
    Ok(None)
}
