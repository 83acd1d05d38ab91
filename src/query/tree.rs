//! Query tree: the single-rooted term expression owned by a request.

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::query::composite::{CompositeTerm, Operator};
use crate::query::node::{QueryNode, TermNode};
use crate::query::walk::{Leaves, walk_leaves};

/// A query tree with exactly one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryTree<N = TermNode> {
    root: N,
}

impl<N: QueryNode> QueryTree<N> {
    /// Create a tree from its root node.
    pub fn new(root: N) -> Self {
        QueryTree { root }
    }

    /// Get the root node.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Get the root node mutably.
    pub fn root_mut(&mut self) -> &mut N {
        &mut self.root
    }

    /// Consume the tree and return its root.
    pub fn into_root(self) -> N {
        self.root
    }

    /// Swap in a new root and return the old one.
    pub fn replace_root(&mut self, new_root: N) -> N {
        mem::replace(&mut self.root, new_root)
    }

    /// Replace the root with one built from the old root.
    ///
    /// `placeholder` briefly stands in for the root while `wrap` runs.
    pub fn wrap_root<F>(&mut self, placeholder: N, wrap: F)
    where
        F: FnOnce(N) -> N,
    {
        let old = mem::replace(&mut self.root, placeholder);
        self.root = wrap(old);
    }

    /// Walk the leaves of this tree.
    pub fn leaves(&self) -> Leaves<'_, N> {
        walk_leaves(&self.root)
    }
}

impl QueryTree<TermNode> {
    /// Create a tree with no leaves.
    pub fn empty() -> Self {
        QueryTree::new(TermNode::Composite(CompositeTerm::new(Operator::And)))
    }

    /// Check if the tree has no leaves at all.
    pub fn is_empty(&self) -> bool {
        self.leaves().next().is_none()
    }
}

impl Default for QueryTree<TermNode> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N: fmt::Display> fmt::Display for QueryTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl From<TermNode> for QueryTree<TermNode> {
    fn from(root: TermNode) -> Self {
        QueryTree::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::term::WordTerm;

    #[test]
    fn test_replace_root() {
        let mut tree = QueryTree::new(TermNode::from(WordTerm::new("title", "drum")));

        let old = tree.replace_root(TermNode::from(WordTerm::new("title", "bass")));

        assert_eq!(old, TermNode::from(WordTerm::new("title", "drum")));
        assert_eq!(tree.to_string(), "title:bass");
    }

    #[test]
    fn test_wrap_root() {
        let mut tree = QueryTree::new(TermNode::from(WordTerm::new("artist", "hetfield")));

        tree.wrap_root(TermNode::disjunction(Vec::new()), |old| {
            TermNode::disjunction(vec![old, TermNode::word(WordTerm::new("album", "metal"))])
        });

        assert_eq!(tree.to_string(), "OR artist:hetfield album:metal");
    }

    #[test]
    fn test_empty_tree() {
        let tree = QueryTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.leaves().count(), 0);
        assert_eq!(tree.to_string(), "AND");

        let tree = QueryTree::from(TermNode::from(WordTerm::new("a", "b")));
        assert!(!tree.is_empty());
    }
}
