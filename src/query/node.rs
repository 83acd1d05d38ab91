//! Query tree nodes and the node-capability interface used by traversal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::composite::{CompositeTerm, Operator};
use crate::query::term::WordTerm;

/// What a node looks like to traversal and rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeView<'a, N> {
    /// A field/value leaf.
    Leaf(&'a WordTerm),
    /// An interior node and its ordered children.
    Composite(Operator, &'a [N]),
}

/// Capability interface a tree node exposes.
///
/// Traversal and rewriting only go through this trait, so any tree type
/// that can report leaves and composites can be rewritten.
pub trait QueryNode: Sized {
    /// View this node as a leaf or a composite.
    ///
    /// `None` marks a malformed node that is neither.
    fn view(&self) -> Option<NodeView<'_, Self>>;

    /// Build an OR node over the given children, in order.
    fn disjunction(children: Vec<Self>) -> Self;

    /// Build a leaf node.
    fn word(term: WordTerm) -> Self;
}

/// The default tree node: a word leaf or a boolean composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TermNode {
    /// A field/value leaf.
    Word(WordTerm),
    /// An AND/OR combination of sub-terms.
    Composite(CompositeTerm),
}

impl TermNode {
    /// Get the leaf term, if this is a leaf.
    pub fn as_word(&self) -> Option<&WordTerm> {
        match self {
            TermNode::Word(term) => Some(term),
            TermNode::Composite(_) => None,
        }
    }

    /// Get the composite, if this is an interior node.
    pub fn as_composite(&self) -> Option<&CompositeTerm> {
        match self {
            TermNode::Word(_) => None,
            TermNode::Composite(composite) => Some(composite),
        }
    }

    /// Check if this is an OR composite.
    pub fn is_or(&self) -> bool {
        matches!(self, TermNode::Composite(c) if c.operator() == Operator::Or)
    }
}

impl QueryNode for TermNode {
    fn view(&self) -> Option<NodeView<'_, Self>> {
        Some(match self {
            TermNode::Word(term) => NodeView::Leaf(term),
            TermNode::Composite(composite) => {
                NodeView::Composite(composite.operator(), composite.children())
            }
        })
    }

    fn disjunction(children: Vec<Self>) -> Self {
        TermNode::Composite(CompositeTerm::or(children))
    }

    fn word(term: WordTerm) -> Self {
        TermNode::Word(term)
    }
}

impl From<WordTerm> for TermNode {
    fn from(term: WordTerm) -> Self {
        TermNode::Word(term)
    }
}

impl From<CompositeTerm> for TermNode {
    fn from(composite: CompositeTerm) -> Self {
        TermNode::Composite(composite)
    }
}

impl fmt::Display for TermNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermNode::Word(term) => fmt::Display::fmt(term, f),
            TermNode::Composite(composite) => fmt::Display::fmt(composite, f),
        }
    }
}
