//! Composite term for combining sub-terms with boolean logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::node::TermNode;

/// Boolean operator of a composite term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => write!(f, "AND"),
            Operator::Or => write!(f, "OR"),
        }
    }
}

/// An interior node combining ordered children with one operator.
///
/// Child order is kept for display. It does not affect matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeTerm {
    operator: Operator,
    children: Vec<TermNode>,
}

impl CompositeTerm {
    /// Create a new composite with no children.
    pub fn new(operator: Operator) -> Self {
        CompositeTerm {
            operator,
            children: Vec::new(),
        }
    }

    /// Create a composite from existing children.
    pub fn with_children(operator: Operator, children: Vec<TermNode>) -> Self {
        CompositeTerm { operator, children }
    }

    /// Create an AND composite.
    pub fn and(children: Vec<TermNode>) -> Self {
        CompositeTerm::with_children(Operator::And, children)
    }

    /// Create an OR composite.
    pub fn or(children: Vec<TermNode>) -> Self {
        CompositeTerm::with_children(Operator::Or, children)
    }

    /// Append a child.
    pub fn add_child(&mut self, child: TermNode) {
        self.children.push(child);
    }

    /// Get the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the children.
    pub fn children(&self) -> &[TermNode] {
        &self.children
    }

    /// Consume the composite and return its children.
    pub fn into_children(self) -> Vec<TermNode> {
        self.children
    }

    /// Check if this composite has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }
}

impl fmt::Display for CompositeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator)?;
        for child in &self.children {
            match child {
                TermNode::Composite(inner) => write!(f, " ({inner})")?,
                other => write!(f, " {other}")?,
            }
        }
        Ok(())
    }
}

/// Builder for creating composite terms.
#[derive(Debug)]
pub struct CompositeTermBuilder {
    term: CompositeTerm,
}

impl CompositeTermBuilder {
    /// Create a new builder for the given operator.
    pub fn new(operator: Operator) -> Self {
        CompositeTermBuilder {
            term: CompositeTerm::new(operator),
        }
    }

    /// Add a child node.
    pub fn child<N: Into<TermNode>>(mut self, child: N) -> Self {
        self.term.add_child(child.into());
        self
    }

    /// Build the composite term.
    pub fn build(self) -> CompositeTerm {
        self.term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::term::WordTerm;

    #[test]
    fn test_composite_creation() {
        let term = CompositeTerm::new(Operator::And);

        assert!(term.is_empty());
        assert_eq!(term.len(), 0);
        assert_eq!(term.operator(), Operator::And);
    }

    #[test]
    fn test_composite_builder() {
        let term = CompositeTermBuilder::new(Operator::Or)
            .child(WordTerm::new("artist", "metallica"))
            .child(WordTerm::new("artist", "pantera"))
            .build();

        assert_eq!(term.len(), 2);
        assert_eq!(term.operator(), Operator::Or);
        assert_eq!(term.to_string(), "OR artist:metallica artist:pantera");
    }

    #[test]
    fn test_nested_display() {
        let inner = CompositeTermBuilder::new(Operator::And)
            .child(WordTerm::new("artist", "hetfield"))
            .child(WordTerm::new("title", "master of puppets"))
            .build();
        let outer = CompositeTermBuilder::new(Operator::Or)
            .child(inner)
            .child(WordTerm::new("album", "metal"))
            .build();

        assert_eq!(
            outer.to_string(),
            "OR (AND artist:hetfield title:\"master of puppets\") album:metal"
        );
    }
}
