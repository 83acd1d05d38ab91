//! Query term trees: leaves, composites, traversal and parsing.

pub mod composite;
pub mod node;
pub mod parser;
pub mod term;
pub mod tree;
pub mod walk;

pub use self::composite::{CompositeTerm, CompositeTermBuilder, Operator};
pub use self::node::{NodeView, QueryNode, TermNode};
pub use self::parser::QueryParser;
pub use self::term::WordTerm;
pub use self::tree::QueryTree;
pub use self::walk::{Leaves, find_leaf, walk_leaves};
