//! # term-rewrite
//!
//! Trigger-driven rewriting of boolean query term trees.
//!
//! ## Features
//!
//! - Query term trees of word leaves and AND/OR composites
//! - Depth-first leaf traversal over any node type
//! - A `field:value` query parser and a YQL subset parser
//! - A rewrite engine that ORs a synthetic term into queries mentioning a
//!   configured trigger word
//! - Ordered search pipelines with tracing and a mock document source

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod rewrite;

pub mod prelude {
    pub use crate::error::{Result, RewriteError};
    pub use crate::pipeline::{Hit, Pipeline, QueryInserter, SearchRequest, SearchResult};
    pub use crate::query::{CompositeTerm, Operator, QueryParser, QueryTree, TermNode, WordTerm};
    pub use crate::rewrite::{RewriteConfig, RewriteEngine, RewriteOutcome};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
