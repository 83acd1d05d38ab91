//! Search requests, hits and results passed through a pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::trace::Trace;
use crate::query::tree::QueryTree;

/// A search hit returned by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The document ID.
    pub id: String,
    /// The relevance score.
    pub relevance: f64,
    /// The document fields (if any).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
}

impl Hit {
    /// Create a hit without fields.
    pub fn new<S: Into<String>>(id: S, relevance: f64) -> Self {
        Hit {
            id: id.into(),
            relevance,
            fields: HashMap::new(),
        }
    }

    /// Attach a field value.
    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A query on its way through a pipeline.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    yql: Option<String>,
    tree: QueryTree,
    trace: Trace,
}

impl SearchRequest {
    /// Create a request with an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request carrying a YQL string for a parsing stage.
    pub fn from_yql<S: Into<String>>(yql: S) -> Self {
        SearchRequest {
            yql: Some(yql.into()),
            ..Self::default()
        }
    }

    /// Create a request from an already built tree.
    pub fn from_tree(tree: QueryTree) -> Self {
        SearchRequest {
            tree,
            ..Self::default()
        }
    }

    /// Set the trace level (0 disables tracing).
    pub fn with_trace_level(mut self, level: u8) -> Self {
        self.trace = Trace::new(level);
        self
    }

    /// Get the YQL string, if any.
    pub fn yql(&self) -> Option<&str> {
        self.yql.as_deref()
    }

    /// Get the query tree.
    pub fn tree(&self) -> &QueryTree {
        &self.tree
    }

    /// Get the query tree mutably.
    pub fn tree_mut(&mut self) -> &mut QueryTree {
        &mut self.tree
    }

    /// Replace the query tree.
    pub fn set_tree(&mut self, tree: QueryTree) {
        self.tree = tree;
    }

    /// Get the trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Get the trace mutably.
    pub fn trace_mut(&mut self) -> &mut Trace {
        &mut self.trace
    }

    /// Split the request into its final tree and trace.
    pub fn into_parts(self) -> (QueryTree, Trace) {
        (self.tree, self.trace)
    }
}

/// Outcome of running a request through a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The query tree after every stage ran.
    pub query: QueryTree,
    /// The hits returned by the backend.
    pub hits: Vec<Hit>,
    /// Total number of hits.
    pub total_hits: usize,
    /// Trace collected along the way.
    pub trace: Trace,
}

impl SearchResult {
    /// Build a result from a finished request and its hits.
    pub fn new(request: SearchRequest, hits: Vec<Hit>) -> Self {
        let (query, trace) = request.into_parts();
        SearchResult {
            query,
            total_hits: hits.len(),
            hits,
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::node::TermNode;
    use crate::query::term::WordTerm;

    #[test]
    fn test_request_construction() {
        let request = SearchRequest::from_yql("select * from sources * where a contains \"b\"")
            .with_trace_level(3);
        assert!(request.yql().is_some());
        assert!(request.tree().is_empty());
        assert_eq!(request.trace().level(), 3);

        let tree = QueryTree::new(TermNode::from(WordTerm::new("title", "drum")));
        let request = SearchRequest::from_tree(tree.clone());
        assert_eq!(request.tree(), &tree);
        assert!(request.yql().is_none());
    }

    #[test]
    fn test_result_from_request() {
        let request = SearchRequest::new();
        let result = SearchResult::new(request, vec![Hit::new("hit:1", 0.9)]);

        assert_eq!(result.total_hits, 1);
        assert_eq!(result.hits[0].id, "hit:1");
    }
}
