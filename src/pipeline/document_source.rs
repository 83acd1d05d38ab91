//! In-memory backend that serves canned hits per query.

use std::collections::HashMap;

use crate::error::Result;
use crate::pipeline::request::{Hit, SearchRequest};
use crate::pipeline::stage::Backend;
use crate::query::tree::QueryTree;

/// A mock backend returning hits registered for a query tree.
///
/// Queries are keyed by their rendering, so a tree changed by an earlier
/// stage no longer finds the hits registered for the original one.
#[derive(Debug, Default, Clone)]
pub struct DocumentSource {
    results: HashMap<String, Vec<Hit>>,
}

impl DocumentSource {
    /// Create an empty document source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the hits to return for `query`.
    pub fn add_result(&mut self, query: &QueryTree, hits: Vec<Hit>) {
        self.results.insert(query.to_string(), hits);
    }

    /// Builder-style variant of [`add_result`](Self::add_result).
    pub fn with_result(mut self, query: &QueryTree, hits: Vec<Hit>) -> Self {
        self.add_result(query, hits);
        self
    }

    /// Number of registered queries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no query is registered.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl Backend for DocumentSource {
    fn name(&self) -> &str {
        "document-source"
    }

    fn search(&self, request: &mut SearchRequest) -> Result<Vec<Hit>> {
        let key = request.tree().to_string();
        let hits = self.results.get(&key).cloned().unwrap_or_default();

        if request.trace().is_enabled(2) {
            request
                .trace_mut()
                .trace(2, self.name(), format!("{} hit(s) for {key}", hits.len()));
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::node::TermNode;
    use crate::query::term::WordTerm;

    #[test]
    fn test_returns_registered_hits() {
        let tree = QueryTree::new(TermNode::from(WordTerm::new("title", "drum")));
        let source = DocumentSource::new()
            .with_result(&tree, vec![Hit::new("hit:1", 0.9), Hit::new("hit:2", 0.8)]);

        let mut request = SearchRequest::from_tree(tree);
        let hits = source.search(&mut request).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "hit:1");
    }

    #[test]
    fn test_unknown_query_has_no_hits() {
        let source = DocumentSource::new();
        let mut request = SearchRequest::new().with_trace_level(2);

        assert!(source.search(&mut request).unwrap().is_empty());
        assert_eq!(
            request.trace().messages().collect::<Vec<_>>(),
            vec!["0 hit(s) for AND"]
        );
    }

    #[test]
    fn test_no_trace_when_disabled() {
        let tree = QueryTree::new(TermNode::from(WordTerm::new("title", "drum")));
        let source = DocumentSource::new().with_result(&tree, vec![Hit::new("hit:1", 0.9)]);

        let mut request = SearchRequest::from_tree(tree);
        assert_eq!(source.search(&mut request).unwrap().len(), 1);
        assert!(request.trace().is_empty());
    }
}
