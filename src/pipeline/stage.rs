//! Pipeline stage and backend traits.

use std::fmt::Debug;

use crate::error::Result;
use crate::pipeline::request::{Hit, SearchRequest};
use crate::rewrite::RewriteEngine;

/// A transformation applied to a request before it reaches the backend.
pub trait Stage: Send + Sync + Debug {
    /// Get the name of this stage for traces and logging.
    fn name(&self) -> &str;

    /// Transform the request in place.
    ///
    /// An error aborts the request.
    fn process(&self, request: &mut SearchRequest) -> Result<()>;
}

/// Produces hits for a fully transformed request.
pub trait Backend: Send + Sync + Debug {
    /// Get the name of this backend for traces and logging.
    fn name(&self) -> &str;

    /// Fetch the hits for the request's query tree.
    fn search(&self, request: &mut SearchRequest) -> Result<Vec<Hit>>;
}

impl Stage for RewriteEngine {
    fn name(&self) -> &str {
        "rewrite"
    }

    fn process(&self, request: &mut SearchRequest) -> Result<()> {
        let outcome = self.rewrite_or_keep(request.tree_mut());

        request.trace_mut().trace(2, "rewrite", outcome.description());
        if outcome.is_rewritten() && request.trace().is_enabled(3) {
            let rendered = request.tree().to_string();
            request
                .trace_mut()
                .trace(3, "rewrite", format!("query is now: {rendered}"));
        }
        Ok(())
    }
}
