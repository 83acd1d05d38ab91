//! Ordered pipeline runner.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::pipeline::request::{SearchRequest, SearchResult};
use crate::pipeline::stage::{Backend, Stage};

/// Runs stages in order, then hands the request to a backend.
///
/// A pipeline holds no per-request state and can serve many requests in
/// parallel.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    backend: Option<Arc<dyn Backend>>,
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run one request through every stage and the backend.
    ///
    /// Without a backend the result has no hits.
    pub fn search(&self, mut request: SearchRequest) -> Result<SearchResult> {
        for stage in &self.stages {
            debug!("running stage '{}'", stage.name());
            stage.process(&mut request)?;
        }

        let hits = match &self.backend {
            Some(backend) => {
                debug!("searching backend '{}'", backend.name());
                backend.search(&mut request)?
            }
            None => Vec::new(),
        };

        Ok(SearchResult::new(request, hits))
    }

    /// Run independent requests in parallel.
    ///
    /// Results keep the order of `requests`.
    pub fn search_batch(&self, requests: Vec<SearchRequest>) -> Vec<Result<SearchResult>> {
        requests
            .into_par_iter()
            .map(|request| self.search(request))
            .collect()
    }
}

/// Builder for [`Pipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Stage>>,
    backend: Option<Arc<dyn Backend>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Append a stage that is shared with other pipelines.
    pub fn shared_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Set the backend.
    pub fn backend<B: Backend + 'static>(mut self, backend: B) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
            backend: self.backend,
        }
    }
}
