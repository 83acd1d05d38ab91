//! Explicit search pipelines.
//!
//! A [`Pipeline`] runs an ordered list of [`Stage`]s over a
//! [`SearchRequest`] and then asks a [`Backend`] for hits. The rewrite
//! engine is one such stage:
//!
//! ```
//! use term_rewrite::pipeline::{Pipeline, QueryInserter, SearchRequest};
//! use term_rewrite::rewrite::{RewriteConfig, RewriteEngine};
//!
//! # fn main() -> term_rewrite::error::Result<()> {
//! let config = RewriteConfig::new(["hetfield"], "album", "metal");
//! let pipeline = Pipeline::builder()
//!     .stage(QueryInserter::new())
//!     .stage(RewriteEngine::new(&config)?)
//!     .build();
//!
//! let request = SearchRequest::from_yql(
//!     "select * from sources * where artist contains \"hetfield\";",
//! )
//! .with_trace_level(6);
//! let result = pipeline.search(request)?;
//!
//! assert!(result.query.root().is_or());
//! print!("{}", result.trace);
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod document_source;
pub mod inserter;
pub mod request;
pub mod stage;
pub mod trace;

pub use self::chain::{Pipeline, PipelineBuilder};
pub use self::document_source::DocumentSource;
pub use self::inserter::QueryInserter;
pub use self::request::{Hit, SearchRequest, SearchResult};
pub use self::stage::{Backend, Stage};
pub use self::trace::{Trace, TraceEntry};
