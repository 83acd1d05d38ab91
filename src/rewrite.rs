//! Trigger-driven query rewriting.
//!
//! A [`RewriteEngine`] is built once from a [`RewriteConfig`] and then
//! applied to any number of independent query trees:
//!
//! ```
//! use term_rewrite::query::QueryParser;
//! use term_rewrite::rewrite::{RewriteConfig, RewriteEngine};
//!
//! # fn main() -> term_rewrite::error::Result<()> {
//! let config = RewriteConfig::builder()
//!     .trigger_words(["hetfield", "metallica", "pantera"])
//!     .injected_term("album", "metal")
//!     .build()?;
//! let engine = RewriteEngine::new(&config)?;
//!
//! let mut tree = QueryParser::new().parse("artist:metallica AND title:master")?;
//! let outcome = engine.rewrite(&mut tree)?;
//!
//! assert_eq!(tree.to_string(), "OR (AND artist:metallica title:master) album:metal");
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod outcome;

pub use config::{RewriteConfig, RewriteConfigBuilder};
pub use engine::RewriteEngine;
pub use outcome::RewriteOutcome;
