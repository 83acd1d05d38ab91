//! Trigger-word rewrite engine.

use std::path::Path;

use ahash::AHashSet;
use log::{debug, warn};

use crate::error::Result;
use crate::query::composite::Operator;
use crate::query::node::{NodeView, QueryNode};
use crate::query::term::WordTerm;
use crate::query::tree::QueryTree;
use crate::query::walk::find_leaf;

use super::config::RewriteConfig;
use super::outcome::RewriteOutcome;

/// Adds a synthetic term to queries that mention a trigger word.
///
/// When any leaf value equals a trigger word, the root `R` is replaced by
/// `OR(R, injected)`. Only the root is rewritten, never inner subtrees.
///
/// The engine holds no mutable state and can be shared across threads.
///
/// # Example
///
/// ```
/// use term_rewrite::query::{QueryTree, TermNode, WordTerm};
/// use term_rewrite::rewrite::{RewriteConfig, RewriteEngine};
///
/// let config = RewriteConfig::new(["hetfield"], "album", "metal");
/// let engine = RewriteEngine::new(&config).unwrap();
///
/// let mut tree = QueryTree::new(TermNode::from(WordTerm::new("artist", "hetfield")));
/// let outcome = engine.rewrite(&mut tree).unwrap();
///
/// assert!(outcome.is_rewritten());
/// assert_eq!(tree.to_string(), "OR artist:hetfield album:metal");
/// ```
#[derive(Debug, Clone)]
pub struct RewriteEngine {
    trigger_words: AHashSet<String>,
    injected: WordTerm,
    guard_reapplication: bool,
}

impl RewriteEngine {
    /// Create an engine from a validated configuration.
    ///
    /// Fails with [`RewriteError::Configuration`](crate::error::RewriteError::Configuration)
    /// when the injected field or value is empty.
    pub fn new(config: &RewriteConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            "rewrite engine: {} trigger word(s), injects {}:{}",
            config.trigger_words.len(),
            config.injected_field,
            config.injected_value
        );

        Ok(RewriteEngine {
            trigger_words: config.trigger_words.iter().cloned().collect(),
            injected: WordTerm::new(
                config.injected_field.clone(),
                config.injected_value.clone(),
            ),
            guard_reapplication: config.guard_reapplication,
        })
    }

    /// Create an engine from a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(&RewriteConfig::load_from_file(path)?)
    }

    /// The term this engine injects.
    pub fn injected_term(&self) -> &WordTerm {
        &self.injected
    }

    /// Check whether `value` is a trigger word.
    pub fn is_trigger(&self, value: &str) -> bool {
        self.trigger_words.contains(value)
    }

    /// Number of configured trigger words.
    pub fn trigger_count(&self) -> usize {
        self.trigger_words.len()
    }

    /// Find the first leaf under `root` whose value is a trigger word.
    pub fn find_trigger<'a, N: QueryNode>(&self, root: &'a N) -> Result<Option<&'a WordTerm>> {
        if self.trigger_words.is_empty() {
            return Ok(None);
        }
        find_leaf(root, |leaf| self.is_trigger(leaf.value()))
    }

    /// Check whether `root` is already `OR(_, injected)`.
    pub fn is_rewritten<N: QueryNode>(&self, root: &N) -> bool {
        match root.view() {
            Some(NodeView::Composite(Operator::Or, [_, second])) => {
                matches!(second.view(), Some(NodeView::Leaf(term)) if *term == self.injected)
            }
            _ => false,
        }
    }

    /// Rewrite `tree` in place when it contains a trigger word.
    ///
    /// An unmatched tree is not touched. A malformed tree yields
    /// [`RewriteError::MalformedTree`](crate::error::RewriteError::MalformedTree)
    /// and is also left as it was.
    pub fn rewrite<N: QueryNode>(&self, tree: &mut QueryTree<N>) -> Result<RewriteOutcome> {
        if self.trigger_words.is_empty() {
            return Ok(RewriteOutcome::Unchanged);
        }

        let matched = match self.find_trigger(tree.root())? {
            Some(leaf) => leaf.clone(),
            None => return Ok(RewriteOutcome::Unchanged),
        };

        if self.guard_reapplication && self.is_rewritten(tree.root()) {
            debug!("{} already present at the root, not rewriting", self.injected);
            return Ok(RewriteOutcome::AlreadyRewritten {
                injected: self.injected.clone(),
            });
        }

        tree.wrap_root(N::disjunction(Vec::new()), |old_root| {
            N::disjunction(vec![old_root, N::word(self.injected.clone())])
        });

        debug!("added {} because {} matched", self.injected, matched);

        Ok(RewriteOutcome::Rewritten {
            added: self.injected.clone(),
            matched,
        })
    }

    /// Rewrite `tree`, keeping it unchanged when it cannot be inspected.
    ///
    /// A malformed tree is logged and passed on untouched instead of
    /// failing the request.
    pub fn rewrite_or_keep<N: QueryNode>(&self, tree: &mut QueryTree<N>) -> RewriteOutcome {
        match self.rewrite(tree) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("keeping original query: {e}");
                RewriteOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }
}
