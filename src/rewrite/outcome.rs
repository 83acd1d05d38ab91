//! What a rewrite call did, for callers and for traces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::term::WordTerm;

/// Result of one rewrite call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RewriteOutcome {
    /// The root was wrapped in an OR with the injected term.
    Rewritten {
        /// The injected term.
        added: WordTerm,
        /// The first leaf that matched a trigger word.
        matched: WordTerm,
    },
    /// No leaf matched, or there are no trigger words.
    Unchanged,
    /// The root already carries the injected term.
    AlreadyRewritten {
        /// The injected term found at the root.
        injected: WordTerm,
    },
    /// The tree could not be inspected and was left as it was.
    Skipped {
        /// Why the rewrite was skipped.
        reason: String,
    },
}

impl RewriteOutcome {
    /// Check whether the tree was changed.
    pub fn is_rewritten(&self) -> bool {
        matches!(self, RewriteOutcome::Rewritten { .. })
    }

    /// Human-readable description of what happened.
    pub fn description(&self) -> String {
        match self {
            RewriteOutcome::Rewritten { added, matched } => format!(
                "added {added} because {matched} matched trigger \"{}\"",
                matched.value()
            ),
            RewriteOutcome::Unchanged => {
                "no trigger word matched, query left unchanged".to_string()
            }
            RewriteOutcome::AlreadyRewritten { injected } => {
                format!("{injected} already added, query left unchanged")
            }
            RewriteOutcome::Skipped { reason } => format!("rewrite skipped: {reason}"),
        }
    }
}

impl fmt::Display for RewriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
