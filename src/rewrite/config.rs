//! Rewrite configuration: trigger words and the term to inject.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewriteError};

fn default_guard() -> bool {
    true
}

/// Configuration for a [`RewriteEngine`](super::RewriteEngine).
///
/// Loaded once at startup, validated when the engine is built and never
/// changed afterwards.
///
/// JSON format:
/// ```json
/// {
///   "trigger_words": ["hetfield", "metallica", "pantera"],
///   "injected_field": "album",
///   "injected_value": "metal"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Leaf values that trigger a rewrite. Matched exactly, case-sensitive.
    #[serde(default)]
    pub trigger_words: BTreeSet<String>,
    /// Field of the injected term.
    #[serde(default)]
    pub injected_field: String,
    /// Value of the injected term.
    #[serde(default)]
    pub injected_value: String,
    /// Leave trees alone that already carry the injected term at the root.
    #[serde(default = "default_guard")]
    pub guard_reapplication: bool,
}

impl RewriteConfig {
    /// Create a configuration.
    pub fn new<I, S, F, V>(trigger_words: I, injected_field: F, injected_value: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Into<String>,
        V: Into<String>,
    {
        RewriteConfig {
            trigger_words: trigger_words.into_iter().map(Into::into).collect(),
            injected_field: injected_field.into(),
            injected_value: injected_value.into(),
            guard_reapplication: true,
        }
    }

    /// Start building a configuration.
    pub fn builder() -> RewriteConfigBuilder {
        RewriteConfigBuilder::new()
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            RewriteError::configuration(format!("failed to parse rewrite config: {e}"))
        })
    }

    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RewriteError::configuration(format!(
                "failed to read rewrite config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            RewriteError::configuration(format!(
                "failed to parse rewrite config JSON from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Check the configuration.
    ///
    /// The injected field and value must be present and non-blank. An empty
    /// trigger set is valid and turns every rewrite into a no-op.
    pub fn validate(&self) -> Result<()> {
        if self.injected_field.trim().is_empty() {
            return Err(RewriteError::configuration(
                "injected_field must not be empty",
            ));
        }
        if self.injected_value.trim().is_empty() {
            return Err(RewriteError::configuration(
                "injected_value must not be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for [`RewriteConfig`].
#[derive(Debug, Clone)]
pub struct RewriteConfigBuilder {
    trigger_words: BTreeSet<String>,
    injected_field: String,
    injected_value: String,
    guard_reapplication: bool,
}

impl Default for RewriteConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteConfigBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        RewriteConfigBuilder {
            trigger_words: BTreeSet::new(),
            injected_field: String::new(),
            injected_value: String::new(),
            guard_reapplication: true,
        }
    }

    /// Add one trigger word.
    pub fn trigger_word<S: Into<String>>(mut self, word: S) -> Self {
        self.trigger_words.insert(word.into());
        self
    }

    /// Add several trigger words.
    pub fn trigger_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Set the term to inject.
    pub fn injected_term<F: Into<String>, V: Into<String>>(mut self, field: F, value: V) -> Self {
        self.injected_field = field.into();
        self.injected_value = value.into();
        self
    }

    /// Enable or disable the double application guard (default: enabled).
    pub fn guard_reapplication(mut self, guard: bool) -> Self {
        self.guard_reapplication = guard;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<RewriteConfig> {
        let config = RewriteConfig {
            trigger_words: self.trigger_words,
            injected_field: self.injected_field,
            injected_value: self.injected_value,
            guard_reapplication: self.guard_reapplication,
        };
        config.validate()?;
        Ok(config)
    }
}
