//! Word term: the leaf of a query tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A leaf condition matching a single field/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordTerm {
    /// The field to search in.
    field: String,
    /// The value to search for.
    value: String,
}

impl WordTerm {
    /// Create a new word term.
    ///
    /// The value is stored verbatim. Matching against trigger words is exact
    /// and case-sensitive, so normalize values before building terms if that
    /// is what the caller wants.
    pub fn new<F, V>(field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        WordTerm {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get a human-readable description of this term.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '(' | ')' | ':' | ';'))
}

impl fmt::Display for WordTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.value) {
            write!(
                f,
                "{}:\"{}\"",
                self.field,
                self.value.replace('\\', "\\\\").replace('"', "\\\"")
            )
        } else {
            write!(f, "{}:{}", self.field, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_term_creation() {
        let term = WordTerm::new("album", "metal");

        assert_eq!(term.field(), "album");
        assert_eq!(term.value(), "metal");
        assert_eq!(term.description(), "album:metal");
    }

    #[test]
    fn test_word_term_quoting() {
        let term = WordTerm::new("title", "master of puppets");
        assert_eq!(term.to_string(), "title:\"master of puppets\"");

        let term = WordTerm::new("title", "say \"hi\"");
        assert_eq!(term.to_string(), "title:\"say \\\"hi\\\"\"");

        let term = WordTerm::new("a", "x;y");
        assert_eq!(term.to_string(), "a:\"x;y\"");
    }

    #[test]
    fn test_word_term_equality_is_case_sensitive() {
        assert_eq!(WordTerm::new("a", "b"), WordTerm::new("a", "b"));
        assert_ne!(WordTerm::new("a", "B"), WordTerm::new("a", "b"));
    }
}
