//! Request-scoped trace of what each stage did.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One trace message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Detail level of the message; lower is more important.
    pub level: u8,
    /// Name of the stage that wrote it.
    pub stage: String,
    /// The message.
    pub message: String,
}

/// Leveled trace collected while a request runs through a pipeline.
///
/// Level 0 disables tracing. A message is kept when its level is at most
/// the trace level of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    level: u8,
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Create a trace with the given level.
    pub fn new(level: u8) -> Self {
        Trace {
            level,
            entries: Vec::new(),
        }
    }

    /// Get the trace level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Check whether messages at `level` are kept.
    pub fn is_enabled(&self, level: u8) -> bool {
        level > 0 && level <= self.level
    }

    /// Record a message if its level is enabled.
    pub fn trace<S: Into<String>, M: Into<String>>(&mut self, level: u8, stage: S, message: M) {
        if self.is_enabled(level) {
            self.entries.push(TraceEntry {
                level,
                stage: stage.into(),
                message: message.into(),
            });
        }
    }

    /// Get the recorded entries, oldest first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Iterate over the recorded messages.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "[{}] {}", entry.stage, entry.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let mut trace = Trace::new(2);
        trace.trace(1, "a", "kept");
        trace.trace(2, "b", "kept too");
        trace.trace(3, "c", "dropped");

        assert_eq!(trace.entries().len(), 2);
        assert_eq!(trace.messages().collect::<Vec<_>>(), vec!["kept", "kept too"]);
        assert_eq!(trace.to_string(), "[a] kept\n[b] kept too\n");
    }

    #[test]
    fn test_disabled() {
        let mut trace = Trace::default();
        trace.trace(0, "a", "never");
        trace.trace(1, "a", "never");

        assert!(trace.is_empty());
        assert!(!trace.is_enabled(0));
    }
}
