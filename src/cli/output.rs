//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TermRewriteArgs};
use crate::error::Result;
use crate::pipeline::{Hit, TraceEntry};
use crate::query::QueryTree;
use crate::rewrite::RewriteOutcome;

/// Result structure for the parse command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    pub query: String,
    pub leaf_count: usize,
    pub tree: QueryTree,
}

/// Result structure for the rewrite command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteResult {
    pub original: String,
    pub rewritten: String,
    pub description: String,
    pub outcome: RewriteOutcome,
    pub tree: QueryTree,
}

/// Result structure for the search command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub total_hits: usize,
    pub hits: Vec<Hit>,
    pub trace: Vec<TraceEntry>,
}

/// Plain-text rendering used by the human output format.
pub trait HumanReadable {
    /// Lines to print.
    fn human_lines(&self) -> Vec<String>;
}

impl HumanReadable for ParseResult {
    fn human_lines(&self) -> Vec<String> {
        vec![
            format!("Query: {}", self.query),
            format!("Leaves: {}", self.leaf_count),
        ]
    }
}

impl HumanReadable for RewriteResult {
    fn human_lines(&self) -> Vec<String> {
        vec![
            format!("Original:  {}", self.original),
            format!("Rewritten: {}", self.rewritten),
            format!("Reason:    {}", self.description),
        ]
    }
}

impl HumanReadable for SearchOutput {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Query: {}", self.query),
            format!("Found {} hit(s)", self.total_hits),
        ];
        for (i, hit) in self.hits.iter().enumerate() {
            lines.push(format!("{}. {} (relevance: {:.4})", i + 1, hit.id, hit.relevance));
        }
        if !self.trace.is_empty() {
            lines.push(String::new());
            lines.push("Trace:".to_string());
            for entry in &self.trace {
                lines.push(format!("  [{}] {}", entry.stage, entry.message));
            }
        }
        lines
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TermRewriteArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReadable>(message: &str, result: &T, args: &TermRewriteArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TermRewriteArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{TermNode, WordTerm};

    #[test]
    fn test_rewrite_result_lines() {
        let result = RewriteResult {
            original: "artist:hetfield".to_string(),
            rewritten: "OR artist:hetfield album:metal".to_string(),
            description: "added album:metal".to_string(),
            outcome: RewriteOutcome::Unchanged,
            tree: QueryTree::new(TermNode::from(WordTerm::new("artist", "hetfield"))),
        };

        let lines = result.human_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("OR artist:hetfield album:metal"));
    }

    #[test]
    fn test_search_output_lines() {
        let output = SearchOutput {
            query: "title:drum".to_string(),
            total_hits: 1,
            hits: vec![Hit::new("hit:1", 0.9)],
            trace: vec![TraceEntry {
                level: 2,
                stage: "rewrite".to_string(),
                message: "no trigger word matched, query left unchanged".to_string(),
            }],
        };

        let lines = output.human_lines();
        assert_eq!(lines[2], "1. hit:1 (relevance: 0.9000)");
        assert_eq!(lines.last().map(String::as_str), Some("  [rewrite] no trigger word matched, query left unchanged"));
    }
}
