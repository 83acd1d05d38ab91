//! Command line argument parsing for the term-rewrite CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// term-rewrite - trigger-driven query rewriting
#[derive(Parser, Debug, Clone)]
#[command(name = "term-rewrite")]
#[command(about = "Parse queries and rewrite them when they mention a trigger word")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TermRewriteArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TermRewriteArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a query and print its term tree
    Parse(ParseArgs),

    /// Parse a query and apply the rewrite rule to it
    Rewrite(RewriteArgs),

    /// Run a YQL query through the inserter, the rewrite rule and a mock backend
    Search(SearchArgs),
}

/// How the query argument is written.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Treat the query as YQL (`select * from sources * where ...`)
    #[arg(long)]
    pub yql: bool,

    /// Field for bare terms in the `field:value` syntax
    #[arg(long)]
    pub default_field: Option<String>,
}

/// Where the rewrite rule comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Rewrite configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TERM_REWRITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trigger words, replacing those from the configuration file
    #[arg(short, long = "trigger", value_delimiter = ',')]
    pub triggers: Vec<String>,

    /// Field of the injected term
    #[arg(long)]
    pub field: Option<String>,

    /// Value of the injected term
    #[arg(long)]
    pub value: Option<String>,

    /// Allow rewriting a query that already carries the injected term
    #[arg(long)]
    pub no_guard: bool,
}

/// Arguments for parsing
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for rewriting
#[derive(Parser, Debug, Clone)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub rule: RuleArgs,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// YQL query string
    #[arg(value_name = "YQL")]
    pub yql: String,

    #[command(flatten)]
    pub rule: RuleArgs,

    /// Canned backend results (JSON array of `{"query": ..., "hits": [...]}`)
    #[arg(long, value_name = "HITS_FILE")]
    pub hits: Option<PathBuf>,

    /// Trace level (0 disables tracing)
    #[arg(long, default_value = "6")]
    pub trace_level: u8,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
