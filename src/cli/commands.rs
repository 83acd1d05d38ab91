//! Command implementations for the term-rewrite CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::pipeline::{DocumentSource, Hit, Pipeline, QueryInserter, SearchRequest};
use crate::query::{QueryParser, QueryTree};
use crate::rewrite::{RewriteConfig, RewriteEngine};

/// Execute a CLI command.
pub fn execute_command(args: TermRewriteArgs) -> Result<()> {
    match &args.command {
        Command::Parse(parse_args) => parse_query(parse_args, &args),
        Command::Rewrite(rewrite_args) => rewrite_query(rewrite_args, &args),
        Command::Search(search_args) => search(search_args, &args),
    }
}

/// Parse a query and show its tree.
fn parse_query(args: &ParseArgs, cli_args: &TermRewriteArgs) -> Result<()> {
    let tree = read_query(&args.query)?;
    let leaf_count = tree.leaves().count();

    output_result(
        "Query parsed successfully",
        &ParseResult {
            query: tree.to_string(),
            leaf_count,
            tree,
        },
        cli_args,
    )
}

/// Parse a query and rewrite it.
fn rewrite_query(args: &RewriteArgs, cli_args: &TermRewriteArgs) -> Result<()> {
    let engine = RewriteEngine::new(&build_config(&args.rule)?)?;
    let mut tree = read_query(&args.query)?;
    let original = tree.to_string();

    let outcome = engine.rewrite(&mut tree)?;
    info!("{outcome}");

    output_result(
        "Rewrite finished",
        &RewriteResult {
            original,
            rewritten: tree.to_string(),
            description: outcome.description(),
            outcome,
            tree,
        },
        cli_args,
    )
}

/// Run a YQL query through a full pipeline.
fn search(args: &SearchArgs, cli_args: &TermRewriteArgs) -> Result<()> {
    let engine = RewriteEngine::new(&build_config(&args.rule)?)?;

    let mut source = DocumentSource::new();
    if let Some(path) = &args.hits {
        load_canned_hits(path, &mut source)?;
        debug!("loaded canned hits for {} queries", source.len());
    }

    let pipeline = Pipeline::builder()
        .stage(QueryInserter::new())
        .stage(engine)
        .backend(source)
        .build();

    let request = SearchRequest::from_yql(args.yql.clone()).with_trace_level(args.trace_level);
    let result = pipeline.search(request)?;

    output_result(
        "Search finished",
        &SearchOutput {
            query: result.query.to_string(),
            total_hits: result.total_hits,
            hits: result.hits,
            trace: result.trace.entries().to_vec(),
        },
        cli_args,
    )
}

fn read_query(args: &QueryArgs) -> Result<QueryTree> {
    let mut parser = QueryParser::new();
    if let Some(field) = &args.default_field {
        parser = parser.with_default_field(field.clone());
    }

    if args.yql {
        parser.parse_yql(&args.query)
    } else {
        parser.parse(&args.query)
    }
}

/// Combine the configuration file with command line overrides.
pub fn build_config(args: &RuleArgs) -> Result<RewriteConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("loading rewrite config from {}", path.display());
            RewriteConfig::load_from_file(path)?
        }
        None => RewriteConfig::new(Vec::<String>::new(), "", ""),
    };

    if !args.triggers.is_empty() {
        config.trigger_words = args
            .triggers
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    if let Some(field) = &args.field {
        config.injected_field = field.clone();
    }
    if let Some(value) = &args.value {
        config.injected_value = value.clone();
    }
    if args.no_guard {
        config.guard_reapplication = false;
    }

    config.validate()?;
    Ok(config)
}

#[derive(Debug, Deserialize)]
struct CannedResult {
    query: String,
    hits: Vec<Hit>,
}

fn load_canned_hits(path: &Path, source: &mut DocumentSource) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<CannedResult> = serde_json::from_str(&content)?;

    let parser = QueryParser::new();
    for entry in entries {
        let tree = parser.parse(&entry.query)?;
        source.add_result(&tree, entry.hits);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewriteError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_config_from_flags() {
        let args = RuleArgs {
            triggers: vec!["hetfield".to_string(), " ".to_string()],
            field: Some("album".to_string()),
            value: Some("metal".to_string()),
            ..RuleArgs::default()
        };

        let config = build_config(&args).unwrap();
        assert_eq!(config.trigger_words.len(), 1);
        assert_eq!(config.injected_field, "album");
    }

    #[test]
    fn test_build_config_requires_injected_term() {
        let args = RuleArgs {
            triggers: vec!["hetfield".to_string()],
            ..RuleArgs::default()
        };

        assert!(matches!(
            build_config(&args),
            Err(RewriteError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_config_file_with_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"trigger_words":["hetfield"],"injected_field":"album","injected_value":"metal"}}"#
        )
        .unwrap();

        let args = RuleArgs {
            config: Some(file.path().to_path_buf()),
            value: Some("thrash".to_string()),
            no_guard: true,
            ..RuleArgs::default()
        };

        let config = build_config(&args).unwrap();
        assert!(config.trigger_words.contains("hetfield"));
        assert_eq!(config.injected_value, "thrash");
        assert!(!config.guard_reapplication);
    }

    #[test]
    fn test_load_canned_hits() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"query":"title:drum","hits":[{{"id":"hit:1","relevance":0.9}},{{"id":"hit:2","relevance":0.8}}]}}]"#
        )
        .unwrap();

        let mut source = DocumentSource::new();
        load_canned_hits(file.path(), &mut source).unwrap();
        assert_eq!(source.len(), 1);
    }
}
