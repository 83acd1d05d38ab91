//! Integration tests for trigger-word rewriting.

use rayon::prelude::*;
use term_rewrite::prelude::*;
use term_rewrite::query::walk_leaves;

fn metal_config() -> RewriteConfig {
    RewriteConfig::builder()
        .trigger_words(["hetfield", "metallica", "pantera"])
        .injected_term("album", "metal")
        .build()
        .unwrap()
}

fn word(field: &str, value: &str) -> TermNode {
    TermNode::from(WordTerm::new(field, value))
}

#[test]
fn test_single_trigger_word_is_wrapped() -> Result<()> {
    let engine = RewriteEngine::new(&metal_config())?;
    let mut tree = QueryTree::new(word("artist", "hetfield"));

    engine.rewrite(&mut tree)?;

    assert_eq!(
        tree.root(),
        &TermNode::from(CompositeTerm::or(vec![
            word("artist", "hetfield"),
            word("album", "metal"),
        ]))
    );
    Ok(())
}

#[test]
fn test_unmatched_query_is_identity() -> Result<()> {
    let config = RewriteConfig::new(["hetfield"], "album", "metal");
    let engine = RewriteEngine::new(&config)?;
    let mut tree = QueryTree::new(word("title", "drum"));
    let root_before: *const TermNode = tree.root();

    let outcome = engine.rewrite(&mut tree)?;

    assert_eq!(outcome, RewriteOutcome::Unchanged);
    assert_eq!(tree.root(), &word("title", "drum"));
    assert!(std::ptr::eq(root_before, tree.root()));
    Ok(())
}

#[test]
fn test_match_inside_conjunction_wraps_root() -> Result<()> {
    let config = RewriteConfig::new(["metallica"], "album", "metal");
    let engine = RewriteEngine::new(&config)?;
    let and = TermNode::from(CompositeTerm::and(vec![
        word("artist", "metallica"),
        word("title", "master"),
    ]));
    let mut tree = QueryTree::new(and.clone());

    engine.rewrite(&mut tree)?;

    let root = tree.root().as_composite().unwrap();
    assert_eq!(root.operator(), Operator::Or);
    assert_eq!(root.len(), 2);
    assert_eq!(root.children()[0], and);
    assert_eq!(root.children()[1], word("album", "metal"));
    Ok(())
}

#[test]
fn test_empty_trigger_set_is_identity() -> Result<()> {
    let config = RewriteConfig::new(Vec::<String>::new(), "album", "metal");
    let engine = RewriteEngine::new(&config)?;

    for query in [
        "artist:hetfield",
        "artist:metallica AND title:master",
        "(a:1 OR b:2) c:3",
    ] {
        let mut tree = QueryParser::new().parse(query)?;
        let before = tree.clone();
        assert_eq!(engine.rewrite(&mut tree)?, RewriteOutcome::Unchanged);
        assert_eq!(tree, before);
    }
    Ok(())
}

#[test]
fn test_yql_pipeline_adds_or_term() -> Result<()> {
    let pipeline = Pipeline::builder()
        .stage(QueryInserter::new())
        .stage(RewriteEngine::new(&metal_config())?)
        .build();

    let request = SearchRequest::from_yql(
        "select * from sources * where artist contains \"hetfield\" and title contains\"master of puppets\";",
    )
    .with_trace_level(6);
    let result = pipeline.search(request)?;

    // The root is an OR and its only word child is album:metal.
    let root = result.query.root().as_composite().unwrap();
    assert_eq!(root.operator(), Operator::Or);
    for child in root.children() {
        if let Some(term) = child.as_word() {
            assert_eq!(term.to_string(), "album:metal");
        }
    }
    assert!(
        result
            .trace
            .messages()
            .any(|m| m.starts_with("added album:metal because artist:hetfield"))
    );
    Ok(())
}

#[test]
fn test_mock_backend_hits_are_returned() -> Result<()> {
    let tree = QueryTree::new(word("title", "drum"));
    let source = term_rewrite::pipeline::DocumentSource::new().with_result(
        &tree,
        vec![Hit::new("hit:1", 0.9), Hit::new("hit:2", 0.8)],
    );

    // No trigger words configured: the rewrite stage is a pass-through.
    let engine = RewriteEngine::new(&RewriteConfig::new(Vec::<String>::new(), "album", "metal"))?;
    let pipeline = Pipeline::builder().stage(engine).backend(source).build();

    let result = pipeline.search(SearchRequest::from_tree(tree).with_trace_level(6))?;

    assert_eq!(result.total_hits, 2, "Document source hits are returned");
    assert_eq!(result.hits[1].id, "hit:2");
    Ok(())
}

#[test]
fn test_rewritten_tree_keeps_every_original_leaf() -> Result<()> {
    let engine = RewriteEngine::new(&metal_config())?;
    let mut tree = QueryParser::new()
        .parse("(artist:pantera OR artist:slayer) AND (year:1990 OR year:1991)")?;
    let before: Vec<WordTerm> = tree.leaves().map(|l| l.cloned()).collect::<Result<_>>()?;

    engine.rewrite(&mut tree)?;

    let after: Vec<WordTerm> = walk_leaves(tree.root())
        .map(|l| l.cloned())
        .collect::<Result<_>>()?;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.last(), Some(&WordTerm::new("album", "metal")));
    Ok(())
}

#[test]
fn test_shared_engine_across_threads() -> Result<()> {
    let engine = RewriteEngine::new(&metal_config())?;
    let artists = ["metallica", "abba", "pantera", "queen"];

    let trees: Vec<QueryTree> = (0..256)
        .into_par_iter()
        .map(|i| {
            let mut tree = QueryTree::new(word("artist", artists[i % artists.len()]));
            engine.rewrite(&mut tree).map(|_| tree)
        })
        .collect::<Result<_>>()?;

    for (i, tree) in trees.iter().enumerate() {
        assert_eq!(tree.root().is_or(), i % 2 == 0);
    }
    Ok(())
}

#[test]
fn test_deterministic() -> Result<()> {
    let engine = RewriteEngine::new(&metal_config())?;
    let query = "artist:abba OR (artist:metallica AND title:one)";

    let mut first = QueryParser::new().parse(query)?;
    let mut second = QueryParser::new().parse(query)?;
    let a = engine.rewrite(&mut first)?;
    let b = engine.rewrite(&mut second)?;

    assert_eq!(a, b);
    assert_eq!(first, second);
    Ok(())
}
