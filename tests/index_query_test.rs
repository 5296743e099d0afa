//! Integration tests for index construction and query evaluation.

use std::collections::HashMap;
use std::sync::Arc;

use khabar::analysis::analyzer::pipeline::PipelineAnalyzer;
use khabar::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use khabar::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use khabar::error::{KhabarError, Result};
use khabar::lexical::builder::IndexBuilder;
use khabar::lexical::inverted_index::InvertedIndex;
use khabar::lexical::serializer::IndexSerializer;
use khabar::query::engine::{QueryEngine, QueryResult};
use khabar::query::mode::{QueryArgument, QueryMode};

/// Builder whose terms are exactly the whitespace-separated words.
fn verbatim_builder() -> IndexBuilder {
    IndexBuilder::new(
        PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new())),
    )
}

fn corpus() -> Vec<String> {
    let words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"];
    (0..40)
        .map(|i| {
            (0..(3 + i % 11))
                .map(|j| words[(i * 5 + j * j * 3) % words.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[test]
fn test_counts_match_additions() -> Result<()> {
    let documents = corpus();
    let index = verbatim_builder().ingest(&documents)?;

    // term -> doc -> number of occurrences
    let mut expected: HashMap<&str, HashMap<u64, usize>> = HashMap::new();
    for (doc_id, document) in documents.iter().enumerate() {
        for word in document.split_whitespace() {
            *expected
                .entry(word)
                .or_default()
                .entry(doc_id as u64)
                .or_default() += 1;
        }
    }

    assert_eq!(index.size(), expected.len());
    for (term, docs) in &expected {
        assert!(index.has_term(term));

        let listed = index.docs_of(term)?;
        assert_eq!(listed.len(), docs.len(), "each document listed once");
        assert!(listed.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(index.doc_frequency(term)?, docs.len());
        for (&doc_id, &count) in docs {
            assert_eq!(index.term_frequency(term, doc_id)?, count);
        }
    }

    Ok(())
}

#[test]
fn test_positions_are_term_offsets() -> Result<()> {
    let index = verbatim_builder().ingest(["a b a", "b", "c a"])?;

    assert_eq!(index.doc_positions("a")?, vec![(0, 0), (0, 2), (2, 1)]);
    assert_eq!(index.doc_positions("b")?, vec![(0, 1), (1, 0)]);
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_worked_example() -> Result<()> {
    let json = r#"{"news":{"0":[0,5]},"agency":{"0":[1]}}"#;
    let index = IndexSerializer::default().load_from_reader(json.as_bytes())?;

    assert_eq!(index.doc_frequency("news")?, 1);
    assert_eq!(index.term_frequency("news", 0)?, 2);
    assert_eq!(index.docs_of("agency")?, vec![0]);
    Ok(())
}

#[test]
fn test_top_n_example() -> Result<()> {
    // Document frequencies: a=3, b=1, c=2.
    let index = verbatim_builder().ingest(["a b c", "a c", "a"])?;
    let engine = QueryEngine::new(&index);

    let result = engine.evaluate(QueryMode::TopNByDocFrequency, QueryArgument::Count(2))?;
    assert_eq!(
        result,
        QueryResult::Ranking(vec![("c".to_string(), 2), ("a".to_string(), 3)])
    );
    Ok(())
}

#[test]
fn test_top_n_shape() -> Result<()> {
    let index = verbatim_builder().ingest(corpus())?;
    let engine = QueryEngine::new(&index);
    let max_df = index
        .terms()
        .map(|term| index.doc_frequency(term))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .max()
        .unwrap_or(0);

    for n in [0, 1, 3, index.size(), index.size() + 5] {
        let QueryResult::Ranking(entries) =
            engine.evaluate(QueryMode::TopNByDocFrequency, QueryArgument::Count(n))?
        else {
            panic!("Expected a ranking");
        };

        assert_eq!(entries.len(), n.min(index.size()));
        assert!(entries.windows(2).all(|w| w[0].1 <= w[1].1));
        if let Some(last) = entries.last() {
            assert_eq!(last.1, max_df);
        }
    }
    Ok(())
}

#[test]
fn test_position_frequency_ranking() -> Result<()> {
    let index = verbatim_builder().ingest(["x x x y", "y z", "z"])?;
    let engine = QueryEngine::new(&index);

    // x=3, y=2, z=2; y was seen before z.
    let result = engine.evaluate_code(5, Some("3"))?;
    assert_eq!(
        result,
        QueryResult::Ranking(vec![
            ("y".to_string(), 2),
            ("z".to_string(), 2),
            ("x".to_string(), 3)
        ])
    );
    assert_eq!(engine.evaluate_code(3, Some("x"))?, QueryResult::Frequency(3));
    Ok(())
}

#[test]
fn test_missing_term_leaves_index_unchanged() -> Result<()> {
    let index = verbatim_builder().ingest(["a b", "c"])?;
    let before = index.clone();
    let engine = QueryEngine::new(&index);

    for code in 0..=3 {
        let err = engine.evaluate_code(code, Some("missing")).unwrap_err();
        assert!(matches!(err, KhabarError::TermNotFound(ref t) if t == "missing"));
        assert!(!err.is_fatal());
    }

    assert_eq!(index.size(), 3);
    assert_eq!(index, before);
    Ok(())
}

#[test]
fn test_advanced_and_unknown_modes() {
    let index = InvertedIndex::new();
    let engine = QueryEngine::new(&index);

    assert!(matches!(
        engine.evaluate_code(6, None),
        Err(KhabarError::NotImplemented(_))
    ));
    assert!(matches!(
        engine.evaluate_code(12, Some("a")),
        Err(KhabarError::InvalidQueryMode(12))
    ));
}
