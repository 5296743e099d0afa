//! Query evaluation.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use khabar::analysis::analyzer::persian::PersianAnalyzer;
//! use khabar::analysis::preset::PresetTables;
//! use khabar::lexical::builder::IndexBuilder;
//! use khabar::query::engine::{QueryEngine, QueryResult};
//! use khabar::query::mode::{QueryArgument, QueryMode};
//!
//! let analyzer = PersianAnalyzer::simple(Arc::new(PresetTables::builtin())).unwrap();
//! let index = IndexBuilder::new(analyzer)
//!     .ingest(["خبر فوری", "خبر"])
//!     .unwrap();
//!
//! let engine = QueryEngine::new(&index);
//! let result = engine
//!     .evaluate(QueryMode::DocFrequency, QueryArgument::term("خبر"))
//!     .unwrap();
//! assert_eq!(result, QueryResult::Frequency(2));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KhabarError, Result};
use crate::lexical::inverted_index::InvertedIndex;
use crate::lexical::posting::{DocumentId, Position, PostingList, Term};
use crate::query::mode::{QueryArgument, QueryMode, QueryRequest};

/// The outcome of a successful query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QueryResult {
    /// Document IDs in first-seen order.
    Docs(Vec<DocumentId>),
    /// `(doc, position)` pairs.
    DocPositions(Vec<(DocumentId, Position)>),
    /// A single count.
    Frequency(usize),
    /// `(term, frequency)` pairs, ascending by frequency.
    Ranking(Vec<(Term, usize)>),
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Docs(docs) => {
                let docs: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
                write!(f, "[{}]", docs.join(", "))
            }
            QueryResult::DocPositions(pairs) => {
                let pairs: Vec<String> = pairs.iter().map(|(d, p)| format!("({d}, {p})")).collect();
                write!(f, "{}", pairs.join(", "))
            }
            QueryResult::Frequency(n) => write!(f, "{n}"),
            QueryResult::Ranking(entries) => {
                for (i, (term, frequency)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{term}: {frequency}")?;
                }
                Ok(())
            }
        }
    }
}

/// Evaluates queries against a finished index.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine over `index`.
    pub fn new(index: &'a InvertedIndex) -> Self {
        QueryEngine { index }
    }

    /// Evaluate a validated request.
    pub fn execute(&self, request: &QueryRequest) -> Result<QueryResult> {
        self.evaluate(request.mode, request.argument.clone())
    }

    /// Evaluate `mode` with `argument`.
    pub fn evaluate(&self, mode: QueryMode, argument: QueryArgument) -> Result<QueryResult> {
        match (mode, argument) {
            (QueryMode::Advanced, _) => Err(KhabarError::not_implemented(
                "ADVANCED query mode is not implemented",
            )),
            (QueryMode::DocsOfTerm, QueryArgument::Term(term)) => {
                Ok(QueryResult::Docs(self.index.docs_of(&term)?))
            }
            (QueryMode::DocsWithPositions, QueryArgument::Term(term)) => {
                Ok(QueryResult::DocPositions(self.index.doc_positions(&term)?))
            }
            (QueryMode::DocFrequency, QueryArgument::Term(term)) => {
                Ok(QueryResult::Frequency(self.index.doc_frequency(&term)?))
            }
            (QueryMode::TermFrequencyTotal, QueryArgument::Term(term)) => {
                Ok(QueryResult::Frequency(self.index.total_term_frequency(&term)?))
            }
            (QueryMode::TopNByDocFrequency, QueryArgument::Count(n)) => Ok(QueryResult::Ranking(
                self.top_n(n, PostingList::doc_frequency),
            )),
            (QueryMode::TopNByPositionFrequency, QueryArgument::Count(n)) => Ok(
                QueryResult::Ranking(self.top_n(n, PostingList::total_frequency)),
            ),
            (mode, argument) => Err(KhabarError::invalid_argument(format!(
                "{mode} does not accept argument {argument:?}"
            ))),
        }
    }

    /// Evaluate an integer mode code with a raw textual argument.
    pub fn evaluate_code(&self, code: i64, raw: Option<&str>) -> Result<QueryResult> {
        self.execute(&QueryRequest::parse(code, raw)?)
    }

    /// The last `n` terms after sorting ascending by `frequency`, ties in
    /// first-seen order. The result stays ascending.
    fn top_n<F>(&self, n: usize, frequency: F) -> Vec<(Term, usize)>
    where
        F: Fn(&PostingList) -> usize,
    {
        let mut ranked: Vec<(&str, usize)> = self
            .index
            .iter()
            .map(|(term, list)| (term, frequency(list)))
            .collect();

        // Stable sort: equal frequencies keep first-seen order.
        ranked.sort_by_key(|&(_, freq)| freq);

        let skip = ranked.len().saturating_sub(n);
        ranked
            .into_iter()
            .skip(skip)
            .map(|(term, freq)| (term.to_string(), freq))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> InvertedIndex {
        // Document frequencies: a=3, b=1, c=2.
        let mut index = InvertedIndex::new();
        index.add("a", 0, 0);
        index.add("b", 0, 1);
        index.add("c", 0, 2);
        index.add("a", 1, 0);
        index.add("c", 1, 1);
        index.add("c", 1, 2);
        index.add("c", 1, 3);
        index.add("a", 2, 0);
        index
    }

    #[test]
    fn test_term_modes() {
        let index = index();
        let engine = QueryEngine::new(&index);

        assert_eq!(
            engine.evaluate(QueryMode::DocsOfTerm, QueryArgument::term("c")).unwrap(),
            QueryResult::Docs(vec![0, 1])
        );
        assert_eq!(
            engine
                .evaluate(QueryMode::DocsWithPositions, QueryArgument::term("c"))
                .unwrap(),
            QueryResult::DocPositions(vec![(0, 2), (1, 1), (1, 2), (1, 3)])
        );
        assert_eq!(
            engine.evaluate(QueryMode::DocFrequency, QueryArgument::term("a")).unwrap(),
            QueryResult::Frequency(3)
        );
        assert_eq!(
            engine
                .evaluate(QueryMode::TermFrequencyTotal, QueryArgument::term("c"))
                .unwrap(),
            QueryResult::Frequency(4)
        );
    }

    #[test]
    fn test_top_n_by_doc_frequency() {
        let index = index();
        let engine = QueryEngine::new(&index);

        assert_eq!(
            engine
                .evaluate(QueryMode::TopNByDocFrequency, QueryArgument::Count(2))
                .unwrap(),
            QueryResult::Ranking(vec![("c".to_string(), 2), ("a".to_string(), 3)])
        );
    }

    #[test]
    fn test_top_n_by_position_frequency() {
        let index = index();
        let engine = QueryEngine::new(&index);

        assert_eq!(
            engine
                .evaluate(QueryMode::TopNByPositionFrequency, QueryArgument::Count(10))
                .unwrap(),
            QueryResult::Ranking(vec![
                ("b".to_string(), 1),
                ("a".to_string(), 3),
                ("c".to_string(), 4)
            ])
        );
        assert_eq!(
            engine
                .evaluate(QueryMode::TopNByPositionFrequency, QueryArgument::Count(0))
                .unwrap(),
            QueryResult::Ranking(vec![])
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut index = InvertedIndex::new();
        index.add("z", 0, 0);
        index.add("y", 0, 1);
        index.add("x", 0, 2);
        let engine = QueryEngine::new(&index);

        let result = engine
            .evaluate(QueryMode::TopNByDocFrequency, QueryArgument::Count(2))
            .unwrap();
        assert_eq!(
            result,
            QueryResult::Ranking(vec![("y".to_string(), 1), ("x".to_string(), 1)])
        );
    }

    #[test]
    fn test_non_fatal_outcomes() {
        let index = index();
        let engine = QueryEngine::new(&index);
        let size = index.size();

        let missing = engine.evaluate(QueryMode::DocFrequency, QueryArgument::term("zzz"));
        assert!(matches!(missing, Err(KhabarError::TermNotFound(_))));

        let advanced = engine.evaluate(QueryMode::Advanced, QueryArgument::None);
        assert!(matches!(advanced, Err(KhabarError::NotImplemented(_))));

        let invalid = engine.evaluate_code(42, Some("a"));
        assert!(matches!(invalid, Err(KhabarError::InvalidQueryMode(42))));

        let mismatch = engine.evaluate(QueryMode::DocsOfTerm, QueryArgument::Count(1));
        assert!(matches!(mismatch, Err(KhabarError::InvalidArgument(_))));

        assert_eq!(index.size(), size);
    }

    #[test]
    fn test_evaluate_code() {
        let index = index();
        let engine = QueryEngine::new(&index);
        assert_eq!(
            engine.evaluate_code(0, Some("b")).unwrap(),
            QueryResult::Docs(vec![0])
        );
        assert_eq!(
            engine.evaluate_code(4, Some("1")).unwrap().to_string(),
            "a: 3"
        );
    }
}
