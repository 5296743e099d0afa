//! The term → document → positions store.
//!
//! Terms are kept in first-seen order; a term's ordinal in that order is the
//! tie-break key for frequency rankings. A term exists iff it has at least one
//! posting, and repeated additions for the same term accumulate.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use khabar::analysis::analyzer::persian::PersianAnalyzer;
//! use khabar::analysis::preset::PresetTables;
//! use khabar::lexical::builder::IndexBuilder;
//!
//! let analyzer = PersianAnalyzer::simple(Arc::new(PresetTables::builtin())).unwrap();
//! let index = IndexBuilder::new(analyzer).ingest(["خبر فوری خبر"]).unwrap();
//!
//! assert_eq!(index.doc_frequency("خبر").unwrap(), 1);
//! assert_eq!(index.term_frequency("خبر", 0).unwrap(), 2);
//! ```

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{KhabarError, Result};
use crate::lexical::posting::{DocumentId, Position, PostingList, Term};

/// Size figures of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of distinct documents with at least one term.
    pub documents: usize,
    /// Number of distinct terms.
    pub terms: usize,
    /// Number of recorded positions.
    pub positions: usize,
}

/// A positional inverted index.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    /// Terms in first-seen order.
    terms: Vec<Term>,
    /// Posting lists, parallel to `terms`.
    lists: Vec<PostingList>,
    /// Term → ordinal.
    lookup: AHashMap<Term, usize>,
    /// Every document that received a posting.
    documents: AHashSet<DocumentId>,
    /// Total positions across all terms.
    positions: usize,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `term` in `doc_id` at `position`.
    ///
    /// Positions for a document must arrive strictly increasing and each
    /// triple at most once; [`IndexBuilder`](crate::lexical::builder::IndexBuilder)
    /// guarantees this and the index does not re-check it.
    pub(crate) fn add(&mut self, term: &str, doc_id: DocumentId, position: Position) {
        let ordinal = match self.lookup.get(term) {
            Some(&ordinal) => ordinal,
            None => {
                let ordinal = self.terms.len();
                self.terms.push(term.to_string());
                self.lists.push(PostingList::new());
                self.lookup.insert(term.to_string(), ordinal);
                ordinal
            }
        };

        self.lists[ordinal].add(doc_id, position);
        self.documents.insert(doc_id);
        self.positions += 1;
    }

    /// Whether `term` has been added.
    pub fn has_term(&self, term: &str) -> bool {
        self.lookup.contains_key(term)
    }

    /// The posting list of `term`, if present.
    pub fn posting_list(&self, term: &str) -> Option<&PostingList> {
        self.lookup.get(term).map(|&ordinal| &self.lists[ordinal])
    }

    fn require(&self, term: &str) -> Result<&PostingList> {
        self.posting_list(term)
            .ok_or_else(|| KhabarError::TermNotFound(term.to_string()))
    }

    /// Documents containing `term`, in first-seen order.
    pub fn docs_of(&self, term: &str) -> Result<Vec<DocumentId>> {
        Ok(self.require(term)?.doc_ids().collect())
    }

    /// Number of distinct documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> Result<usize> {
        Ok(self.require(term)?.doc_frequency())
    }

    /// Number of positions recorded for `term` in `doc_id`.
    pub fn term_frequency(&self, term: &str, doc_id: DocumentId) -> Result<usize> {
        self.require(term)?
            .get(doc_id)
            .map(|posting| posting.frequency())
            .ok_or_else(|| KhabarError::DocNotFound {
                term: term.to_string(),
                doc_id,
            })
    }

    /// Number of positions recorded for `term` across all documents.
    pub fn total_term_frequency(&self, term: &str) -> Result<usize> {
        Ok(self.require(term)?.total_frequency())
    }

    /// `(doc, position)` pairs for `term`: documents in first-seen order,
    /// positions in recording order within each document.
    pub fn doc_positions(&self, term: &str) -> Result<Vec<(DocumentId, Position)>> {
        Ok(self
            .require(term)?
            .iter()
            .flat_map(|posting| posting.positions().iter().map(|&p| (posting.doc_id, p)))
            .collect())
    }

    /// Number of distinct terms.
    pub fn size(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been added.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct documents that received at least one term.
    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Terms in first-seen order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }

    /// `(term, posting list)` pairs in first-seen term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> + '_ {
        self.terms.iter().map(String::as_str).zip(self.lists.iter())
    }

    /// Size figures of this index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.doc_count(),
            terms: self.size(),
            positions: self.positions,
        }
    }
}

impl PartialEq for InvertedIndex {
    /// Same terms in the same order, each with the same postings in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
            && self
                .lists
                .iter()
                .zip(other.lists.iter())
                .all(|(a, b)| a.iter().eq(b.iter()))
    }
}

impl Eq for InvertedIndex {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.add("news", 0, 0);
        index.add("agency", 0, 1);
        index.add("news", 0, 5);
        index.add("agency", 2, 0);
        index.add("news", 1, 3);
        index
    }

    #[test]
    fn test_add_and_lookup() {
        let index = sample();

        assert!(index.has_term("news"));
        assert!(!index.has_term("sports"));
        assert_eq!(index.docs_of("news").unwrap(), vec![0, 1]);
        assert_eq!(index.docs_of("agency").unwrap(), vec![0, 2]);
        assert_eq!(index.doc_frequency("news").unwrap(), 2);
        assert_eq!(index.term_frequency("news", 0).unwrap(), 2);
        assert_eq!(index.total_term_frequency("news").unwrap(), 3);
        assert_eq!(index.size(), 2);
        assert_eq!(index.doc_count(), 3);
    }

    #[test]
    fn test_worked_example() {
        let mut index = InvertedIndex::new();
        index.add("news", 0, 0);
        index.add("news", 0, 5);
        index.add("agency", 0, 1);

        assert_eq!(index.doc_frequency("news").unwrap(), 1);
        assert_eq!(index.term_frequency("news", 0).unwrap(), 2);
        assert_eq!(index.docs_of("agency").unwrap(), vec![0]);
    }

    #[test]
    fn test_missing_term_and_doc() {
        let index = sample();

        assert!(matches!(
            index.docs_of("sports"),
            Err(KhabarError::TermNotFound(term)) if term == "sports"
        ));
        assert!(matches!(
            index.doc_frequency("sports"),
            Err(KhabarError::TermNotFound(_))
        ));
        assert!(matches!(
            index.term_frequency("news", 2),
            Err(KhabarError::DocNotFound { doc_id: 2, .. })
        ));
        assert_eq!(index.size(), 2);
    }

    #[test]
    fn test_doc_positions_order() {
        let index = sample();
        assert_eq!(
            index.doc_positions("news").unwrap(),
            vec![(0, 0), (0, 5), (1, 3)]
        );
    }

    #[test]
    fn test_first_seen_term_order_and_stats() {
        let index = sample();
        assert_eq!(index.terms().collect::<Vec<_>>(), vec!["news", "agency"]);
        assert_eq!(
            index.stats(),
            IndexStats {
                documents: 3,
                terms: 2,
                positions: 5
            }
        );
        assert!(InvertedIndex::new().is_empty());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let mut a = InvertedIndex::new();
        a.add("x", 0, 0);
        a.add("y", 0, 1);
        let mut b = InvertedIndex::new();
        b.add("y", 0, 1);
        b.add("x", 0, 0);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
