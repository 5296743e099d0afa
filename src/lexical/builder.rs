//! Sequential index construction.
//!
//! [`IndexBuilder`] owns the index while documents are ingested. Document IDs
//! are assigned from 0 in presentation order and each term's position is its
//! 0-based index in the document's analyzed term sequence. Documents are
//! processed one at a time; the finished index is read-only.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::error::{KhabarError, Result};
use crate::lexical::inverted_index::{IndexStats, InvertedIndex};
use crate::lexical::posting::{DocumentId, Position};

/// Drives documents through an analyzer into an [`InvertedIndex`].
pub struct IndexBuilder {
    analyzer: Arc<dyn Analyzer>,
    index: InvertedIndex,
    next_doc_id: DocumentId,
}

impl IndexBuilder {
    /// Create a builder over `analyzer`.
    pub fn new<A: Analyzer + 'static>(analyzer: A) -> Self {
        Self::with_analyzer(Arc::new(analyzer))
    }

    /// Create a builder over a shared analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        IndexBuilder {
            analyzer,
            index: InvertedIndex::new(),
            next_doc_id: 0,
        }
    }

    /// Analyze one document and add its terms. Returns the assigned ID.
    pub fn add_document(&mut self, text: &str) -> Result<DocumentId> {
        let doc_id = self.next_doc_id;
        let mut count = 0usize;

        for (index, token) in self.analyzer.analyze(text)?.enumerate() {
            let position = Position::try_from(index).map_err(|_| {
                KhabarError::index(format!("document {doc_id} exceeds the position range"))
            })?;
            self.index.add(&token.text, doc_id, position);
            count += 1;
        }

        self.next_doc_id += 1;
        debug!("Indexed document {doc_id}: {count} terms");
        Ok(doc_id)
    }

    /// Number of documents ingested so far.
    pub fn documents(&self) -> u64 {
        self.next_doc_id
    }

    /// Size figures of the index built so far.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Finish ingestion and hand over the index.
    pub fn finish(self) -> InvertedIndex {
        let stats = self.index.stats();
        info!(
            "Built index from {} documents: {} terms, {} positions",
            self.next_doc_id, stats.terms, stats.positions
        );
        self.index
    }

    /// Ingest every document in order and return the finished index.
    pub fn ingest<I, S>(mut self, documents: I) -> Result<InvertedIndex>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for document in documents {
            self.add_document(document.as_ref())?;
        }
        Ok(self.finish())
    }
}

impl fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("analyzer", &self.analyzer.name())
            .field("next_doc_id", &self.next_doc_id)
            .field("terms", &self.index.size())
            .finish()
    }
}
