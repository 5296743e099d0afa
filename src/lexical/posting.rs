//! Postings and posting lists.
//!
//! A [`PostingList`] maps each document containing a term to the ordered
//! positions of that term in the document. Documents are kept in first-seen
//! order and positions in the order they were recorded.

use ahash::AHashMap;

/// A canonical, normalized index key.
pub type Term = String;

/// Sequential identifier of an ingested document.
pub type DocumentId = u64;

/// 0-based offset of a term within one document's term sequence.
pub type Position = u32;

/// The occurrences of a term in a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocumentId,
    /// Positions of the term in the document, in recording order.
    pub positions: Vec<Position>,
}

impl Posting {
    /// Create a posting with a first position.
    pub fn new(doc_id: DocumentId, position: Position) -> Self {
        Posting {
            doc_id,
            positions: vec![position],
        }
    }

    /// Create a posting with positions.
    pub fn with_positions(doc_id: DocumentId, positions: Vec<Position>) -> Self {
        Posting { doc_id, positions }
    }

    /// Get the term frequency.
    pub fn frequency(&self) -> usize {
        self.positions.len()
    }

    /// Get the positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

/// All postings of one term.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    postings: Vec<Posting>,
    /// Index into `postings` by document.
    docs: AHashMap<DocumentId, usize>,
    /// Total number of positions across all documents.
    total_frequency: usize,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence, appending to the document's posting or starting a new one.
    pub fn add(&mut self, doc_id: DocumentId, position: Position) {
        match self.docs.get(&doc_id) {
            Some(&slot) => self.postings[slot].positions.push(position),
            None => {
                self.docs.insert(doc_id, self.postings.len());
                self.postings.push(Posting::new(doc_id, position));
            }
        }
        self.total_frequency += 1;
    }

    /// The posting for `doc_id`, if the term occurs in that document.
    pub fn get(&self, doc_id: DocumentId) -> Option<&Posting> {
        self.docs.get(&doc_id).map(|&slot| &self.postings[slot])
    }

    /// Whether the term occurs in `doc_id`.
    pub fn contains(&self, doc_id: DocumentId) -> bool {
        self.docs.contains_key(&doc_id)
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> usize {
        self.postings.len()
    }

    /// Number of positions recorded across all documents.
    pub fn total_frequency(&self) -> usize {
        self.total_frequency
    }

    /// Documents in first-seen order.
    pub fn doc_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.postings.iter().map(|p| p.doc_id)
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Get an iterator over the postings.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_list_accumulates() {
        let mut list = PostingList::new();
        list.add(3, 0);
        list.add(1, 2);
        list.add(3, 7);

        assert_eq!(list.doc_frequency(), 2);
        assert_eq!(list.total_frequency(), 3);
        assert_eq!(list.doc_ids().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(list.get(3).unwrap().positions(), &[0, 7]);
        assert_eq!(list.get(1).unwrap().frequency(), 1);
        assert!(list.get(2).is_none());
        assert!(list.contains(1));
    }

    #[test]
    fn test_empty_posting_list() {
        let list = PostingList::new();
        assert!(list.is_empty());
        assert_eq!(list.total_frequency(), 0);
        assert_eq!(list.iter().count(), 0);
    }
}
