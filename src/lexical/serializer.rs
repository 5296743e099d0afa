//! Index persistence.
//!
//! The index is saved as a JSON object mapping each term to an object that
//! maps document IDs to position arrays:
//!
//! ```text
//! {"خبر":{"0":[0,4],"2":[1]},"تهران":{"0":[2]}}
//! ```
//!
//! Terms and documents are written in first-seen order and read back in file
//! order, so a saved index reloads identical to the original. The empty term
//! is never written. A file that repeats a term, repeats a document under one
//! term, or lists positions out of order is rejected on load. Output goes through a buffer of `chunk_size` bytes, so
//! peak memory does not grow with the index; the bytes written do not depend
//! on the chunk size.
//!
//! A plain-text report lists one term per line:
//!
//! ```text
//! خبر -> (0, 0), (0, 4), (2, 1)
//! --------------------------------------------------------------------------------
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ahash::AHashSet;
use log::info;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{KhabarError, Result};
use crate::lexical::inverted_index::InvertedIndex;
use crate::lexical::posting::{DocumentId, Position, PostingList};

/// Serializer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Size in bytes of each chunk handed to the underlying writer.
    pub chunk_size: usize,
    /// Width of the separator line in the report.
    pub separator_width: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig {
            chunk_size: 64 * 1024, // 64KB
            separator_width: 80,
        }
    }
}

/// Saves and loads [`InvertedIndex`] values.
#[derive(Debug, Clone, Default)]
pub struct IndexSerializer {
    config: SerializerConfig,
}

impl IndexSerializer {
    /// Create a serializer with the given settings.
    pub fn new(config: SerializerConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(KhabarError::config("chunk_size must be greater than 0"));
        }
        Ok(IndexSerializer { config })
    }

    /// The settings in use.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Write the JSON form of `index` to `path`.
    pub fn save<P: AsRef<Path>>(&self, index: &InvertedIndex, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save_to_writer(index, file)?;
        info!("Saved index with {} terms to {}", index.size(), path.display());
        Ok(())
    }

    /// Write the JSON form of `index` to `writer`.
    pub fn save_to_writer<W: Write>(&self, index: &InvertedIndex, writer: W) -> Result<()> {
        let mut writer = BufWriter::with_capacity(self.config.chunk_size, writer);
        serde_json::to_writer(&mut writer, &IndexDocument(index))?;
        writer.flush()?;
        Ok(())
    }

    /// Read an index from the JSON file at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<InvertedIndex> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let index = self.load_from_reader(file)?;
        info!("Loaded index with {} terms from {}", index.size(), path.display());
        Ok(index)
    }

    /// Read an index from JSON.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<InvertedIndex> {
        let reader = BufReader::with_capacity(self.config.chunk_size, reader);
        let loaded: LoadedIndex = serde_json::from_reader(reader)?;
        match loaded.problem {
            Some(problem) => Err(KhabarError::index(format!("inconsistent index file: {problem}"))),
            None => Ok(loaded.index),
        }
    }

    /// Write the plain-text report of `index` to `writer`.
    pub fn write_report<W: Write>(&self, index: &InvertedIndex, writer: W) -> Result<()> {
        let mut writer = BufWriter::with_capacity(self.config.chunk_size, writer);
        let separator = "-".repeat(self.config.separator_width);

        for (term, list) in index.iter().filter(|(term, _)| !term.is_empty()) {
            write!(writer, "{term} -> ")?;
            let mut first = true;
            for posting in list {
                for position in posting.positions() {
                    if !first {
                        write!(writer, ", ")?;
                    }
                    write!(writer, "({}, {})", posting.doc_id, position)?;
                    first = false;
                }
            }
            writeln!(writer)?;
            writeln!(writer, "{separator}")?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the plain-text report of `index` to `path`.
    pub fn save_report<P: AsRef<Path>>(&self, index: &InvertedIndex, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_report(index, File::create(path)?)?;
        info!("Wrote index report to {}", path.display());
        Ok(())
    }
}

/// Serialized view of a whole index.
struct IndexDocument<'a>(&'a InvertedIndex);

impl Serialize for IndexDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (term, list) in self.0.iter().filter(|(term, _)| !term.is_empty()) {
            map.serialize_entry(term, &PostingDocument(list))?;
        }
        map.end()
    }
}

/// Serialized view of one posting list.
struct PostingDocument<'a>(&'a PostingList);

impl Serialize for PostingDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for posting in self.0 {
            map.serialize_entry(&posting.doc_id, posting.positions())?;
        }
        map.end()
    }
}

/// An index read back in file order, with the first consistency problem found.
struct LoadedIndex {
    index: InvertedIndex,
    problem: Option<String>,
}

impl<'de> Deserialize<'de> for LoadedIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(IndexVisitor)
    }
}

struct IndexVisitor;

impl<'de> Visitor<'de> for IndexVisitor {
    type Value = LoadedIndex;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of terms to document postings")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
        let mut index = InvertedIndex::new();
        let mut seen = AHashSet::new();
        let mut problem = None;

        while let Some(term) = map.next_key::<String>()? {
            let postings: LoadedPostings = map.next_value()?;
            if problem.is_some() || term.is_empty() {
                continue;
            }
            if !seen.insert(term.clone()) {
                problem = Some(format!("term {term:?} appears more than once"));
                continue;
            }
            if let Some(reason) = postings.problem {
                problem = Some(format!("term {term:?}: {reason}"));
                continue;
            }
            for (doc_id, positions) in postings.entries {
                for position in positions {
                    index.add(&term, doc_id, position);
                }
            }
        }

        Ok(LoadedIndex { index, problem })
    }
}

/// One term's postings read back in file order.
struct LoadedPostings {
    entries: Vec<(DocumentId, Vec<Position>)>,
    problem: Option<String>,
}

impl<'de> Deserialize<'de> for LoadedPostings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PostingsVisitor)
    }
}

struct PostingsVisitor;

impl<'de> Visitor<'de> for PostingsVisitor {
    type Value = LoadedPostings;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of document IDs to position arrays")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut docs = AHashSet::new();
        let mut problem = None;

        while let Some((doc_id, positions)) = map.next_entry::<DocumentId, Vec<Position>>()? {
            if problem.is_some() {
                continue;
            }
            if !docs.insert(doc_id) {
                problem = Some(format!("document {doc_id} appears more than once"));
            } else if positions.windows(2).any(|pair| pair[0] >= pair[1]) {
                problem = Some(format!(
                    "positions of document {doc_id} are not strictly increasing"
                ));
            } else {
                entries.push((doc_id, positions));
            }
        }

        Ok(LoadedPostings { entries, problem })
    }
}
