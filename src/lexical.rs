//! Positional inverted index.
//!
//! - [`posting`] - named key types, postings and posting lists
//! - [`inverted_index`] - the term → document → positions store
//! - [`builder`] - sequential ingestion of documents through an analyzer
//! - [`serializer`] - JSON persistence and the plain-text report

pub mod builder;
pub mod inverted_index;
pub mod posting;
pub mod serializer;
