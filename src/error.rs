//! Error types for the Khabar library.
//!
//! All errors are represented by the [`KhabarError`] enum. Errors raised while
//! answering a query (an unknown term, an unknown mode) are ordinary values the
//! caller can report and move on from; preset and I/O failures are fatal for the
//! operation that raised them.
//!
//! # Examples
//!
//! ```
//! use khabar::error::{KhabarError, Result};
//!
//! fn lookup() -> Result<usize> {
//!     Err(KhabarError::TermNotFound("خبر".to_string()))
//! }
//!
//! match lookup() {
//!     Ok(n) => println!("{n}"),
//!     Err(e) => assert!(!e.is_fatal()),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Khabar operations.
#[derive(Error, Debug)]
pub enum KhabarError {
    /// I/O errors (preset files, index files, document sources)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Preset table errors (missing or unreadable tables)
    #[error("Preset error: {0}")]
    Preset(String),

    /// Analysis-related errors (normalization, tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// The term was never added to the index
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// The term exists but has no posting for the document
    #[error("Document {doc_id} not found for term: {term}")]
    DocNotFound { term: String, doc_id: u64 },

    /// Unknown query mode code
    #[error("Invalid query mode: {0}")]
    InvalidQueryMode(i64),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with KhabarError.
pub type Result<T> = std::result::Result<T, KhabarError>;

impl KhabarError {
    /// Create a new preset error.
    pub fn preset<S: Into<String>>(msg: S) -> Self {
        KhabarError::Preset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KhabarError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        KhabarError::Index(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        KhabarError::Query(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KhabarError::InvalidArgument(msg.into())
    }

    /// Create a new not implemented error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        KhabarError::NotImplemented(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        KhabarError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KhabarError::Other(msg.into())
    }

    /// Whether this error should abort the operation that produced it.
    ///
    /// Query outcomes (missing term or document, bad mode or argument, the
    /// unimplemented advanced mode) are reported and leave the index untouched.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            KhabarError::TermNotFound(_)
                | KhabarError::DocNotFound { .. }
                | KhabarError::InvalidQueryMode(_)
                | KhabarError::InvalidArgument(_)
                | KhabarError::NotImplemented(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KhabarError::preset("missing stopwords");
        assert_eq!(error.to_string(), "Preset error: missing stopwords");

        let error = KhabarError::TermNotFound("news".to_string());
        assert_eq!(error.to_string(), "Term not found: news");

        let error = KhabarError::DocNotFound {
            term: "news".to_string(),
            doc_id: 3,
        };
        assert_eq!(error.to_string(), "Document 3 not found for term: news");

        let error = KhabarError::InvalidQueryMode(9);
        assert_eq!(error.to_string(), "Invalid query mode: 9");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let khabar_error = KhabarError::from(io_error);

        match khabar_error {
            KhabarError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_fatality() {
        assert!(!KhabarError::TermNotFound("x".into()).is_fatal());
        assert!(!KhabarError::InvalidQueryMode(7).is_fatal());
        assert!(!KhabarError::not_implemented("advanced").is_fatal());
        assert!(KhabarError::preset("gone").is_fatal());
        assert!(KhabarError::from(io::Error::other("disk")).is_fatal());
    }
}
