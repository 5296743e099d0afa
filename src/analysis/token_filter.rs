//! Token filter implementations for token transformation.
//!
//! Filters receive a token stream and produce a new one, dropping or rewriting
//! tokens while keeping their relative order.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words (exact match)
//! - [`strip::StripFilter`] - Trims stray zero-width non-joiners from token edges
//! - [`remove_empty::RemoveEmptyFilter`] - Removes empty and stopped tokens
//! - [`morphology::MorphologyFilter`] - Lemmatizes and stems tokens
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Strip → RemoveEmpty → Stop Words → Morphology → RemoveEmpty → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod morphology;
pub mod remove_empty;
pub mod stop;
pub mod strip;
