//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the whole text before it is passed to the
//! tokenizer. They run in the order they were added to an analyzer.
//!
//! # Available Filters
//!
//! - [`markup::MarkupCharFilter`] - Strips markup, decodes entities, flattens line breaks
//! - [`bad_character::BadCharacterCharFilter`] - Folds character variants to canonical forms
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`combination::CombinationCharFilter`] - Protects multiword expressions from splitting
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::char_filter::CharFilter;
//! use khabar::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"[A-Za-z0-9]+", "").unwrap();
//! assert_eq!(filter.filter("خبر abc"), "خبر ");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod bad_character;
pub mod combination;
pub mod markup;
pub mod pattern_replace;
