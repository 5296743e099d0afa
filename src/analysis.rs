//! Text analysis module for Khabar.
//!
//! Turns raw document text into the ordered sequence of index terms:
//!
//! ```text
//! raw text → markup strip → bad-character folding → (combination merge)
//!          → tokenizer → stopword filter → (morphology) → terms
//! ```
//!
//! The steps in parentheses only run in the richer [`NormalizationMode::Rich`]
//! mode.
//!
//! [`NormalizationMode::Rich`]: normalizer::NormalizationMode::Rich

pub mod analyzer;
pub mod char_filter;
pub mod morphology;
pub mod normalizer;
pub mod preset;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
