//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split canonical text into an ordered sequence of surface tokens.
//! Token order is the order of appearance in the text and is never changed
//! afterwards.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace runs (simple mode)
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries (rich mode)
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::tokenizer::Tokenizer;
//! use khabar::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("خبر  فوری").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// This is also the seam for external word-segmentation backends: anything
/// that can split text into ordered surface tokens can implement it.
///
/// # Examples
///
/// ```
/// use khabar::analysis::token::{Token, TokenStream};
/// use khabar::analysis::tokenizer::Tokenizer;
/// use khabar::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod unicode_word;
pub mod whitespace;
