//! Remove empty filter implementation.
//!
//! Normalization can leave empty or whitespace-only fragments behind; this
//! filter drops them, together with tokens marked as stopped.
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::token_filter::Filter;
//! use khabar::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use khabar::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![Token::new("خبر", 0), Token::new("", 1), Token::new("فوری", 2)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result.len(), 2);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes stopped tokens and tokens with no visible text.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }

    fn keeps(token: &Token) -> bool {
        !token.is_stopped()
            && !token
                .text
                .trim_matches(|c: char| c == '\u{200C}' || c.is_whitespace())
                .is_empty()
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(Self::keeps)))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}
