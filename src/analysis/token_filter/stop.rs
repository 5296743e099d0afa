//! Stop filter implementation.
//!
//! Removes tokens that are exact members of the stopword set. There is no
//! partial or case-folded matching.
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::token_filter::Filter;
//! use khabar::analysis::token_filter::stop::StopFilter;
//! use khabar::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["از", "به"]);
//! let tokens = vec![Token::new("از", 0), Token::new("تهران", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "تهران");
//! ```

use std::sync::Arc;

use crate::analysis::preset::PresetTables;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes stop words from the token stream.
///
/// With `remove_stopped(false)` stop words are only marked as stopped and
/// left in the stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The preset tables holding the stop word set
    presets: Arc<PresetTables>,
    /// Whether to remove stopped tokens entirely or just mark them as stopped
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a stop filter over the stopword set of `presets`.
    pub fn new(presets: Arc<PresetTables>) -> Self {
        StopFilter {
            presets,
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Arc::new(PresetTables::default().with_stopwords(words)))
    }

    /// Set whether to remove stopped tokens entirely or just mark them as stopped.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word should be kept, i.e. is not a stop word.
    pub fn keep(&self, word: &str) -> bool {
        !self.presets.is_stopword(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.presets.stopwords().len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.stopwords().is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() || self.keep(&token.text) {
                    Some(token)
                } else if self.remove_stopped {
                    None
                } else {
                    Some(token.stop())
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
