//! Strip filter implementation.
//!
//! Whitespace tokenization leaves zero-width non-joiners glued to the edges of
//! a token when the source text had stray joiners next to a space. Those are
//! invisible and never part of a word, so they are trimmed here. A token made
//! of nothing but joiners is marked as stopped.

use super::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

const ZWNJ: char = '\u{200C}';

/// A filter that trims whitespace and zero-width non-joiners from token edges.
#[derive(Clone, Debug, Default)]
pub struct StripFilter;

impl StripFilter {
    /// Create a new strip filter.
    pub fn new() -> Self {
        StripFilter
    }

    fn is_edge(c: char) -> bool {
        c == ZWNJ || c.is_whitespace()
    }

    fn strip(mut token: Token) -> Token {
        if token.is_stopped() {
            return token;
        }

        let leading = token.text.len() - token.text.trim_start_matches(Self::is_edge).len();
        let trimmed = token.text.trim_matches(Self::is_edge);
        if trimmed.is_empty() {
            return token.stop();
        }
        if trimmed.len() != token.text.len() {
            let trailing = token.text.len() - leading - trimmed.len();
            token.text = trimmed.to_string();
            if token.end_offset > token.start_offset {
                token.start_offset += leading;
                token.end_offset -= trailing;
            }
        }
        token
    }
}

impl Filter for StripFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(Self::strip)))
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: Vec<Token>) -> Vec<Token> {
        StripFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect()
    }

    #[test]
    fn test_trims_joiners_from_edges() {
        let result = run(vec![
            Token::new("\u{200C}\u{200C}خبر", 0),
            Token::new("می\u{200C}روند\u{200C}", 1),
        ]);

        assert_eq!(result[0].text, "خبر");
        // Inner joiners belong to the word.
        assert_eq!(result[1].text, "می\u{200C}روند");
        assert!(result.iter().all(|t| !t.is_stopped()));
    }

    #[test]
    fn test_joiner_only_token_is_stopped() {
        let result = run(vec![Token::new("\u{200C}", 0), Token::new("\u{200C}\u{200C}", 1)]);
        assert!(result.iter().all(Token::is_stopped));
    }

    #[test]
    fn test_offsets_follow_the_trimmed_text() {
        // ZWNJ is three bytes in UTF-8.
        let result = run(vec![Token::with_offsets("\u{200C}خبر", 0, 4, 13)]);
        assert_eq!(result[0].text, "خبر");
        assert_eq!((result[0].start_offset, result[0].end_offset), (7, 13));
    }
}
