use regex::Regex;

use super::CharFilter;
use crate::error::{KhabarError, Result};

/// Emoticons, pictographs, transport symbols and regional indicator flags.
pub const EMOJI_PATTERN: &str =
    r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]+";

/// Runs of ASCII letters and digits.
pub const ASCII_ALPHANUMERIC_PATTERN: &str = r"[A-Za-z0-9]+";

/// Two or more consecutive zero-width non-joiners.
pub const REPEATED_ZWNJ_PATTERN: &str = r"\x{200C}{2,}";

/// A char filter that replaces text matching a regex pattern.
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| KhabarError::analysis(format!("invalid pattern {pattern}: {e}")))?,
            replacement: replacement.to_string(),
            name: "pattern_replace",
        })
    }

    /// Delete every emoji from the four pictographic blocks.
    pub fn emoji_remover() -> Result<Self> {
        Ok(Self::new(EMOJI_PATTERN, "")?.with_name("emoji_remover"))
    }

    /// Delete ASCII letters and digits outright (not folded to a space).
    pub fn ascii_remover() -> Result<Self> {
        Ok(Self::new(ASCII_ALPHANUMERIC_PATTERN, "")?.with_name("ascii_remover"))
    }

    /// Collapse runs of zero-width non-joiners to a single one.
    pub fn zwnj_collapser() -> Result<Self> {
        Ok(Self::new(REPEATED_ZWNJ_PATTERN, "\u{200C}")?.with_name("zwnj_collapser"))
    }

    fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // `$` in the replacement is literal.
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
