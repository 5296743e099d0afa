//! Text normalization.
//!
//! [`TextNormalizer`] turns raw document text into canonical text:
//!
//! 1. markup is stripped and line breaks become spaces;
//! 2. bad characters are folded (punctuation, digits and ZWJ become spaces);
//! 3. in [`NormalizationMode::Rich`] only, ASCII letters and digits are deleted,
//!    emoji are deleted and runs of ZWNJ collapse to one.
//!
//! Normalization is deterministic and never makes the text longer.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use khabar::analysis::normalizer::{NormalizationMode, TextNormalizer};
//! use khabar::analysis::preset::PresetTables;
//!
//! let normalizer =
//!     TextNormalizer::new(Arc::new(PresetTables::builtin()), NormalizationMode::Simple).unwrap();
//! assert_eq!(normalizer.normalize("<p>Hello!</p>"), "Hello ");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::bad_character::BadCharacterCharFilter;
use crate::analysis::char_filter::markup::MarkupCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::preset::PresetTables;
use crate::error::{KhabarError, Result};

/// How much normalization and analysis to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Markup stripping and character folding, whitespace tokenization.
    #[default]
    Simple,
    /// Adds ASCII/emoji removal, combination merging, segmentation and morphology.
    Rich,
}

impl NormalizationMode {
    /// The integer code of this mode.
    pub fn code(self) -> u8 {
        match self {
            NormalizationMode::Simple => 1,
            NormalizationMode::Rich => 2,
        }
    }
}

impl TryFrom<u8> for NormalizationMode {
    type Error = KhabarError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(NormalizationMode::Simple),
            2 => Ok(NormalizationMode::Rich),
            other => Err(KhabarError::invalid_argument(format!(
                "unknown normalization mode {other}"
            ))),
        }
    }
}

impl FromStr for NormalizationMode {
    type Err = KhabarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "1" => Ok(NormalizationMode::Simple),
            "rich" | "2" => Ok(NormalizationMode::Rich),
            other => Err(KhabarError::invalid_argument(format!(
                "unknown normalization mode {other}"
            ))),
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationMode::Simple => write!(f, "simple"),
            NormalizationMode::Rich => write!(f, "rich"),
        }
    }
}

/// Applies the normalization char filters for one mode.
#[derive(Clone)]
pub struct TextNormalizer {
    mode: NormalizationMode,
    filters: Vec<Arc<dyn CharFilter>>,
}

impl TextNormalizer {
    /// Build the normalizer for `mode` over the given preset tables.
    pub fn new(presets: Arc<PresetTables>, mode: NormalizationMode) -> Result<Self> {
        let mut filters: Vec<Arc<dyn CharFilter>> = vec![
            Arc::new(MarkupCharFilter::new()?),
            Arc::new(BadCharacterCharFilter::new(presets)),
        ];

        if mode == NormalizationMode::Rich {
            filters.push(Arc::new(PatternReplaceCharFilter::ascii_remover()?));
            filters.push(Arc::new(PatternReplaceCharFilter::emoji_remover()?));
            filters.push(Arc::new(PatternReplaceCharFilter::zwnj_collapser()?));
        }

        Ok(TextNormalizer { mode, filters })
    }

    /// The mode this normalizer was built for.
    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    /// Normalize raw text into canonical text.
    pub fn normalize(&self, text: &str) -> String {
        self.filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc))
    }
}

impl CharFilter for TextNormalizer {
    fn filter(&self, input: &str) -> String {
        self.normalize(input)
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("mode", &self.mode)
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(mode: NormalizationMode) -> TextNormalizer {
        TextNormalizer::new(Arc::new(PresetTables::builtin()), mode).unwrap()
    }

    #[test]
    fn test_simple_mode_markup_example() {
        let n = normalizer(NormalizationMode::Simple);
        assert_eq!(n.normalize("<p>Hello!</p>"), "Hello ");
    }

    #[test]
    fn test_simple_mode_keeps_ascii_letters() {
        let n = normalizer(NormalizationMode::Simple);
        assert_eq!(n.normalize("BBC فارسی"), "BBC فارسی");
    }

    #[test]
    fn test_rich_mode_removes_ascii_and_emoji() {
        let n = normalizer(NormalizationMode::Rich);
        assert_eq!(n.normalize("BBC فارسی😀"), " فارسی");
        assert_eq!(n.normalize("می\u{200C}\u{200C}روم"), "می\u{200C}روم");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let n = normalizer(NormalizationMode::Simple);
        assert_eq!(n.normalize(""), "");
        assert!(n.normalize("!!! ؟ ...").trim().is_empty());
    }

    #[test]
    fn test_simple_mode_idempotent() {
        let n = normalizer(NormalizationMode::Simple);
        let inputs = [
            "<p>Hello!</p>",
            "<div>كتابِ «علي»\nصفحه ۱۲</div>",
            "&amp;lt;p&amp;gt; &#1582;بر",
            "a\r\nb &nbsp; c\u{200D}d",
            "<script>x()</script>متن",
            "ه\u{0654}\u{0654}",
            "ية\u{0654}\u{0654}",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_simple_mode_idempotent_on_random_text() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        // Letters with folded variants, combining marks, markup and entity
        // syntax, digits, joiners and line breaks.
        const ALPHABET: &[char] = &[
            'ه', '\u{0654}', 'ة', 'ۀ', 'ي', 'ی', 'ئ', 'ك', 'ا', 'أ', 'ؤ', '\u{064E}',
            '\u{200C}', '\u{200D}', '۱', '1', '٣', '!', '،', '<', '>', '/', 'p', '&', '#',
            ';', 'x', 'a', 'm', ' ', '\n', '\r', '-',
        ];

        let n = normalizer(NormalizationMode::Simple);
        let mut rng = StdRng::seed_from_u64(0x6b68_6162);
        for _ in 0..20_000 {
            let len = rng.random_range(0..16);
            let input: String = (0..len)
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
                .collect();
            let once = n.normalize(&input);
            assert_eq!(n.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_never_longer() {
        let n = normalizer(NormalizationMode::Rich);
        for input in ["<b>x</b>", "خانهٔ ما", "😀😀", "&#1582;"] {
            assert!(n.normalize(input).chars().count() <= input.chars().count());
        }
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(NormalizationMode::try_from(1).unwrap(), NormalizationMode::Simple);
        assert_eq!(NormalizationMode::try_from(2).unwrap(), NormalizationMode::Rich);
        assert!(NormalizationMode::try_from(3).is_err());
        assert_eq!("rich".parse::<NormalizationMode>().unwrap(), NormalizationMode::Rich);
        assert_eq!(NormalizationMode::Rich.code(), 2);
    }
}
