//! Bad-character folding char filter.
//!
//! Replaces every listed variant of a canonical character with that character.
//! Destinations are processed in table load order and, within a destination,
//! variants in listed order. Punctuation, digits of all three scripts and the
//! zero-width joiner fold into a single space each.

use std::sync::Arc;

use super::CharFilter;
use crate::analysis::preset::PresetTables;

/// A char filter that folds character variants to their canonical forms.
#[derive(Clone, Debug)]
pub struct BadCharacterCharFilter {
    presets: Arc<PresetTables>,
}

impl BadCharacterCharFilter {
    /// Create a new filter over the bad-character table of `presets`.
    pub fn new(presets: Arc<PresetTables>) -> Self {
        BadCharacterCharFilter { presets }
    }
}

impl CharFilter for BadCharacterCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = input.to_string();
        let mut buf = [0u8; 4];

        for (destination, variants) in self.presets.bad_characters().iter() {
            let destination: &str = destination.encode_utf8(&mut buf);
            for variant in variants {
                // A multi-character variant can reappear around its own
                // replacement (heh followed by two hamzas), so fold until gone.
                // Variants are never empty nor equal to their destination,
                // which keeps every round strictly shrinking.
                while text.contains(variant.as_str()) {
                    text = text.replace(variant.as_str(), destination);
                }
            }
        }

        text
    }

    fn name(&self) -> &'static str {
        "bad_character"
    }
}
