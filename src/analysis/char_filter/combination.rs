//! Combination (multiword expression) merging char filter.
//!
//! Every surface variant of a known multiword expression is rewritten to the
//! canonical phrase with underscores in place of spaces, so the tokenizer
//! keeps it as a single token.
//!
//! Combinations are applied one after another in table load order using plain
//! substring replacement. When variants overlap or nest, the earlier table
//! entry wins, not the longest match.

use std::sync::Arc;

use super::CharFilter;
use crate::analysis::preset::PresetTables;

/// A char filter that merges multiword expressions into single tokens.
#[derive(Clone, Debug)]
pub struct CombinationCharFilter {
    presets: Arc<PresetTables>,
}

impl CombinationCharFilter {
    /// Create a new filter over the combination table of `presets`.
    pub fn new(presets: Arc<PresetTables>) -> Self {
        CombinationCharFilter { presets }
    }

    /// The merge-safe rendering of a canonical phrase.
    pub fn merged_form(canonical: &str) -> String {
        canonical.replace(' ', "_")
    }
}

impl CharFilter for CombinationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = input.to_string();

        for (canonical, variants) in self.presets.combinations().iter() {
            let merged = Self::merged_form(canonical);
            for variant in variants {
                if text.contains(variant.as_str()) {
                    text = text.replace(variant.as_str(), &merged);
                }
            }
        }

        text
    }

    fn name(&self) -> &'static str {
        "combination"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::analysis::preset::CombinationTable;

    fn filter_with(entries: &[&[&str]]) -> CombinationCharFilter {
        let mut table = CombinationTable::new();
        for entry in entries {
            table.insert(entry[0], entry[1..].iter().copied());
        }
        let presets = PresetTables::builtin().with_combinations(table);
        CombinationCharFilter::new(Arc::new(presets))
    }

    #[test]
    fn test_merges_canonical_and_variants() {
        let filter = filter_with(&[&["جمهوری اسلامی", "جمهوری\u{200C}اسلامی"]]);

        assert_eq!(
            filter.filter("دولت جمهوری اسلامی و جمهوری\u{200C}اسلامی"),
            "دولت جمهوری_اسلامی و جمهوری_اسلامی"
        );
    }

    #[test]
    fn test_text_without_combinations_is_unchanged() {
        let filter = filter_with(&[&["سازمان ملل"]]);
        assert_eq!(filter.filter("خبر فوری"), "خبر فوری");
    }

    #[test]
    fn test_overlap_resolved_by_load_order() {
        // The shorter phrase is listed first, so it wins over the longer one.
        let filter = filter_with(&[&["سازمان ملل"], &["سازمان ملل متحد"]]);
        assert_eq!(filter.filter("سازمان ملل متحد"), "سازمان_ملل متحد");

        let filter = filter_with(&[&["سازمان ملل متحد"], &["سازمان ملل"]]);
        assert_eq!(filter.filter("سازمان ملل متحد"), "سازمان_ملل_متحد");
    }

    #[test]
    fn test_merged_form() {
        assert_eq!(CombinationCharFilter::merged_form("a b c"), "a_b_c");
    }
}
