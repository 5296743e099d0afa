//! Preset tables consumed by the analysis pipeline.
//!
//! A [`PresetTables`] value bundles the bad-character folding table, the
//! combination (multiword expression) table, the stopword set and the optional
//! probe terms. Tables are loaded once, wrapped in an `Arc` and never mutated
//! afterwards.
//!
//! # File formats
//!
//! - stopwords / probes: one entry per line
//! - combinations: `canonical phrase,variant,variant,...`
//! - bad characters: `destination,variant,variant,...`
//!
//! Comma-delimited tables are read with the `csv` crate, so a variant that is
//! itself a comma or a quote can be listed in quoted form (`","`, `""""`).
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::preset::PresetTables;
//!
//! let tables = PresetTables::builtin();
//! assert!(tables.is_stopword("از"));
//! assert!(!tables.is_stopword("خبر"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{KhabarError, Result};

/// Zero-width joiner, folded to a space.
pub const ZWJ: char = '\u{200D}';

/// Zero-width non-joiner, kept inside words.
pub const ZWNJ: char = '\u{200C}';

/// Punctuation and diacritics folded to a space by the built-in table.
const SIGNS: &[&str] = &[
    ".", "،", "!", "؟", "?", ":", "؛", "(", ")", "{", "}", "[", "]", "«", "»", "-", "/", "\\",
    "٪", "%", "\"", "'", "_", "=", "<", ">", "+", "@", "$", "^", "*", ",", ";", "&", "#", "٬",
    "`", "|", "\u{0652}", "\u{064C}", "\u{064D}", "\u{064B}", "\u{064F}", "\u{0650}", "\u{064E}",
    "\u{0651}",
];

const FARSI_DIGITS: &str = "۱۲۳۴۵۶۷۸۹۰";
const ENGLISH_DIGITS: &str = "1234567890";
const ARABIC_DIGITS: &str = "١٢٣٤٥٦٧٨٩٠";

const DEFAULT_PERSIAN_STOP_WORDS: &[&str] = &[
    "و", "در", "به", "از", "که", "این", "را", "با", "است", "برای", "آن", "یک", "خود", "تا", "کرد",
    "بر", "هم", "نیز", "شد", "می", "شود", "ها", "اما", "یا", "هر", "او", "ما", "پس", "اگر", "همه",
    "دیگر", "باید", "بود", "شده", "کند", "وی", "آنها", "بین", "پیش", "چه", "کنند", "داد", "دارد",
];

const DEFAULT_COMBINATIONS: &[&[&str]] = &[
    &["جمهوری اسلامی", "جمهوری\u{200C}اسلامی"],
    &["سازمان ملل", "سازمان\u{200C}ملل", "سازمان ملل متحد"],
    &["خبرگزاری", "خبر گزاری", "خبر\u{200C}گزاری"],
    &["بین المللی", "بین\u{200C}المللی", "بینالمللی"],
];

/// Locations of the preset files on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetPaths {
    /// Newline-delimited stopword list
    pub stopwords: PathBuf,
    /// Comma-delimited combination table
    pub combinations: PathBuf,
    /// Comma-delimited bad-character table
    pub bad_characters: PathBuf,
    /// Optional newline-delimited probe terms
    pub probes: Option<PathBuf>,
    /// Optional comma-delimited lexicon for the table-driven morphological analyzer
    pub lexicon: Option<PathBuf>,
}

impl Default for PresetPaths {
    fn default() -> Self {
        PresetPaths {
            stopwords: PathBuf::from("preset/stopwords.txt"),
            combinations: PathBuf::from("preset/combinations.txt"),
            bad_characters: PathBuf::from("preset/bad_characters.txt"),
            probes: None,
            lexicon: None,
        }
    }
}

/// Canonical character → the variants folded into it, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadCharacterMap {
    entries: Vec<(char, Vec<String>)>,
}

impl BadCharacterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append variants for a destination character.
    ///
    /// Repeated destinations extend the existing entry so that load order is kept.
    pub fn insert<I, S>(&mut self, destination: char, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.is_empty() && *v != destination.to_string());

        match self.entries.iter_mut().find(|(d, _)| *d == destination) {
            Some((_, existing)) => {
                for variant in variants {
                    if !existing.contains(&variant) {
                        existing.push(variant);
                    }
                }
            }
            None => {
                let mut list: Vec<String> = Vec::new();
                for variant in variants {
                    if !list.contains(&variant) {
                        list.push(variant);
                    }
                }
                self.entries.push((destination, list));
            }
        }
    }

    /// Iterate over `(destination, variants)` in load order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[String])> {
        self.entries.iter().map(|(d, v)| (*d, v.as_slice()))
    }

    /// The variants folded into a space.
    pub fn space_bucket(&self) -> &[String] {
        self.entries
            .iter()
            .find(|(d, _)| *d == ' ')
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of destination characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical phrase → surface variants, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinationTable {
    entries: Vec<(String, Vec<String>)>,
}

impl CombinationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a combination. The canonical phrase is always its own first variant.
    pub fn insert<I, S>(&mut self, canonical: &str, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = vec![canonical.to_string()];
        for variant in variants {
            let variant: String = variant.into();
            if !variant.is_empty() && !list.contains(&variant) {
                list.push(variant);
            }
        }
        self.entries.push((canonical.to_string(), list));
    }

    /// Iterate over `(canonical, variants)` in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_slice()))
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All preset tables used by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PresetTables {
    bad_characters: BadCharacterMap,
    combinations: CombinationTable,
    stopwords: AHashSet<String>,
    probes: AHashSet<String>,
}

impl PresetTables {
    /// Assemble tables from already-built parts.
    pub fn new(
        bad_characters: BadCharacterMap,
        combinations: CombinationTable,
        stopwords: AHashSet<String>,
        probes: AHashSet<String>,
    ) -> Self {
        PresetTables {
            bad_characters,
            combinations,
            stopwords,
            probes,
        }
    }

    /// The built-in Persian tables.
    pub fn builtin() -> Self {
        let mut bad_characters = BadCharacterMap::new();
        bad_characters.insert('ا', ["إ", "أ", "ٱ"]);
        bad_characters.insert('و', ["ؤ"]);
        bad_characters.insert('ی', ["ي", "ئ"]);
        bad_characters.insert('ک', ["ك"]);
        bad_characters.insert('ه', ["ة", "ۀ", "\u{0647}\u{0654}"]);

        let digits = FARSI_DIGITS
            .chars()
            .chain(ENGLISH_DIGITS.chars())
            .chain(ARABIC_DIGITS.chars())
            .chain(std::iter::once(ZWJ))
            .map(String::from);
        bad_characters.insert(' ', SIGNS.iter().map(|s| s.to_string()).chain(digits));

        let mut combinations = CombinationTable::new();
        for entry in DEFAULT_COMBINATIONS {
            combinations.insert(entry[0], entry[1..].iter().copied());
        }

        let stopwords = DEFAULT_PERSIAN_STOP_WORDS
            .iter()
            .map(|s| s.to_string())
            .collect();

        PresetTables::new(bad_characters, combinations, stopwords, AHashSet::new())
    }

    /// Load every table from disk. A missing or unreadable file is fatal.
    pub fn load(paths: &PresetPaths) -> Result<Self> {
        let stopwords = parse_word_list(&read_preset(&paths.stopwords)?);
        let combinations = parse_combinations(
            &read_preset(&paths.combinations)?,
            &paths.combinations.display().to_string(),
        );
        let bad_characters = parse_bad_characters(
            &read_preset(&paths.bad_characters)?,
            &paths.bad_characters.display().to_string(),
        );
        let probes = match &paths.probes {
            Some(path) => parse_word_list(&read_preset(path)?),
            None => AHashSet::new(),
        };

        info!(
            "Loaded presets: {} stopwords, {} combinations, {} bad-character groups, {} probes",
            stopwords.len(),
            combinations.len(),
            bad_characters.len(),
            probes.len()
        );

        Ok(PresetTables::new(
            bad_characters,
            combinations,
            stopwords,
            probes,
        ))
    }

    /// Replace the stopword set.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the combination table.
    pub fn with_combinations(mut self, combinations: CombinationTable) -> Self {
        self.combinations = combinations;
        self
    }

    /// Replace the probe terms.
    pub fn with_probes<I, S>(mut self, probes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probes = probes.into_iter().map(Into::into).collect();
        self
    }

    /// The bad-character folding table.
    pub fn bad_characters(&self) -> &BadCharacterMap {
        &self.bad_characters
    }

    /// The combination table.
    pub fn combinations(&self) -> &CombinationTable {
        &self.combinations
    }

    /// The stopword set.
    pub fn stopwords(&self) -> &AHashSet<String> {
        &self.stopwords
    }

    /// The probe terms.
    pub fn probes(&self) -> &AHashSet<String> {
        &self.probes
    }

    /// Exact-match stopword test.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

fn read_preset(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        KhabarError::preset(format!("failed to read {}: {e}", path.display()))
    })
}

/// Parse a newline-delimited word list; blank lines are ignored and duplicates removed.
pub fn parse_word_list(content: &str) -> AHashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a combination table, skipping malformed records.
pub fn parse_combinations(content: &str, source: &str) -> CombinationTable {
    let mut table = CombinationTable::new();
    for (line, record) in read_records(content, source) {
        let canonical = record.get(0).unwrap_or("");
        if canonical.is_empty() {
            warn!("Skipping combination on {source}:{line}: empty canonical phrase");
            continue;
        }
        table.insert(canonical, record.iter().skip(1));
    }
    table
}

/// Parse a bad-character table, skipping malformed records.
pub fn parse_bad_characters(content: &str, source: &str) -> BadCharacterMap {
    let mut map = BadCharacterMap::new();
    for (line, record) in read_records(content, source) {
        let mut destination = record.get(0).unwrap_or("").chars();
        let (Some(dest), None) = (destination.next(), destination.next()) else {
            warn!("Skipping bad-character record on {source}:{line}: destination must be one character");
            continue;
        };
        if !record.iter().skip(1).any(|v| !v.is_empty()) {
            warn!("Skipping bad-character record on {source}:{line}: no variants");
            continue;
        }
        map.insert(dest, record.iter().skip(1));
    }
    map
}

fn read_records(content: &str, source: &str) -> Vec<(u64, StringRecord)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 1);
                records.push((line, record));
            }
            Err(e) => warn!("Skipping unreadable record in {source}: {e}"),
        }
    }
    records
}
