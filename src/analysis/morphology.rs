//! Morphological analysis capability.
//!
//! Lemmatization and stemming of Persian are provided by external analyzers.
//! The pipeline only depends on the [`MorphologicalAnalyzer`] trait; any backend
//! implementing it can be plugged in.
//!
//! A stemmer may be unable to decide between two verb-compound roots and return
//! both, joined by a marker (`&` or `#`). [`StemOutcome::parse`] reads that
//! encoding and [`StemOutcome::resolve`] picks the candidate that occurs in the
//! surface token.
//!
//! # Examples
//!
//! ```
//! use khabar::analysis::morphology::StemOutcome;
//!
//! let outcome = StemOutcome::parse("گفت&گو");
//! assert_eq!(outcome.resolve("گفتند"), "گفت");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use parking_lot::Mutex;

use crate::error::{KhabarError, Result};

/// Marker characters that join two competing stem candidates.
pub const COMPOUND_MARKERS: [char; 2] = ['&', '#'];

/// The result of stemming a lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StemOutcome {
    /// A single unambiguous root.
    Root(String),
    /// Two competing verb-compound roots.
    Compound { first: String, second: String },
}

impl StemOutcome {
    /// Read a raw stemmer result, splitting on the first compound marker.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(COMPOUND_MARKERS) {
            Some((first, second)) => {
                // Later markers belong to the second candidate's tail; keep its first part.
                let second = second
                    .split(COMPOUND_MARKERS)
                    .next()
                    .unwrap_or_default();
                StemOutcome::Compound {
                    first: first.to_string(),
                    second: second.to_string(),
                }
            }
            None => StemOutcome::Root(raw.to_string()),
        }
    }

    /// Pick the stem for `surface`.
    ///
    /// A compound resolves to the first non-empty candidate that is a substring
    /// of the surface token, else the second candidate (or the first when the
    /// second is empty).
    pub fn resolve(self, surface: &str) -> String {
        match self {
            StemOutcome::Root(root) => root,
            StemOutcome::Compound { first, second } => {
                if !first.is_empty() && surface.contains(first.as_str()) {
                    first
                } else if !second.is_empty() && surface.contains(second.as_str()) {
                    second
                } else if second.is_empty() {
                    first
                } else {
                    second
                }
            }
        }
    }

    /// Whether this outcome carries two candidates.
    pub fn is_compound(&self) -> bool {
        matches!(self, StemOutcome::Compound { .. })
    }
}

/// Trait for lemmatizer/stemmer backends.
pub trait MorphologicalAnalyzer: Send + Sync {
    /// Reduce a surface word to its lemma.
    fn lemmatize(&self, word: &str) -> String;

    /// Stem a lemma, possibly returning two competing candidates.
    fn stem(&self, lemma: &str) -> StemOutcome;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

/// Analyzer that returns words unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityAnalyzer;

impl IdentityAnalyzer {
    pub fn new() -> Self {
        IdentityAnalyzer
    }
}

impl MorphologicalAnalyzer for IdentityAnalyzer {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }

    fn stem(&self, lemma: &str) -> StemOutcome {
        StemOutcome::Root(lemma.to_string())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Table-driven analyzer: `surface → lemma` and `lemma → raw stem` lookups.
///
/// Words missing from a table pass through unchanged. Raw stems use the
/// compound marker encoding understood by [`StemOutcome::parse`].
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    lemmas: AHashMap<String, String>,
    stems: AHashMap<String, String>,
}

impl LexiconAnalyzer {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lemma mapping.
    pub fn with_lemma<S: Into<String>>(mut self, surface: S, lemma: S) -> Self {
        self.lemmas.insert(surface.into(), lemma.into());
        self
    }

    /// Add a raw stem mapping.
    pub fn with_stem<S: Into<String>>(mut self, lemma: S, raw_stem: S) -> Self {
        self.stems.insert(lemma.into(), raw_stem.into());
        self
    }

    /// Parse `surface,lemma[,stem]` records. Malformed records are skipped.
    pub fn parse(content: &str, source: &str) -> Self {
        let mut lexicon = LexiconAnalyzer::new();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable lexicon record in {source}: {e}");
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            match (record.get(0), record.get(1), record.get(2), record.len()) {
                (Some(surface), Some(lemma), stem, 2 | 3)
                    if !surface.is_empty() && !lemma.is_empty() =>
                {
                    lexicon.lemmas.insert(surface.to_string(), lemma.to_string());
                    if let Some(stem) = stem.filter(|s| !s.is_empty()) {
                        lexicon.stems.insert(lemma.to_string(), stem.to_string());
                    }
                }
                _ => warn!("Skipping lexicon record on {source}:{line}: expected surface,lemma[,stem]"),
            }
        }

        lexicon
    }

    /// Load a lexicon file. A missing or unreadable file is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KhabarError::preset(format!("failed to read {}: {e}", path.display()))
        })?;
        let lexicon = Self::parse(&content, &path.display().to_string());
        info!(
            "Loaded lexicon: {} lemmas, {} stems",
            lexicon.lemmas.len(),
            lexicon.stems.len()
        );
        Ok(lexicon)
    }
}

impl MorphologicalAnalyzer for LexiconAnalyzer {
    fn lemmatize(&self, word: &str) -> String {
        self.lemmas
            .get(word)
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }

    fn stem(&self, lemma: &str) -> StemOutcome {
        match self.stems.get(lemma) {
            Some(raw) => StemOutcome::parse(raw),
            None => StemOutcome::Root(lemma.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// Records which surface forms produced each probe stem.
///
/// Instrumentation only: recording never changes what gets indexed.
#[derive(Debug, Default)]
pub struct ProbeAudit {
    probes: AHashSet<String>,
    seen: Mutex<AHashMap<String, Vec<String>>>,
}

impl ProbeAudit {
    /// Create an audit for the given probe terms.
    pub fn new(probes: AHashSet<String>) -> Self {
        ProbeAudit {
            probes,
            seen: Mutex::new(AHashMap::new()),
        }
    }

    /// Whether any probe terms are configured.
    pub fn is_active(&self) -> bool {
        !self.probes.is_empty()
    }

    /// Record `surface` under `stem` if `stem` is a probe term.
    pub fn record(&self, stem: &str, surface: &str) {
        if !self.probes.contains(stem) {
            return;
        }
        let mut seen = self.seen.lock();
        let forms = seen.entry(stem.to_string()).or_default();
        if !forms.iter().any(|f| f == surface) {
            forms.push(surface.to_string());
        }
    }

    /// Surface forms recorded so far, keyed by stem, in first-seen order.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.seen
            .lock()
            .iter()
            .map(|(stem, forms)| (stem.clone(), forms.clone()))
            .collect()
    }
}
