//! Configuration.
//!
//! [`KhabarConfig`] gathers everything needed to build and persist an index.
//! It is read from an optional JSON file; every field has a default, so an
//! empty object `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "mode": "rich",
//!   "presets": {
//!     "stopwords": "preset/stopwords.txt",
//!     "combinations": "preset/combinations.txt",
//!     "bad_characters": "preset/bad_characters.txt",
//!     "probes": "preset/probes.txt"
//!   },
//!   "text_column": "content",
//!   "serializer": { "chunk_size": 65536, "separator_width": 80 }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::persian::PersianAnalyzer;
use crate::analysis::morphology::{
    IdentityAnalyzer, LexiconAnalyzer, MorphologicalAnalyzer, ProbeAudit,
};
use crate::analysis::normalizer::NormalizationMode;
use crate::analysis::preset::{PresetPaths, PresetTables};
use crate::document::csv::DEFAULT_TEXT_COLUMN;
use crate::error::{KhabarError, Result};
use crate::lexical::serializer::SerializerConfig;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KhabarConfig {
    /// Normalization mode.
    pub mode: NormalizationMode,

    /// Preset file locations.
    pub presets: PresetPaths,

    /// CSV column holding the document text.
    pub text_column: String,

    /// Index serialization settings.
    pub serializer: SerializerConfig,
}

impl Default for KhabarConfig {
    fn default() -> Self {
        KhabarConfig {
            mode: NormalizationMode::default(),
            presets: PresetPaths::default(),
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            serializer: SerializerConfig::default(),
        }
    }
}

impl KhabarConfig {
    /// Read a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KhabarError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: KhabarConfig = serde_json::from_str(&content).map_err(|e| {
            KhabarError::config(format!("invalid configuration {}: {e}", path.display()))
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check the settings for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.serializer.chunk_size == 0 {
            return Err(KhabarError::config("serializer.chunk_size must be greater than 0"));
        }
        if self.serializer.separator_width == 0 {
            return Err(KhabarError::config(
                "serializer.separator_width must be greater than 0",
            ));
        }
        if self.text_column.trim().is_empty() {
            return Err(KhabarError::config("text_column must not be empty"));
        }
        Ok(())
    }

    /// Load the preset tables. A missing or unreadable file is fatal.
    pub fn load_presets(&self) -> Result<Arc<PresetTables>> {
        Ok(Arc::new(PresetTables::load(&self.presets)?))
    }

    /// The morphological analyzer backend: the lexicon when one is configured,
    /// otherwise the identity analyzer.
    pub fn morphology(&self) -> Result<Arc<dyn MorphologicalAnalyzer>> {
        Ok(match &self.presets.lexicon {
            Some(path) => Arc::new(LexiconAnalyzer::load(path)?),
            None => Arc::new(IdentityAnalyzer::new()),
        })
    }

    /// Build the analyzer for the configured mode over `presets`.
    pub fn analyzer(
        &self,
        presets: Arc<PresetTables>,
        audit: Option<Arc<ProbeAudit>>,
    ) -> Result<PersianAnalyzer> {
        PersianAnalyzer::new(presets, self.mode, self.morphology()?, audit)
    }
}
