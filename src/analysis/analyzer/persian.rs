//! Analyzer for Persian news text.
//!
//! [`PersianAnalyzer`] wires the normalization and token filter stages for one
//! [`NormalizationMode`]:
//!
//! ```text
//! simple: normalize → whitespace split → strip joiners → drop empty → stopwords
//! rich:   normalize → merge combinations → word segmentation → drop empty
//!         → stopwords → morphology → drop empty
//! ```
//!
//! Besides the [`Analyzer`] implementation it exposes each stage on its own, so
//! callers can inspect intermediate results.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use khabar::analysis::analyzer::persian::PersianAnalyzer;
//! use khabar::analysis::preset::PresetTables;
//!
//! let analyzer = PersianAnalyzer::simple(Arc::new(PresetTables::builtin())).unwrap();
//! let terms = analyzer.terms("<p>گزارش خبرگزاری از تهران</p>").unwrap();
//! assert_eq!(terms, vec!["گزارش", "خبرگزاری", "تهران"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::combination::CombinationCharFilter;
use crate::analysis::morphology::{IdentityAnalyzer, MorphologicalAnalyzer, ProbeAudit};
use crate::analysis::normalizer::{NormalizationMode, TextNormalizer};
use crate::analysis::preset::PresetTables;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::morphology::MorphologyFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::strip::StripFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;
use crate::lexical::posting::Term;

/// The full text-to-terms pipeline.
#[derive(Clone, Debug)]
pub struct PersianAnalyzer {
    mode: NormalizationMode,
    normalizer: Arc<TextNormalizer>,
    combinations: Arc<CombinationCharFilter>,
    stop_filter: Arc<StopFilter>,
    inner: PipelineAnalyzer,
}

impl PersianAnalyzer {
    /// Build the analyzer for `mode`.
    ///
    /// `morphology` is only consulted in [`NormalizationMode::Rich`]; the
    /// optional `audit` records probe stems seen by the morphology stage.
    pub fn new(
        presets: Arc<PresetTables>,
        mode: NormalizationMode,
        morphology: Arc<dyn MorphologicalAnalyzer>,
        audit: Option<Arc<ProbeAudit>>,
    ) -> Result<Self> {
        let normalizer = Arc::new(TextNormalizer::new(presets.clone(), mode)?);
        let combinations = Arc::new(CombinationCharFilter::new(presets.clone()));
        let stop_filter = Arc::new(StopFilter::new(presets));
        let remove_empty: Arc<dyn Filter> = Arc::new(RemoveEmptyFilter::new());

        let inner = match mode {
            NormalizationMode::Simple => {
                PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
                    .add_char_filter(normalizer.clone())
                    .add_filter(Arc::new(StripFilter::new()))
                    .add_filter(remove_empty)
                    .add_filter(stop_filter.clone())
                    .with_name("persian_simple")
            }
            NormalizationMode::Rich => {
                let mut morphology_filter = MorphologyFilter::new(morphology);
                if let Some(audit) = audit.filter(|audit| audit.is_active()) {
                    morphology_filter = morphology_filter.with_audit(audit);
                }

                PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
                    .add_char_filter(normalizer.clone())
                    .add_char_filter(combinations.clone())
                    .add_filter(remove_empty.clone())
                    .add_filter(stop_filter.clone())
                    .add_filter(Arc::new(morphology_filter))
                    .add_filter(remove_empty)
                    .with_name("persian_rich")
            }
        };

        Ok(PersianAnalyzer {
            mode,
            normalizer,
            combinations,
            stop_filter,
            inner,
        })
    }

    /// The simple-mode analyzer.
    pub fn simple(presets: Arc<PresetTables>) -> Result<Self> {
        Self::new(
            presets,
            NormalizationMode::Simple,
            Arc::new(IdentityAnalyzer::new()),
            None,
        )
    }

    /// The rich-mode analyzer over a morphology backend.
    pub fn rich(
        presets: Arc<PresetTables>,
        morphology: Arc<dyn MorphologicalAnalyzer>,
        audit: Option<Arc<ProbeAudit>>,
    ) -> Result<Self> {
        Self::new(presets, NormalizationMode::Rich, morphology, audit)
    }

    /// The normalization mode.
    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    /// Raw text to canonical text.
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Rewrite known multiword expressions into single merge-safe tokens.
    pub fn merge_combinations(&self, text: &str) -> String {
        self.combinations.filter(text)
    }

    /// Split canonical text into surface tokens, dropping empty ones.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .inner
            .tokenizer()
            .tokenize(text)?
            .filter(|token| !token.text.trim().is_empty())
            .map(|token| token.text)
            .collect())
    }

    /// Whether a surface token survives the stopword filter.
    pub fn keep(&self, token: &str) -> bool {
        self.stop_filter.keep(token)
    }

    /// Run the whole pipeline and return the ordered index terms.
    pub fn terms(&self, text: &str) -> Result<Vec<Term>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

impl Analyzer for PersianAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        match self.mode {
            NormalizationMode::Simple => "persian_simple",
            NormalizationMode::Rich => "persian_rich",
        }
    }
}
