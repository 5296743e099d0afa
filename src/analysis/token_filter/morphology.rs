//! Morphological normalization filter.
//!
//! Each token is lemmatized, the lemma is stemmed, and a compound stem is
//! resolved against the token's surface form. When a [`ProbeAudit`] is
//! attached, the surface form is recorded under the resulting stem.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::morphology::{MorphologicalAnalyzer, ProbeAudit, StemOutcome};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Filter that reduces surface tokens to index terms.
#[derive(Clone)]
pub struct MorphologyFilter {
    analyzer: Arc<dyn MorphologicalAnalyzer>,
    audit: Option<Arc<ProbeAudit>>,
}

impl MorphologyFilter {
    /// Create a filter over the given analyzer backend.
    pub fn new(analyzer: Arc<dyn MorphologicalAnalyzer>) -> Self {
        MorphologyFilter {
            analyzer,
            audit: None,
        }
    }

    /// Attach a probe audit.
    pub fn with_audit(mut self, audit: Arc<ProbeAudit>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Reduce one surface word to its term.
    pub fn term_of(&self, surface: &str) -> String {
        let lemma = self.analyzer.lemmatize(surface);
        let outcome = self.analyzer.stem(&lemma);

        let stem = match outcome {
            StemOutcome::Root(root) => root,
            compound => {
                let raw = format!("{compound:?}");
                let stem = compound.resolve(surface);
                debug!("Resolved compound stem {raw} for {surface:?} to {stem:?}");
                stem
            }
        };

        if let Some(audit) = &self.audit {
            audit.record(&stem, surface);
        }
        stem
    }
}

impl Filter for MorphologyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let term = self.term_of(&token.text);
                    token.normalized(term)
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "morphology"
    }
}

impl fmt::Debug for MorphologyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorphologyFilter")
            .field("analyzer", &self.analyzer.name())
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::morphology::{IdentityAnalyzer, LexiconAnalyzer};

    fn lexicon() -> Arc<dyn MorphologicalAnalyzer> {
        Arc::new(
            LexiconAnalyzer::new()
                .with_lemma("کتاب‌ها", "کتاب")
                .with_lemma("رفتند", "رفت")
                .with_lemma("می‌روند", "رفت")
                .with_stem("رفت", "رفت&رو"),
        )
    }

    #[test]
    fn test_morphology_filter() {
        let filter = MorphologyFilter::new(lexicon());
        let tokens = vec![
            Token::new("کتاب‌ها", 0),
            Token::new("رفتند", 1),
            Token::new("می‌روند", 2),
            Token::new("و", 3).stop(),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "کتاب");
        assert_eq!(result[0].surface(), "کتاب‌ها");
        assert_eq!(result[1].text, "رفت");
        assert_eq!(result[2].text, "رو");
        assert_eq!(result[3].text, "و");
        assert_eq!(result[3].original_text, None);
    }

    #[test]
    fn test_identity_keeps_tokens() {
        let filter = MorphologyFilter::new(Arc::new(IdentityAnalyzer::new()));
        assert_eq!(filter.term_of("خبرگزاری"), "خبرگزاری");
    }

    #[test]
    fn test_audit_records_without_changing_terms() {
        let audit = Arc::new(ProbeAudit::new(["رفت".to_string()].into_iter().collect()));
        let audited = MorphologyFilter::new(lexicon()).with_audit(audit.clone());
        let plain = MorphologyFilter::new(lexicon());

        for word in ["رفتند", "کتاب‌ها", "رفتند"] {
            assert_eq!(audited.term_of(word), plain.term_of(word));
        }

        let snapshot = audit.snapshot();
        assert_eq!(snapshot["رفت"], vec!["رفتند"]);
    }
}
