//! Integration tests for the analysis pipeline over the shipped preset files.

use std::path::PathBuf;
use std::sync::Arc;

use khabar::analysis::analyzer::persian::PersianAnalyzer;
use khabar::analysis::morphology::{LexiconAnalyzer, ProbeAudit};
use khabar::analysis::normalizer::{NormalizationMode, TextNormalizer};
use khabar::analysis::preset::{PresetPaths, PresetTables};
use khabar::error::Result;

fn preset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("preset")
}

fn preset_paths() -> PresetPaths {
    let dir = preset_dir();
    PresetPaths {
        stopwords: dir.join("stopwords.txt"),
        combinations: dir.join("combinations.txt"),
        bad_characters: dir.join("bad_characters.txt"),
        probes: Some(dir.join("probes.txt")),
        lexicon: Some(dir.join("lexicon.txt")),
    }
}

fn presets() -> Arc<PresetTables> {
    Arc::new(PresetTables::load(&preset_paths()).unwrap())
}

#[test]
fn test_shipped_presets_load() -> Result<()> {
    let tables = PresetTables::load(&preset_paths())?;

    assert!(tables.is_stopword("از"));
    assert!(tables.probes().contains("رفت"));
    assert_eq!(tables.bad_characters().len(), 6);
    assert!(tables.bad_characters().space_bucket().contains(&",".to_string()));
    assert!(tables.bad_characters().space_bucket().contains(&"\"".to_string()));
    assert!(tables.combinations().len() >= 4);

    Ok(())
}

#[test]
fn test_shipped_presets_match_builtin_folding() -> Result<()> {
    let shipped = TextNormalizer::new(presets(), NormalizationMode::Simple)?;
    let builtin = TextNormalizer::new(Arc::new(PresetTables::builtin()), NormalizationMode::Simple)?;

    for text in [
        "<p>Hello!</p>",
        "كتابِ «علي» صفحهٔ ۱۲",
        "\"نقل قول\", و (پرانتز)",
        "خانهٔ ما؛ أحمد",
    ] {
        assert_eq!(shipped.normalize(text), builtin.normalize(text), "text: {text:?}");
    }

    Ok(())
}

#[test]
fn test_missing_preset_is_fatal() {
    let mut paths = preset_paths();
    paths.stopwords = preset_dir().join("missing.txt");

    let err = PresetTables::load(&paths).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_simple_mode_markup_example() -> Result<()> {
    let normalizer = TextNormalizer::new(presets(), NormalizationMode::Simple)?;
    assert_eq!(normalizer.normalize("<p>Hello!</p>"), "Hello ");
    Ok(())
}

#[test]
fn test_simple_mode_is_idempotent() -> Result<()> {
    let normalizer = TextNormalizer::new(presets(), NormalizationMode::Simple)?;

    for text in [
        "<div class=\"news\">خبرگزاری <b>ایرنا</b> گزارش داد:\n«قیمت‌ها ۱۰٪ افزایش یافت»</div>",
        "<script>var x = 1;</script>متن&nbsp;اصلی &amp; فرعی",
        "a\r\nb\rc",
        "",
        "!!!",
        "ه\u{0654}\u{0654}",
        "ية\u{0654}\u{0654}",
        "<b>خانه\u{0654}\u{0654}</b> &#1607;&#1620;&#1620;",
    ] {
        let once = normalizer.normalize(text);
        assert_eq!(normalizer.normalize(&once), once, "text: {text:?}");
        assert!(once.chars().count() <= text.chars().count());
    }

    Ok(())
}

#[test]
fn test_rich_mode_end_to_end() -> Result<()> {
    let presets = presets();
    let lexicon = LexiconAnalyzer::load(preset_dir().join("lexicon.txt"))?;
    let audit = Arc::new(ProbeAudit::new(presets.probes().clone()));
    let analyzer = PersianAnalyzer::rich(presets, Arc::new(lexicon), Some(audit.clone()))?;

    let terms = analyzer.terms(
        "<p>خبرگزاری جمهوری اسلامی (IRNA): نمایندگان به سازمان ملل رفتند و گفتند 😀</p>",
    )?;

    assert_eq!(
        terms,
        vec!["خبرگزاری", "جمهوری_اسلامی", "نمایندگان", "سازمان_ملل", "رفت", "گفت"]
    );

    let snapshot = audit.snapshot();
    assert_eq!(snapshot["رفت"], vec!["رفتند"]);
    assert_eq!(snapshot["گفت"], vec!["گفتند"]);

    Ok(())
}

#[test]
fn test_rich_mode_compound_fallback() -> Result<()> {
    let lexicon = LexiconAnalyzer::load(preset_dir().join("lexicon.txt"))?;
    let analyzer = PersianAnalyzer::rich(presets(), Arc::new(lexicon), None)?;

    // The surface form contains only the second candidate.
    assert_eq!(analyzer.terms("می‌روند")?, vec!["رو"]);
    assert_eq!(analyzer.terms("می‌کنند")?, vec!["کن"]);

    Ok(())
}

#[test]
fn test_stages_compose_to_terms() -> Result<()> {
    let analyzer = PersianAnalyzer::simple(presets())?;
    let text = "<h1>گزارش</h1> بازار تهران، امروز!";

    let canonical = analyzer.normalize(text);
    let kept: Vec<String> = analyzer
        .tokenize(&canonical)?
        .into_iter()
        .filter(|token| analyzer.keep(token))
        .collect();

    assert_eq!(kept, analyzer.terms(text)?);
    Ok(())
}

#[test]
fn test_simple_mode_drops_stray_joiners() -> Result<()> {
    let analyzer = PersianAnalyzer::simple(presets())?;

    let terms = analyzer.terms("خبر \u{200C} تهران \u{200C}\u{200C}خبر می\u{200C}روند\u{200C}")?;

    assert_eq!(terms, vec!["خبر", "تهران", "خبر", "می\u{200C}روند"]);
    Ok(())
}
