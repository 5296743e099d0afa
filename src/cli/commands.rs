//! Command implementations for the khabar CLI.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::analysis::analyzer::persian::PersianAnalyzer;
use crate::analysis::morphology::ProbeAudit;
use crate::analysis::normalizer::NormalizationMode;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::KhabarConfig;
use crate::document::csv::CsvDocumentSource;
use crate::error::{KhabarError, Result};
use crate::lexical::builder::IndexBuilder;
use crate::lexical::serializer::IndexSerializer;
use crate::query::engine::QueryEngine;
use crate::query::mode::{QueryMode, QueryRequest};

/// File name of the saved index inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.json";
/// File name of the plain-text report inside the output directory.
pub const REPORT_FILE_NAME: &str = "index_report.txt";
/// File name of the probe audit inside the output directory.
pub const AUDIT_FILE_NAME: &str = "probe_audit.json";

/// Execute a CLI command.
pub fn execute_command(args: KhabarArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Index(index_args) => build_index(index_args.clone(), config, &args),
        Command::Query(query_args) => run_query(query_args.clone(), config, &args),
        Command::Normalize(normalize_args) => normalize_text(normalize_args.clone(), config, &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), config, &args),
    }
}

/// Read the configuration file, if any, and apply command line overrides.
fn load_config(args: &KhabarArgs) -> Result<KhabarConfig> {
    let mut config = match &args.config {
        Some(path) => KhabarConfig::from_file(path)?,
        None => KhabarConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Command::Index(IndexArgs {
        text_column: Some(column),
        ..
    }) = &args.command
    {
        config.text_column = column.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Build an index from CSV documents and write it to the output directory.
fn build_index(args: IndexArgs, config: KhabarConfig, cli_args: &KhabarArgs) -> Result<()> {
    let start_time = Instant::now();

    let presets = config.load_presets()?;
    let audit = if config.mode == NormalizationMode::Rich && !presets.probes().is_empty() {
        Some(Arc::new(ProbeAudit::new(presets.probes().clone())))
    } else {
        if !presets.probes().is_empty() {
            warn!("Probe terms are only audited in rich mode");
        }
        None
    };
    let analyzer = config.analyzer(presets, audit.clone())?;

    let source = CsvDocumentSource::open(&args.inputs, &config.text_column)?;
    let mut builder = IndexBuilder::new(analyzer);
    for document in source.documents()? {
        builder.add_document(&document)?;
    }
    let documents = builder.documents();
    let index = builder.finish();

    fs::create_dir_all(&args.output)?;
    let serializer = IndexSerializer::new(config.serializer)?;
    let index_file = args.output.join(INDEX_FILE_NAME);
    let report_file = args.output.join(REPORT_FILE_NAME);
    serializer.save(&index, &index_file)?;
    serializer.save_report(&index, &report_file)?;

    let audit_file = match audit {
        Some(audit) => {
            let path = args.output.join(AUDIT_FILE_NAME);
            let audit: ProbeAuditOutput = audit.snapshot();
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &audit)?;
            writer.flush()?;
            info!("Wrote probe audit for {} stems to {}", audit.len(), path.display());
            Some(path)
        }
        None => None,
    };

    let result = IndexingResult {
        mode: config.mode,
        files: source.files().len(),
        documents,
        stats: index.stats(),
        index_file,
        report_file,
        audit_file,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Index built", &result, cli_args)
}

/// Evaluate one query against a saved index.
fn run_query(args: QueryArgs, config: KhabarConfig, cli_args: &KhabarArgs) -> Result<()> {
    let serializer = IndexSerializer::new(config.serializer)?;
    let index = serializer.load(&args.index_file)?;
    let engine = QueryEngine::new(&index);

    let takes_term = QueryMode::try_from(args.query_mode).is_ok_and(QueryMode::takes_term);
    let argument = match args.argument {
        Some(raw) if args.analyze && takes_term => {
            let analyzer = config.analyzer(config.load_presets()?, None)?;
            Some(analyze_term(&analyzer, &raw)?)
        }
        other => other,
    };

    let output = match QueryRequest::parse(args.query_mode, argument.as_deref()) {
        Ok(request) => match engine.execute(&request) {
            Ok(result) => QueryOutput {
                mode: Some(request.mode),
                argument: Some(request.argument),
                result: Some(result),
                outcome: None,
            },
            Err(e) if !e.is_fatal() => QueryOutput {
                mode: Some(request.mode),
                argument: Some(request.argument),
                result: None,
                outcome: Some(e.to_string()),
            },
            Err(e) => return Err(e),
        },
        Err(e) if !e.is_fatal() => QueryOutput {
            mode: QueryMode::try_from(args.query_mode).ok(),
            argument: None,
            result: None,
            outcome: Some(e.to_string()),
        },
        Err(e) => return Err(e),
    };

    output_result("Query result", &output, cli_args)
}

/// Reduce a typed surface form to the index term it would be stored as.
fn analyze_term(analyzer: &PersianAnalyzer, raw: &str) -> Result<String> {
    let mut terms = analyzer.terms(raw)?;
    if terms.len() > 1 {
        warn!(
            "{raw:?} analyzes to {} terms; using the first",
            terms.len()
        );
    }
    if terms.is_empty() {
        return Err(KhabarError::invalid_argument(format!(
            "{raw:?} analyzes to no terms"
        )));
    }
    Ok(terms.swap_remove(0))
}

/// Show the intermediate results of the analysis pipeline for one text.
fn normalize_text(args: NormalizeArgs, config: KhabarConfig, cli_args: &KhabarArgs) -> Result<()> {
    let analyzer = config.analyzer(config.load_presets()?, None)?;

    let canonical = analyzer.normalize(&args.text);
    let merged = match analyzer.mode() {
        NormalizationMode::Rich => analyzer.merge_combinations(&canonical),
        NormalizationMode::Simple => canonical.clone(),
    };

    let result = NormalizeOutput {
        mode: analyzer.mode(),
        tokens: analyzer.tokenize(&merged)?,
        terms: analyzer.terms(&args.text)?,
        canonical,
    };

    output_result("Normalization", &result, cli_args)
}

/// Show statistics of a saved index.
fn show_stats(args: StatsArgs, config: KhabarConfig, cli_args: &KhabarArgs) -> Result<()> {
    let serializer = IndexSerializer::new(config.serializer)?;
    let index = serializer.load(&args.index_file)?;

    let result = StatsOutput {
        index_file: args.index_file,
        stats: index.stats(),
    };

    output_result("Index statistics", &result, cli_args)
}
