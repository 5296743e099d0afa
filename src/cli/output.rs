//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizationMode;
use crate::cli::args::{KhabarArgs, OutputFormat};
use crate::error::Result;
use crate::lexical::inverted_index::IndexStats;
use crate::query::engine::QueryResult;
use crate::query::mode::{QueryArgument, QueryMode};

/// Result structure for index construction.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexingResult {
    pub mode: NormalizationMode,
    pub files: usize,
    pub documents: u64,
    pub stats: IndexStats,
    pub index_file: PathBuf,
    pub report_file: PathBuf,
    pub audit_file: Option<PathBuf>,
    pub duration_ms: u64,
}

impl fmt::Display for IndexingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Files read: {}", self.files)?;
        writeln!(f, "Documents ingested: {}", self.documents)?;
        writeln!(f, "Distinct terms: {}", self.stats.terms)?;
        writeln!(f, "Positions: {}", self.stats.positions)?;
        writeln!(f, "Index: {}", self.index_file.display())?;
        write!(f, "Report: {}", self.report_file.display())?;
        if let Some(audit_file) = &self.audit_file {
            write!(f, "\nProbe audit: {}", audit_file.display())?;
        }
        write!(f, "\nTime: {}ms", self.duration_ms)
    }
}

/// Result structure for a query.
///
/// Non-fatal query outcomes (unknown term, unknown mode, ...) are reported in
/// `outcome` instead of failing the command.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryOutput {
    pub mode: Option<QueryMode>,
    pub argument: Option<QueryArgument>,
    pub result: Option<QueryResult>,
    pub outcome: Option<String>,
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mode) = &self.mode {
            match &self.argument {
                Some(QueryArgument::None) | None => writeln!(f, "{mode}")?,
                Some(argument) => writeln!(f, "{mode} {argument}")?,
            }
        }
        match (&self.result, &self.outcome) {
            (Some(result), _) => write!(f, "{result}"),
            (None, Some(outcome)) => write!(f, "{outcome}"),
            (None, None) => Ok(()),
        }
    }
}

/// Result structure for the normalize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeOutput {
    pub mode: NormalizationMode,
    pub canonical: String,
    pub tokens: Vec<String>,
    pub terms: Vec<String>,
}

impl fmt::Display for NormalizeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Canonical: {}", self.canonical)?;
        writeln!(f, "Tokens: {}", self.tokens.join(" | "))?;
        write!(f, "Terms: {}", self.terms.join(" | "))
    }
}

/// Result structure for index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub index_file: PathBuf,
    #[serde(flatten)]
    pub stats: IndexStats,
}

impl fmt::Display for StatsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index: {}", self.index_file.display())?;
        writeln!(f, "Documents: {}", self.stats.documents)?;
        writeln!(f, "Terms: {}", self.stats.terms)?;
        write!(f, "Positions: {}", self.stats.positions)
    }
}

/// Probe audit as written to disk: stem → surface forms.
pub type ProbeAuditOutput = BTreeMap<String, Vec<String>>;

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &KhabarArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: fmt::Display>(message: &str, result: &T, args: &KhabarArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!("{}", "═".repeat(message.chars().count()));
    }
    println!("{result}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &KhabarArgs) -> Result<()> {
    println!("{}", to_json(result, args.pretty)?);
    Ok(())
}

/// Render `result` as JSON.
pub fn to_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_output_display() {
        let output = QueryOutput {
            mode: Some(QueryMode::DocsOfTerm),
            argument: Some(QueryArgument::term("خبر")),
            result: Some(QueryResult::Docs(vec![0, 3])),
            outcome: None,
        };
        assert_eq!(output.to_string(), "DOCS_OF_TERM خبر\n[0, 3]");

        let output = QueryOutput {
            mode: Some(QueryMode::Advanced),
            argument: Some(QueryArgument::None),
            result: None,
            outcome: Some("Not implemented: ADVANCED".to_string()),
        };
        assert_eq!(output.to_string(), "ADVANCED\nNot implemented: ADVANCED");
    }

    #[test]
    fn test_stats_json_is_flat() {
        let output = StatsOutput {
            index_file: PathBuf::from("index.json"),
            stats: IndexStats {
                documents: 2,
                terms: 5,
                positions: 9,
            },
        };
        let json = to_json(&output, false).unwrap();
        assert_eq!(
            json,
            r#"{"index_file":"index.json","documents":2,"terms":5,"positions":9}"#
        );
    }

    #[test]
    fn test_query_result_json() {
        let json = to_json(&QueryResult::Frequency(4), false).unwrap();
        assert_eq!(json, r#"{"kind":"frequency","value":4}"#);
    }
}
