//! Command line argument parsing for the khabar CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizationMode;

/// Khabar - positional inverted index and term queries for Persian news text
#[derive(Parser, Debug, Clone)]
#[command(name = "khabar")]
#[command(about = "Positional inverted index and term queries for Persian news text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KhabarArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "KHABAR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Normalization mode, overriding the configuration file
    #[arg(long, value_enum, global = true)]
    pub mode: Option<NormalizationMode>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KhabarArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from CSV documents
    Index(IndexArgs),

    /// Run one query against a saved index
    Query(QueryArgs),

    /// Show how a text is normalized and tokenized
    Normalize(NormalizeArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// CSV files or directories of CSV files
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory to write the index, report and probe audit to
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// CSV column holding the document text, overriding the configuration file
    #[arg(long)]
    pub text_column: Option<String>,
}

/// Arguments for querying
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Saved index file (JSON)
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Query mode code (0-6)
    #[arg(value_name = "MODE", allow_negative_numbers = true)]
    pub query_mode: i64,

    /// Term (modes 0-3) or count (modes 4-5)
    #[arg(value_name = "ARGUMENT")]
    pub argument: Option<String>,

    /// Run the term through the analyzer before looking it up
    #[arg(long)]
    pub analyze: bool,
}

/// Arguments for normalizing a text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Raw text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Saved index file (JSON)
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
