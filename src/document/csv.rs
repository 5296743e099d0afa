//! CSV document source.
//!
//! Each row of a CSV file with a header line is one document; its text is the
//! value of a designated column:
//!
//! ```csv
//! title,content
//! خبر اول,<p>متن خبر اول</p>
//! خبر دوم,<p>متن خبر دوم</p>
//! ```
//!
//! Inputs may be files or directories. A directory contributes its `.csv`
//! files sorted by file name, so document IDs do not depend on the order the
//! file system lists entries in.

use std::fs;
use std::path::{Path, PathBuf};

use ::csv::ReaderBuilder;
use log::{debug, info};

use crate::error::{KhabarError, Result};

/// Name of the text column used when none is configured.
pub const DEFAULT_TEXT_COLUMN: &str = "content";

/// Reads documents from CSV files.
#[derive(Debug, Clone)]
pub struct CsvDocumentSource {
    files: Vec<PathBuf>,
    text_column: String,
}

impl CsvDocumentSource {
    /// Create a source over the given files and directories.
    pub fn open<I, P>(inputs: I, text_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut files = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                files.extend(Self::list_dir(input)?);
            } else {
                files.push(input.to_path_buf());
            }
        }

        Ok(CsvDocumentSource {
            files,
            text_column: text_column.to_string(),
        })
    }

    /// CSV files of `dir`, sorted by file name.
    fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("Found {} CSV files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// The files in reading order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The column holding the document text.
    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    /// Read one file's documents in row order.
    pub fn read_file(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

        let headers = reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|header| header.trim() == self.text_column)
            .ok_or_else(|| {
                KhabarError::other(format!(
                    "{} has no column named {:?}",
                    path.display(),
                    self.text_column
                ))
            })?;

        let mut documents = Vec::new();
        for result in reader.records() {
            let record = result?;
            // A short row has no text; it still counts as a document.
            documents.push(record.get(column).unwrap_or_default().to_string());
        }

        debug!("Read {} documents from {}", documents.len(), path.display());
        Ok(documents)
    }

    /// Read every document of every file, in order.
    pub fn documents(&self) -> Result<Vec<String>> {
        let mut documents = Vec::new();
        for file in &self.files {
            documents.extend(self.read_file(file)?);
        }
        info!(
            "Read {} documents from {} files",
            documents.len(),
            self.files.len()
        );
        Ok(documents)
    }
}
