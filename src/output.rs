//! Writing extracted text and reporting the result.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::Extraction;

/// Summary of a completed extraction written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// File the text was written to
    pub output: PathBuf,
    /// Number of non-empty fragments collected
    pub fragments: usize,
    /// Characters written
    pub characters: usize,
    /// UTF-8 bytes written
    pub bytes: usize,
}

impl ExtractionReport {
    /// Build a report for text that has been written to `output`.
    pub fn new(output: impl Into<PathBuf>, extraction: &Extraction, text: &str) -> Self {
        Self {
            output: output.into(),
            fragments: extraction.fragment_count(),
            characters: text.chars().count(),
            bytes: text.len(),
        }
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successfully extracted text to {}", self.output.display())
    }
}

/// Render the one-line status for an extraction result.
///
/// # Example
///
/// ```
/// let result = wtext::extract_to_file("missing.xml", "out.txt");
/// assert!(wtext::status_line(&result).starts_with("Error: "));
/// ```
pub fn status_line(result: &Result<ExtractionReport>) -> String {
    match result {
        Ok(report) => report.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

/// Write text to `path` as UTF-8, creating or truncating the file.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
