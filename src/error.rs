//! Error types for the wtext library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error not tied to a specific input or output path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The input bytes could not be decoded to text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The extraction report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An extraction option is invalid.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
