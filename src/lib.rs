//! # wtext
//!
//! Plain-text extraction from WordprocessingML `document.xml` parts.
//!
//! The library walks an already-unpacked `word/document.xml` in document
//! order, collects the text of every `w:t` run element, and concatenates the
//! fragments with no separator.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Extract into memory
//! let text = wtext::extract_text("word/document.xml")?;
//! println!("{}", text);
//!
//! // Extract and write to a file
//! let report = wtext::extract_to_file("word/document.xml", "document.txt")?;
//! println!("{}", report);
//! # Ok::<(), wtext::Error>(())
//! ```
//!
//! ## Custom Extraction
//!
//! ```no_run
//! use wtext::{ExtractOptions, QualifiedName, TextExtractor};
//!
//! let options = ExtractOptions::new()
//!     .with_target("w:delText".parse::<QualifiedName>()?)
//!     .with_separator("\n");
//!
//! let deleted = TextExtractor::new(options).extract_file("word/document.xml")?;
//! println!("{} deleted runs", deleted.fragment_count());
//! # Ok::<(), wtext::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: Async file I/O with Tokio
//! - `ffi`: C-ABI bindings for foreign language integration

pub mod decode;
pub mod error;
pub mod extract;
pub mod options;
pub mod output;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use decode::{prepare_xml_bytes, XmlInput};
pub use error::{Error, Result};
pub use extract::{Extraction, TextExtractor};
pub use options::{ExtractOptions, QualifiedName, WORDPROCESSING_NS};
pub use output::{status_line, ExtractionReport};

use std::path::Path;

/// Extract the text of all `w:t` elements from an XML file.
///
/// # Example
///
/// ```no_run
/// let text = wtext::extract_text("word/document.xml")?;
/// # Ok::<(), wtext::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let extraction = TextExtractor::default().extract_file(path)?;
    Ok(extraction.text())
}

/// Extract the text of all `w:t` elements and write it to `output`.
///
/// The output file is only touched once the whole input has been parsed,
/// so a malformed input never truncates an existing output file.
///
/// # Example
///
/// ```no_run
/// let report = wtext::extract_to_file("word/document.xml", "document.txt")?;
/// assert_eq!(report.to_string(), "Successfully extracted text to document.txt");
/// # Ok::<(), wtext::Error>(())
/// ```
pub fn extract_to_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ExtractionReport> {
    extract_to_file_with_options(input, output, &ExtractOptions::default())
}

/// Extract text with custom options and write it to `output`.
pub fn extract_to_file_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let output = output.as_ref();
    let extraction = TextExtractor::new(options.clone()).extract_file(input)?;
    let text = extraction.text();

    output::write_text(output, &text)?;
    tracing::debug!(
        output = %output.display(),
        fragments = extraction.fragment_count(),
        bytes = text.len(),
        "wrote extracted text"
    );

    Ok(ExtractionReport::new(output, &extraction, &text))
}

/// Async variant of [`extract_to_file_with_options`].
///
/// File reads and writes go through `tokio::fs`; parsing runs inline.
#[cfg(feature = "async")]
pub async fn extract_to_file_async(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    let data = tokio::fs::read(input)
        .await
        .map_err(|source| Error::ReadInput {
            path: input.to_path_buf(),
            source,
        })?;
    let extraction = TextExtractor::new(options.clone()).extract_bytes(&data)?;
    let text = extraction.text();

    tokio::fs::write(output, &text)
        .await
        .map_err(|source| Error::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;

    Ok(ExtractionReport::new(output, &extraction, &text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HELLO_WORLD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Hello, </w:t></w:r></w:p>
    <w:p><w:sdt><w:sdtContent><w:r><w:t>world!</w:t></w:r></w:sdtContent></w:sdt></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_extract_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("document.xml");
        fs::write(&input, HELLO_WORLD).unwrap();

        assert_eq!(extract_text(&input).unwrap(), "Hello, world!");
    }

    #[test]
    fn test_extract_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("document.xml");
        let output = dir.path().join("document.txt");
        fs::write(&input, HELLO_WORLD).unwrap();

        let report = extract_to_file(&input, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "Hello, world!");
        assert_eq!(report.output, output);
        assert_eq!(report.fragments, 2);
    }

    #[test]
    fn test_failed_parse_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("document.xml");
        let output = dir.path().join("document.txt");
        fs::write(&input, "<w:document><unclosed>").unwrap();
        fs::write(&output, "previous").unwrap();

        assert!(extract_to_file(&input, &output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_extract_to_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("document.xml");
        let output = dir.path().join("document.txt");
        fs::write(&input, HELLO_WORLD).unwrap();

        let report = extract_to_file_async(&input, &output, &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(report.characters, 13);
        assert_eq!(fs::read_to_string(&output).unwrap(), "Hello, world!");
    }
}
