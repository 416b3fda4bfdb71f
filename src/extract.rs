//! Namespace-aware text run extraction.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::decode::{prepare_xml_bytes, XmlInput};
use crate::error::{Error, Result};
use crate::options::ExtractOptions;

/// Text fragments collected from a document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    fragments: Vec<String>,
    separator: String,
}

impl Extraction {
    /// The collected fragments. Empty fragments are never included.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Number of fragments collected.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Check if no text was found.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of characters in the concatenated text.
    pub fn char_count(&self) -> usize {
        self.text().chars().count()
    }

    /// Concatenate all fragments, joined by the configured separator.
    pub fn text(&self) -> String {
        self.fragments.join(&self.separator)
    }

    fn push(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }
}

/// Extracts the text content of matching elements from an XML document.
///
/// # Example
///
/// ```
/// use wtext::TextExtractor;
///
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body><w:p><w:r><w:t>Hello, </w:t></w:r><w:r><w:t>world!</w:t></w:r></w:p></w:body>
/// </w:document>"#;
///
/// let extraction = TextExtractor::default().extract_str(xml)?;
/// assert_eq!(extraction.text(), "Hello, world!");
/// # Ok::<(), wtext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    options: ExtractOptions,
}

impl TextExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Read and extract an XML file.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "read input");
        self.extract_bytes(&data)
    }

    /// Extract raw XML bytes.
    ///
    /// UTF-16 input is converted first; any other input is decoded by the
    /// reader following its encoding declaration.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Extraction> {
        match prepare_xml_bytes(data)? {
            XmlInput::Decoded(xml) => self.extract_str(&xml),
            XmlInput::Raw(bytes) => self.extract_reader(NsReader::from_reader(bytes)),
        }
    }

    /// Extract from an XML string.
    pub fn extract_str(&self, xml: &str) -> Result<Extraction> {
        self.extract_reader(NsReader::from_str(xml))
    }

    /// Every element below the document element that matches the configured
    /// target contributes the character data between its start tag and its
    /// first child element. Fragments are ordered by start tag (depth-first,
    /// pre-order). The document element itself is never matched.
    fn extract_reader(&self, mut reader: NsReader<&[u8]>) -> Result<Extraction> {
        self.options.validate()?;

        {
            let config = reader.config_mut();
            config.trim_text(false);
            config.check_end_names = true;
            config.check_comments = true;
        }

        let target = &self.options.target;
        let mut extraction = Extraction {
            fragments: Vec::new(),
            separator: self.options.separator.clone(),
        };

        // Leading text of the innermost matched element, until its first child
        let mut capture: Option<String> = None;
        let mut depth: usize = 0;
        let mut root_seen = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| parse_error(&reader, e))?;
            let decoder = reader.decoder();

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_root = depth == 0;
                    if is_root {
                        if root_seen {
                            return Err(ill_formed(&reader, "junk after document element"));
                        }
                        root_seen = true;
                    }
                    if let Some(text) = capture.take() {
                        extraction.push(text);
                    }

                    let (resolved, local) = reader.resolve_element(e.name());
                    let namespace = match resolved {
                        ResolveResult::Bound(Namespace(uri)) => Some(
                            decoder
                                .decode(uri)
                                .map_err(|err| ill_formed(&reader, &err.to_string()))?,
                        ),
                        ResolveResult::Unbound => None,
                        ResolveResult::Unknown(prefix) => {
                            return Err(ill_formed(
                                &reader,
                                &format!("unbound prefix '{}'", String::from_utf8_lossy(&prefix)),
                            ));
                        }
                    };
                    let local = decoder
                        .decode(local.as_ref())
                        .map_err(|err| ill_formed(&reader, &err.to_string()))?;
                    let is_target = !is_root
                        && target.matches(namespace.as_deref().map(str::as_bytes), local.as_bytes());

                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                        if is_target {
                            capture = Some(String::new());
                        }
                    }
                }
                Event::End(_) => {
                    if let Some(text) = capture.take() {
                        extraction.push(text);
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ill_formed(&reader, &err.to_string()))?;
                    if depth == 0 {
                        if !text.chars().all(char::is_whitespace) {
                            return Err(ill_formed(&reader, "text outside the document element"));
                        }
                    } else if let Some(buffer) = capture.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                Event::CData(ref e) => {
                    if depth == 0 {
                        return Err(ill_formed(&reader, "CDATA outside the document element"));
                    }
                    let text = decoder
                        .decode(e)
                        .map_err(|err| ill_formed(&reader, &err.to_string()))?;
                    if let Some(buffer) = capture.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                Event::Eof => {
                    if depth > 0 {
                        return Err(ill_formed(&reader, "unclosed element at end of input"));
                    }
                    if !root_seen {
                        return Err(ill_formed(&reader, "no element found"));
                    }
                    break;
                }
                // Comments, processing instructions and declarations carry no text
                _ => {}
            }
        }

        tracing::debug!(
            target_element = %target,
            fragments = extraction.fragment_count(),
            "extracted text runs"
        );

        Ok(extraction)
    }
}

fn parse_error<R>(reader: &NsReader<R>, err: quick_xml::Error) -> Error {
    Error::XmlParse(format!("{} (at byte {})", err, reader.error_position()))
}

fn ill_formed<R>(reader: &NsReader<R>, message: &str) -> Error {
    Error::XmlParse(format!("{} (at byte {})", message, reader.buffer_position()))
}
