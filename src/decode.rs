//! Byte-level decoding of XML input.
//!
//! `document.xml` parts are normally UTF-8, but parts written by older or
//! non-standard producers may be UTF-16 or declare a legacy single-byte
//! encoding. UTF-16 is converted here; ASCII-compatible encodings are left to
//! the XML reader, which follows the encoding declaration.

use crate::error::{Error, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

#[derive(Clone, Copy)]
enum Utf16Order {
    Little,
    Big,
}

/// XML input after byte-order detection.
#[derive(Debug, PartialEq, Eq)]
pub enum XmlInput<'a> {
    /// UTF-16 input, already converted to a UTF-8 string
    Decoded(String),
    /// ASCII-compatible input, decoded by the XML reader according to the
    /// document's encoding declaration (UTF-8 when there is none)
    Raw(&'a [u8]),
}

/// Detect the byte encoding family of XML input.
///
/// Handles:
/// - UTF-8 with BOM (the BOM is stripped)
/// - UTF-16 LE/BE with BOM
/// - UTF-16 LE/BE without BOM, detected from the null bytes of ASCII markup
///
/// Anything else is returned untouched so that declarations such as
/// `encoding="ISO-8859-1"` are honoured by the reader.
pub fn prepare_xml_bytes(bytes: &[u8]) -> Result<XmlInput<'_>> {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return Ok(XmlInput::Raw(rest));
    }

    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        let content = decode_utf16(rest, Utf16Order::Little)?;
        return Ok(XmlInput::Decoded(fix_xml_encoding_declaration(&content)));
    }

    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        let content = decode_utf16(rest, Utf16Order::Big)?;
        return Ok(XmlInput::Decoded(fix_xml_encoding_declaration(&content)));
    }

    // XML never contains NUL, but ASCII markup in UTF-16 has one per code unit
    if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
        let content = decode_utf16(bytes, Utf16Order::Little)?;
        return Ok(XmlInput::Decoded(fix_xml_encoding_declaration(&content)));
    }
    if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
        let content = decode_utf16(bytes, Utf16Order::Big)?;
        return Ok(XmlInput::Decoded(fix_xml_encoding_declaration(&content)));
    }

    Ok(XmlInput::Raw(bytes))
}

fn decode_utf16(bytes: &[u8], order: Utf16Order) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Encoding(
            "UTF-16 input has an odd number of bytes".to_string(),
        ));
    }

    let units = bytes.chunks_exact(2).map(|pair| match order {
        Utf16Order::Little => u16::from_le_bytes([pair[0], pair[1]]),
        Utf16Order::Big => u16::from_be_bytes([pair[0], pair[1]]),
    });

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(format!("invalid UTF-16: {}", e)))
}

/// Rewrite a UTF-16 encoding declaration once the content is already UTF-8.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let Some(end_decl) = content.find("?>") else {
        return content.to_string();
    };

    let (decl, rest) = content.split_at(end_decl + 2);
    let fixed_decl = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
        .iter()
        .fold(decl.to_string(), |acc, quoted| {
            acc.replace(&format!("encoding={}", quoted), "encoding=\"UTF-8\"")
        });

    format!("{}{}", fixed_decl, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn utf16_be(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    fn decoded(bytes: &[u8]) -> String {
        match prepare_xml_bytes(bytes).unwrap() {
            XmlInput::Decoded(s) => s,
            XmlInput::Raw(raw) => panic!("expected UTF-16 input, got {:?}", raw),
        }
    }

    #[test]
    fn test_utf8_passed_through() {
        assert_eq!(prepare_xml_bytes(b"\xEF\xBB\xBF<a/>").unwrap(), XmlInput::Raw(b"<a/>"));
        assert_eq!(prepare_xml_bytes(b"<a/>").unwrap(), XmlInput::Raw(b"<a/>"));
    }

    #[test]
    fn test_latin1_passed_through() {
        let xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a>caf\xE9</a>";
        assert_eq!(prepare_xml_bytes(xml).unwrap(), XmlInput::Raw(&xml[..]));
    }

    #[test]
    fn test_utf16_with_bom() {
        assert_eq!(decoded(b"\xFF\xFE<\0a\0/\0>\0"), "<a/>");
        assert_eq!(decoded(b"\xFE\xFF\0<\0a\0/\0>"), "<a/>");
    }

    #[test]
    fn test_utf16_without_bom() {
        assert_eq!(decoded(&utf16_le("<a>b</a>")), "<a>b</a>");
        assert_eq!(decoded(&utf16_le("<a>é</a>")), "<a>é</a>");
        assert_eq!(decoded(&utf16_be("<a>é</a>")), "<a>é</a>");
    }

    #[test]
    fn test_utf16_declaration_rewritten() {
        let xml = r#"<?xml version="1.0" encoding="UTF-16"?><a/>"#;
        let mut bytes = UTF16_LE_BOM.to_vec();
        bytes.extend(utf16_le(xml));

        assert_eq!(decoded(&bytes), r#"<?xml version="1.0" encoding="UTF-8"?><a/>"#);
    }

    #[test]
    fn test_odd_length_utf16_rejected() {
        let err = prepare_xml_bytes(b"\xFF\xFE<\0a").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
