//! Wire formats and the format-detecting reader.
//!
//! Both codecs are stateless: `write` renders a snapshot of a catalog and
//! `read` rebuilds the full catalog state from text. [`read`] sniffs the
//! first significant character of the input to choose between them; writing
//! always goes through an explicitly chosen codec.

pub mod json;
pub mod xml;

use crate::catalog::DublinCoreCatalog;
use crate::config::WriteOptions;
use crate::error::{Result, UnknownFormat};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }

    /// Upper-case name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Xml => "XML",
            Format::Json => "JSON",
        }
    }

    /// JSON when the first significant character is `{`, XML otherwise.
    pub fn detect(text: &str) -> Format {
        let significant = text.trim_start_matches(|c: char| c == BYTE_ORDER_MARK || c.is_whitespace());
        if significant.starts_with('{') {
            Format::Json
        } else {
            Format::Xml
        }
    }

    pub fn read(&self, text: &str) -> Result<DublinCoreCatalog> {
        match self {
            Format::Xml => xml::read(text),
            Format::Json => json::read(text),
        }
    }

    pub fn write(&self, catalog: &DublinCoreCatalog, options: &WriteOptions) -> Result<String> {
        match self {
            Format::Xml => xml::write_with(catalog, options),
            Format::Json => json::write_with(catalog, options),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            _ => Err(UnknownFormat(raw.to_string())),
        }
    }
}

/// Read a catalog serialized as either JSON or XML.
///
/// The whole stream is buffered and decoded as UTF-8 before the format is
/// detected. Callers that already know the format can use [`json::read`] or
/// [`xml::read`] directly. Flavor and root tag are only restored when the
/// document carries them.
pub fn read(mut input: impl Read) -> Result<DublinCoreCatalog> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    read_str(&text)
}

/// Like [`read`], for text that is already in memory.
pub fn read_str(text: &str) -> Result<DublinCoreCatalog> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let format = Format::detect(text);
    debug!(%format, bytes = text.len(), "detected catalog format");
    format.read(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn detects_json_after_whitespace_and_bom() {
        assert_eq!(Format::detect("{}"), Format::Json);
        assert_eq!(Format::detect("\u{feff}\n  {\"properties\": []}"), Format::Json);
        assert_eq!(Format::detect("<dublincore/>"), Format::Xml);
        assert_eq!(Format::detect(""), Format::Xml);
        assert_eq!(Format::detect("garbage {"), Format::Xml);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<Format>(), Ok(Format::Json));
        assert_eq!(" xml ".parse::<Format>(), Ok(Format::Xml));
        assert!("yaml".parse::<Format>().is_err());
        assert_eq!(Format::Json.to_string(), "json");
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = &[b'{', 0xff, 0xfe, b'}'];
        let err = read(bytes).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)), "got {err:?}");
        assert_eq!(err.format(), None);
    }

    #[test]
    fn read_failures_name_the_codec() {
        let json = read_str("{ not json").unwrap_err();
        assert_eq!(json.format(), Some(Format::Json));
        assert!(json.to_string().contains("JSON parsing failed"));

        let xml = read_str("not xml at all").unwrap_err();
        assert_eq!(xml.format(), Some(Format::Xml));
        assert!(xml.to_string().contains("XML parsing failed"));
    }
}
