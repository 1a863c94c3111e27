use crate::codec::Format;
use quick_xml::events::attributes::AttrError;
use std::{fmt, io};
use thiserror::Error;

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input could not be read or is not UTF-8.
    #[error("unable to read DublinCore catalog from stream")]
    Io(#[from] io::Error),
    #[error("unable to read DublinCore catalog, {} parsing failed", .format.label())]
    Read {
        format: Format,
        #[source]
        source: ParseError,
    },
    #[error("unable to write DublinCore catalog as {}", .format.label())]
    Write {
        format: Format,
        #[source]
        source: WriteError,
    },
}

impl CatalogError {
    pub(crate) fn read(format: Format, source: impl Into<ParseError>) -> Self {
        CatalogError::Read {
            format,
            source: source.into(),
        }
    }

    pub(crate) fn write(format: Format, source: impl Into<WriteError>) -> Self {
        CatalogError::Write {
            format,
            source: source.into(),
        }
    }

    /// Codec involved in the failure, if any.
    pub fn format(&self) -> Option<Format> {
        match self {
            CatalogError::Io(_) => None,
            CatalogError::Read { format, .. } | CatalogError::Write { format, .. } => Some(*format),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XML attribute")]
    Attribute(#[from] AttrError),
    #[error("schema violation: {0}")]
    Schema(String),
}

impl ParseError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        ParseError::Schema(message.into())
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
    #[error("formatting failed")]
    Fmt(#[from] fmt::Error),
    #[error("'{0}' is not a valid XML name")]
    InvalidName(String),
    #[error("{0}")]
    Unrepresentable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown catalog format '{0}', expected xml or json")]
pub struct UnknownFormat(pub String);
