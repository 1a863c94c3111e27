//! Output settings and their environment defaults.
//!
//! The library itself never reads the environment; `WriteOptions::default()`
//! is fixed. The `dccat` binary layers `DCCAT_*` variables under its flags.

use crate::codec::Format;
use crate::error::UnknownFormat;
use std::env;

/// Default output format when `--to` is absent.
pub const ENV_OUTPUT_FORMAT: &str = "DCCAT_FORMAT";
/// Set to `0`, `false`, `no` or `off` to emit compact output by default.
pub const ENV_PRETTY: &str = "DCCAT_PRETTY";
/// `tracing` filter directives for the binary.
pub const ENV_LOG: &str = "DCCAT_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent XML elements and pretty-print JSON.
    pub pretty: bool,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`. Ignored for JSON.
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            xml_declaration: true,
        }
    }
}

impl WriteOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Defaults with `DCCAT_PRETTY` applied.
    pub fn from_env() -> Self {
        Self {
            pretty: pretty_from(env::var(ENV_PRETTY).ok().as_deref()),
            ..Self::default()
        }
    }
}

/// Output format from `DCCAT_FORMAT`, XML when unset.
pub fn default_output_format() -> Result<Format, UnknownFormat> {
    output_format_from(env::var(ENV_OUTPUT_FORMAT).ok().as_deref())
}

fn output_format_from(raw: Option<&str>) -> Result<Format, UnknownFormat> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse(),
        None => Ok(Format::Xml),
    }
}

fn pretty_from(raw: Option<&str>) -> bool {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        Some(value) => !matches!(value.as_str(), "0" | "false" | "no" | "off"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_defaults_to_xml() {
        assert_eq!(output_format_from(None), Ok(Format::Xml));
        assert_eq!(output_format_from(Some("  ")), Ok(Format::Xml));
        assert_eq!(output_format_from(Some("json")), Ok(Format::Json));
        assert!(output_format_from(Some("toml")).is_err());
    }

    #[test]
    fn pretty_flag_values() {
        assert!(pretty_from(None));
        assert!(pretty_from(Some("1")));
        assert!(!pretty_from(Some("0")));
        assert!(!pretty_from(Some("False")));
        assert!(!pretty_from(Some("off")));
    }
}
