//! Namespace-qualified names.
//!
//! An `EName` pairs a namespace URI with a local name. The textual form is
//! Clark notation (`{uri}local`), or just `local` when the name has no
//! namespace. Names built from `'static` strings are `const`, which is how the
//! vocabulary table declares its well-known properties.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Qualified name of a catalog property, root tag, or encoding scheme.
pub struct EName {
    namespace: Cow<'static, str>,
    local_name: Cow<'static, str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid qualified name '{0}', expected '{{namespace}}local' or 'local'")]
pub struct ENameParseError(pub String);

impl EName {
    pub const fn from_static(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            local_name: Cow::Borrowed(local_name),
        }
    }

    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            local_name: Cow::Owned(local_name.into()),
        }
    }

    /// A name outside of any namespace.
    pub fn unqualified(local_name: impl Into<String>) -> Self {
        Self::new(String::new(), local_name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }
}

impl fmt::Display for EName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_namespace() {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        } else {
            f.write_str(&self.local_name)
        }
    }
}

impl FromStr for EName {
    type Err = ENameParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ENameParseError(raw.to_string());
        match raw.strip_prefix('{') {
            Some(rest) => {
                let (namespace, local_name) = rest.split_once('}').ok_or_else(invalid)?;
                if local_name.is_empty() {
                    return Err(invalid());
                }
                Ok(EName::new(namespace, local_name))
            }
            None => {
                if raw.is_empty() || raw.contains('}') {
                    return Err(invalid());
                }
                Ok(EName::unqualified(raw))
            }
        }
    }
}

impl TryFrom<String> for EName {
    type Error = ENameParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EName> for String {
    fn from(name: EName) -> Self {
        name.to_string()
    }
}

/// True when `candidate` can be used as an XML local name or prefix.
pub(crate) fn is_ncname(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clark_notation_round_trips() {
        let name = EName::new("http://purl.org/dc/terms/", "title");
        assert_eq!(name.to_string(), "{http://purl.org/dc/terms/}title");
        assert_eq!(name.to_string().parse::<EName>().unwrap(), name);
    }

    #[test]
    fn static_and_owned_names_compare_equal() {
        const TITLE: EName = EName::from_static("http://purl.org/dc/terms/", "title");
        assert_eq!(TITLE, EName::new("http://purl.org/dc/terms/", "title"));
    }

    #[test]
    fn unqualified_names_have_no_braces() {
        let name: EName = "title".parse().unwrap();
        assert!(!name.has_namespace());
        assert_eq!(name.to_string(), "title");
    }

    #[test]
    fn rejects_malformed_names() {
        for raw in ["", "{http://x/", "{http://x/}", "ti}tle"] {
            assert!(raw.parse::<EName>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn ncname_rules() {
        assert!(is_ncname("dcterms"));
        assert!(is_ncname("_x-1.2"));
        assert!(!is_ncname(""));
        assert!(!is_ncname("1abc"));
        assert!(!is_ncname("dc:title"));
        assert!(!is_ncname("has space"));
    }
}
