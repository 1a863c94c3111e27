use crate::catalog::EName;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// One value of a catalog property.
///
/// `language` maps to `xml:lang`; `None` means the language is undefined. An
/// empty language tag is treated as undefined. `encoding_scheme` names the
/// syntax of the value, e.g. `dcterms:W3CDTF` for dates.
pub struct DublinCoreValue {
    value: String,
    language: Option<String>,
    encoding_scheme: Option<EName>,
}

impl DublinCoreValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            encoding_scheme: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = (!language.is_empty()).then_some(language);
        self
    }

    pub fn with_encoding_scheme(mut self, scheme: EName) -> Self {
        self.encoding_scheme = Some(scheme);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn encoding_scheme(&self) -> Option<&EName> {
        self.encoding_scheme.as_ref()
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl From<&str> for DublinCoreValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DublinCoreValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DublinCoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
