use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Two-part type tag (`type/subtype`) classifying what a catalog describes.
pub struct Flavor {
    flavor_type: Cow<'static, str>,
    subtype: Cow<'static, str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid flavor '{0}', expected 'type/subtype'")]
pub struct FlavorParseError(pub String);

impl Flavor {
    pub const fn from_static(flavor_type: &'static str, subtype: &'static str) -> Self {
        Self {
            flavor_type: Cow::Borrowed(flavor_type),
            subtype: Cow::Borrowed(subtype),
        }
    }

    pub fn new(flavor_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            flavor_type: Cow::Owned(flavor_type.into()),
            subtype: Cow::Owned(subtype.into()),
        }
    }

    pub fn flavor_type(&self) -> &str {
        &self.flavor_type
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.flavor_type, self.subtype)
    }
}

impl FromStr for Flavor {
    type Err = FlavorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || FlavorParseError(raw.to_string());
        let (flavor_type, subtype) = raw.split_once('/').ok_or_else(invalid)?;
        if flavor_type.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return Err(invalid());
        }
        Ok(Flavor::new(flavor_type, subtype))
    }
}

impl TryFrom<String> for Flavor {
    type Error = FlavorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Flavor> for String {
    fn from(flavor: Flavor) -> Self {
        flavor.to_string()
    }
}
