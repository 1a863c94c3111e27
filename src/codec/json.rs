//! JSON codec.
//!
//! Documents are validated against `schema/dublincore_catalog.schema.json`
//! before decoding, so structural problems are reported with every violation
//! rather than the first serde error. Properties are a list, not an object,
//! to keep key order across namespaces.

use crate::catalog::{
    DublinCoreCatalog, DublinCoreValue, EName, Flavor, NamespaceBinding, Property,
};
use crate::codec::Format;
use crate::config::WriteOptions;
use crate::error::{CatalogError, ParseError, Result};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

const CATALOG_SCHEMA_JSON: &str = include_str!("../../schema/dublincore_catalog.schema.json");

static CATALOG_SCHEMA: LazyLock<Result<JSONSchema, String>> = LazyLock::new(|| {
    let raw: Value = serde_json::from_str(CATALOG_SCHEMA_JSON).map_err(|err| err.to_string())?;
    JSONSchema::compile(&raw).map_err(|err| err.to_string())
});

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flavor: Option<Flavor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root_tag: Option<EName>,
    #[serde(default)]
    namespaces: Vec<NamespaceEntry>,
    #[serde(default)]
    properties: Vec<PropertyEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NamespaceEntry {
    prefix: String,
    uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PropertyEntry {
    #[serde(default)]
    namespace: String,
    name: String,
    values: Vec<ValueEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    encoding_scheme: Option<EName>,
}

impl From<&DublinCoreCatalog> for CatalogDocument {
    fn from(catalog: &DublinCoreCatalog) -> Self {
        Self {
            flavor: catalog.flavor().cloned(),
            root_tag: catalog.root_tag().cloned(),
            namespaces: catalog
                .bindings()
                .iter()
                .map(|b| NamespaceEntry {
                    prefix: b.prefix().to_string(),
                    uri: b.uri().to_string(),
                })
                .collect(),
            properties: catalog.properties().map(PropertyEntry::from).collect(),
        }
    }
}

impl From<&Property> for PropertyEntry {
    fn from(property: &Property) -> Self {
        Self {
            namespace: property.name().namespace().to_string(),
            name: property.name().local_name().to_string(),
            values: property
                .values()
                .iter()
                .map(|v| ValueEntry {
                    value: v.value().to_string(),
                    lang: v.language().map(str::to_string),
                    encoding_scheme: v.encoding_scheme().cloned(),
                })
                .collect(),
        }
    }
}

impl CatalogDocument {
    fn into_catalog(self) -> DublinCoreCatalog {
        let mut catalog = DublinCoreCatalog::new();
        if let Some(flavor) = self.flavor {
            catalog.set_flavor(flavor);
        }
        if let Some(root_tag) = self.root_tag {
            catalog.set_root_tag(root_tag);
        }
        catalog.add_bindings(
            self.namespaces
                .into_iter()
                .map(|ns| NamespaceBinding::new(ns.prefix, ns.uri)),
        );
        for entry in self.properties {
            let name = EName::new(entry.namespace, entry.name);
            for v in entry.values {
                let mut value = DublinCoreValue::new(v.value);
                if let Some(lang) = v.lang {
                    value = value.with_language(lang);
                }
                if let Some(scheme) = v.encoding_scheme {
                    value = value.with_encoding_scheme(scheme);
                }
                catalog.add(&name, value);
            }
        }
        catalog
    }
}

pub fn write(catalog: &DublinCoreCatalog) -> Result<String> {
    write_with(catalog, &WriteOptions::default())
}

pub fn write_with(catalog: &DublinCoreCatalog, options: &WriteOptions) -> Result<String> {
    let document = CatalogDocument::from(catalog);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    rendered.map_err(|err| CatalogError::write(Format::Json, err))
}

pub fn read(text: &str) -> Result<DublinCoreCatalog> {
    parse(text).map_err(|source| CatalogError::read(Format::Json, source))
}

fn parse(text: &str) -> Result<DublinCoreCatalog, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    validate(&value)?;
    let document: CatalogDocument = serde_json::from_value(value)?;
    Ok(document.into_catalog())
}

fn validate(value: &Value) -> Result<(), ParseError> {
    let schema = CATALOG_SCHEMA
        .as_ref()
        .map_err(|err| ParseError::schema(format!("catalog schema failed to compile: {err}")))?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ParseError::schema(details));
    }
    Ok(())
}
