//! Controlled vocabulary: namespace URIs, well-known property names, encoding
//! schemes and flavors.
//!
//! Everything here is immutable. Names are `const` so callers can match on them;
//! the lookup table behind [`vocabulary`] is built once on first use.

use crate::catalog::{EName, Flavor};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// DublinCore Metadata Element Set, version 1.1.
pub const ELEMENTS_1_1_NS_URI: &str = "http://purl.org/dc/elements/1.1/";
pub const ELEMENTS_1_1_NS_PREFIX: &str = "dc";

/// DCMI metadata terms.
pub const TERMS_NS_URI: &str = "http://purl.org/dc/terms/";
pub const TERMS_NS_PREFIX: &str = "dcterms";

/// Default namespace of catalogs generated by Opencast.
pub const OC_DC_CATALOG_NS_URI: &str = "http://www.opencastproject.org/xsd/1.0/dublincore/";

/// Opencast specific properties.
pub const OC_PROPERTY_NS_URI: &str = "http://www.opencastproject.org/matterhorn/";
pub const OC_PROPERTY_NS_PREFIX: &str = "oc";

pub const XSI_NS_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSI_NS_PREFIX: &str = "xsi";

pub const OC_DC_CATALOG_ROOT_ELEMENT: EName = EName::from_static(OC_DC_CATALOG_NS_URI, "dublincore");

pub const EPISODE_FLAVOR: Flavor = Flavor::from_static("dublincore", "episode");
pub const SERIES_FLAVOR: Flavor = Flavor::from_static("dublincore", "series");

pub const PROPERTY_AVAILABLE: EName = EName::from_static(TERMS_NS_URI, "available");
pub const PROPERTY_CONTRIBUTOR: EName = EName::from_static(TERMS_NS_URI, "contributor");
pub const PROPERTY_CREATED: EName = EName::from_static(TERMS_NS_URI, "created");
pub const PROPERTY_CREATOR: EName = EName::from_static(TERMS_NS_URI, "creator");
pub const PROPERTY_DESCRIPTION: EName = EName::from_static(TERMS_NS_URI, "description");
pub const PROPERTY_EXTENT: EName = EName::from_static(TERMS_NS_URI, "extent");
pub const PROPERTY_IDENTIFIER: EName = EName::from_static(TERMS_NS_URI, "identifier");
pub const PROPERTY_IS_PART_OF: EName = EName::from_static(TERMS_NS_URI, "isPartOf");
pub const PROPERTY_LANGUAGE: EName = EName::from_static(TERMS_NS_URI, "language");
pub const PROPERTY_LICENSE: EName = EName::from_static(TERMS_NS_URI, "license");
pub const PROPERTY_PUBLISHER: EName = EName::from_static(TERMS_NS_URI, "publisher");
pub const PROPERTY_RIGHTS_HOLDER: EName = EName::from_static(TERMS_NS_URI, "rightsHolder");
pub const PROPERTY_SOURCE: EName = EName::from_static(TERMS_NS_URI, "source");
pub const PROPERTY_SPATIAL: EName = EName::from_static(TERMS_NS_URI, "spatial");
pub const PROPERTY_SUBJECT: EName = EName::from_static(TERMS_NS_URI, "subject");
pub const PROPERTY_TEMPORAL: EName = EName::from_static(TERMS_NS_URI, "temporal");
pub const PROPERTY_TITLE: EName = EName::from_static(TERMS_NS_URI, "title");
pub const PROPERTY_TYPE: EName = EName::from_static(TERMS_NS_URI, "type");

/// Timezone of the capture agent an event is scheduled on, e.g. `America/Chicago`.
pub const OC_PROPERTY_AGENT_TIMEZONE: EName = EName::from_static(OC_PROPERTY_NS_URI, "agentTimezone");
/// RFC 2445 recurrence rule.
pub const OC_PROPERTY_RECURRENCE: EName = EName::from_static(OC_PROPERTY_NS_URI, "recurrence");
pub const OC_PROPERTY_ANNOTATION: EName = EName::from_static(OC_PROPERTY_NS_URI, "annotation");
pub const OC_PROPERTY_ADVERTISED: EName = EName::from_static(OC_PROPERTY_NS_URI, "advertised");
pub const OC_PROPERTY_PROMOTED: EName = EName::from_static(OC_PROPERTY_NS_URI, "promoted");
pub const OC_PROPERTY_DURATION: EName = EName::from_static(OC_PROPERTY_NS_URI, "duration");

pub const ENC_SCHEME_W3CDTF: EName = EName::from_static(TERMS_NS_URI, "W3CDTF");
pub const ENC_SCHEME_PERIOD: EName = EName::from_static(TERMS_NS_URI, "Period");
pub const ENC_SCHEME_ISO8601: EName = EName::from_static(TERMS_NS_URI, "ISO8601");
pub const ENC_SCHEME_RFC4646: EName = EName::from_static(TERMS_NS_URI, "RFC4646");
pub const ENC_SCHEME_URI: EName = EName::from_static(TERMS_NS_URI, "URI");

/// Every term of the DCMI terms namespace.
const TERMS: &[&str] = &[
    "abstract",
    "accessRights",
    "accrualMethod",
    "accrualPeriodicity",
    "accrualPolicy",
    "alternative",
    "audience",
    "available",
    "bibliographicCitation",
    "conformsTo",
    "contributor",
    "coverage",
    "created",
    "creator",
    "date",
    "dateAccepted",
    "dateCopyrighted",
    "dateSubmitted",
    "description",
    "educationLevel",
    "extent",
    "format",
    "hasFormat",
    "hasPart",
    "hasVersion",
    "identifier",
    "instructionalMethod",
    "isFormatOf",
    "isPartOf",
    "isReferencedBy",
    "isReplacedBy",
    "isRequiredBy",
    "issued",
    "isVersionOf",
    "language",
    "license",
    "mediator",
    "medium",
    "modified",
    "provenance",
    "publisher",
    "references",
    "relation",
    "replaces",
    "requires",
    "rights",
    "rightsHolder",
    "source",
    "spatial",
    "subject",
    "tableOfContents",
    "temporal",
    "title",
    "type",
    "valid",
];

/// The fifteen elements of the 1.1 element set.
const ELEMENTS_1_1: &[&str] = &[
    "contributor",
    "coverage",
    "creator",
    "date",
    "description",
    "format",
    "identifier",
    "language",
    "publisher",
    "relation",
    "rights",
    "source",
    "subject",
    "title",
    "type",
];

const OC_PROPERTIES: &[&str] = &[
    "agentTimezone",
    "recurrence",
    "annotation",
    "advertised",
    "promoted",
    "duration",
];

/// (prefix, uri) of the namespaces every catalog may use without registering.
const WELL_KNOWN_NAMESPACES: &[(&str, &str)] = &[
    (ELEMENTS_1_1_NS_PREFIX, ELEMENTS_1_1_NS_URI),
    (TERMS_NS_PREFIX, TERMS_NS_URI),
    (OC_PROPERTY_NS_PREFIX, OC_PROPERTY_NS_URI),
    (XSI_NS_PREFIX, XSI_NS_URI),
];

/// Lookup table over the well-known namespaces and their terms.
#[derive(Debug)]
pub struct Vocabulary {
    prefix_by_uri: BTreeMap<&'static str, &'static str>,
    uri_by_prefix: BTreeMap<&'static str, &'static str>,
    terms: BTreeMap<&'static str, Vec<&'static str>>,
}

static VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

/// The process-wide vocabulary table.
pub fn vocabulary() -> &'static Vocabulary {
    &VOCABULARY
}

impl Vocabulary {
    fn build() -> Self {
        let mut prefix_by_uri = BTreeMap::new();
        let mut uri_by_prefix = BTreeMap::new();
        for &(prefix, uri) in WELL_KNOWN_NAMESPACES {
            prefix_by_uri.insert(uri, prefix);
            uri_by_prefix.insert(prefix, uri);
        }
        let mut terms = BTreeMap::new();
        terms.insert(TERMS_NS_URI, TERMS.to_vec());
        terms.insert(ELEMENTS_1_1_NS_URI, ELEMENTS_1_1.to_vec());
        terms.insert(OC_PROPERTY_NS_URI, OC_PROPERTIES.to_vec());
        Self {
            prefix_by_uri,
            uri_by_prefix,
            terms,
        }
    }

    /// Conventional prefix for a well-known namespace.
    pub fn well_known_prefix(&self, uri: &str) -> Option<&'static str> {
        self.prefix_by_uri.get(uri).copied()
    }

    pub fn well_known_uri(&self, prefix: &str) -> Option<&'static str> {
        self.uri_by_prefix.get(prefix).copied()
    }

    /// True when `name` is a term of one of the well-known vocabularies.
    pub fn is_known_term(&self, name: &EName) -> bool {
        self.terms
            .get(name.namespace())
            .is_some_and(|terms| terms.iter().any(|t| *t == name.local_name()))
    }

    /// Terms of `uri`'s vocabulary as qualified names.
    pub fn terms(&self, uri: &str) -> Vec<EName> {
        self.terms
            .get_key_value(uri)
            .map(|(&ns, terms)| terms.iter().map(|&t| EName::from_static(ns, t)).collect())
            .unwrap_or_default()
    }

    /// Resolve `prefix:local` (using the well-known prefixes) or Clark notation.
    pub fn resolve(&self, name: &str) -> Option<EName> {
        if name.starts_with('{') {
            return name.parse().ok();
        }
        let (prefix, local) = name.split_once(':')?;
        if local.is_empty() {
            return None;
        }
        let uri = self.well_known_uri(prefix)?;
        Some(EName::new(uri, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_prefixed_names() {
        let vocab = vocabulary();
        assert_eq!(vocab.resolve("dcterms:title"), Some(PROPERTY_TITLE));
        assert_eq!(vocab.resolve("oc:promoted"), Some(OC_PROPERTY_PROMOTED));
        assert_eq!(vocab.resolve("{urn:x}y"), Some(EName::new("urn:x", "y")));
        assert_eq!(vocab.resolve("nope:title"), None);
        assert_eq!(vocab.resolve("title"), None);
    }

    #[test]
    fn known_terms() {
        let vocab = vocabulary();
        assert!(vocab.is_known_term(&PROPERTY_RIGHTS_HOLDER));
        assert!(vocab.is_known_term(&OC_PROPERTY_AGENT_TIMEZONE));
        assert!(!vocab.is_known_term(&EName::new(TERMS_NS_URI, "nonsense")));
        assert_eq!(vocab.terms(ELEMENTS_1_1_NS_URI).len(), 15);
        assert!(vocab.terms("urn:unknown").is_empty());
    }

    #[test]
    fn well_known_prefixes() {
        let vocab = vocabulary();
        assert_eq!(vocab.well_known_prefix(XSI_NS_URI), Some("xsi"));
        assert_eq!(vocab.well_known_uri("dcterms"), Some(TERMS_NS_URI));
        assert_eq!(vocab.well_known_prefix(OC_DC_CATALOG_NS_URI), None);
    }
}
