//! Catalog construction.
//!
//! Every constructor is total and touches neither the network nor the disk.
//! Only the `make_identified_*` variants generate identifiers.

use crate::catalog::{DublinCoreCatalog, Flavor, NamespaceBinding};
use crate::catalog::namespace::DEFAULT_NS_PREFIX;
use crate::opencast::{Episode, OpencastDcterms, Series, SharedCatalog, share};
use crate::vocabulary::{
    ELEMENTS_1_1_NS_PREFIX, ELEMENTS_1_1_NS_URI, EPISODE_FLAVOR, OC_DC_CATALOG_NS_URI,
    OC_DC_CATALOG_ROOT_ELEMENT, OC_PROPERTY_NS_PREFIX, OC_PROPERTY_NS_URI, SERIES_FLAVOR,
    TERMS_NS_PREFIX, TERMS_NS_URI, XSI_NS_PREFIX, XSI_NS_URI,
};
use uuid::Uuid;

const STANDARD_BINDINGS: [NamespaceBinding; 2] = [
    NamespaceBinding::from_static(ELEMENTS_1_1_NS_PREFIX, ELEMENTS_1_1_NS_URI),
    NamespaceBinding::from_static(TERMS_NS_PREFIX, TERMS_NS_URI),
];

const OPENCAST_BINDINGS: [NamespaceBinding; 3] = [
    NamespaceBinding::from_static(OC_PROPERTY_NS_PREFIX, OC_PROPERTY_NS_URI),
    NamespaceBinding::from_static(DEFAULT_NS_PREFIX, OC_DC_CATALOG_NS_URI),
    NamespaceBinding::from_static(XSI_NS_PREFIX, XSI_NS_URI),
];

/// Catalog bound to the `dc` and `dcterms` vocabularies.
pub fn make_empty_standard_catalog() -> DublinCoreCatalog {
    let mut catalog = DublinCoreCatalog::new();
    catalog.add_bindings(STANDARD_BINDINGS);
    catalog
}

pub fn make_empty_catalog() -> DublinCoreCatalog {
    DublinCoreCatalog::new()
}

/// Opencast episode catalog. Sets `dcterms:identifier` and `dcterms:isPartOf`
/// only when given.
pub fn make_episode_catalog(id: Option<&str>, series_id: Option<&str>) -> Episode {
    let episode = Episode::new(make_opencast(EPISODE_FLAVOR));
    if let Some(id) = id {
        episode.set_dc_identifier(Some(id));
    }
    if let Some(series_id) = series_id {
        episode.set_is_part_of(Some(series_id));
    }
    episode
}

/// Like [`make_episode_catalog`] without a series, generating an identifier
/// when `id` is `None`.
pub fn make_identified_episode_catalog(id: Option<&str>) -> Episode {
    let id = id.map_or_else(generate_random_identifier, str::to_string);
    make_episode_catalog(Some(&id), None)
}

pub fn make_series_catalog(id: Option<&str>) -> Series {
    let series = Series::new(make_opencast(SERIES_FLAVOR));
    if let Some(id) = id {
        series.set_dc_identifier(Some(id));
    }
    series
}

pub fn make_identified_series_catalog(id: Option<&str>) -> Series {
    let id = id.map_or_else(generate_random_identifier, str::to_string);
    make_series_catalog(Some(&id))
}

pub fn wrap_existing_as_episode(catalog: SharedCatalog) -> Episode {
    Episode::new(catalog)
}

pub fn wrap_existing_as_series(catalog: SharedCatalog) -> Series {
    Series::new(catalog)
}

/// Random UUID v4 in canonical hyphenated form.
pub fn generate_random_identifier() -> String {
    Uuid::new_v4().to_string()
}

fn make_opencast(flavor: Flavor) -> SharedCatalog {
    let mut catalog = make_empty_standard_catalog();
    catalog.set_flavor(flavor);
    catalog.set_root_tag(OC_DC_CATALOG_ROOT_ELEMENT);
    catalog.add_bindings(OPENCAST_BINDINGS);
    share(catalog)
}
