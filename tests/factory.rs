// Factory guarantees: flavors, root tags, bindings and identifiers.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use dublincore::vocabulary::{
    EPISODE_FLAVOR, OC_DC_CATALOG_NS_URI, OC_DC_CATALOG_ROOT_ELEMENT, OC_PROPERTY_NS_URI,
    PROPERTY_IS_PART_OF, PROPERTY_TITLE, SERIES_FLAVOR, XSI_NS_URI,
};
use dublincore::{NamespaceBinding, OpencastDcterms, factory, opencast};
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

#[test]
fn episode_and_series_flavor_and_root_are_fixed() {
    for _ in 0..3 {
        let episode = factory::make_episode_catalog(None, None).snapshot();
        assert_eq!(episode.flavor(), Some(&EPISODE_FLAVOR));
        assert_eq!(episode.root_tag(), Some(&OC_DC_CATALOG_ROOT_ELEMENT));

        let series = factory::make_series_catalog(None).snapshot();
        assert_eq!(series.flavor(), Some(&SERIES_FLAVOR));
        assert_eq!(series.root_tag(), Some(&OC_DC_CATALOG_ROOT_ELEMENT));
    }
}

#[test]
fn opencast_catalogs_bind_xsi() {
    let episode = factory::make_episode_catalog(None, None).snapshot();
    let series = factory::make_series_catalog(None).snapshot();
    for catalog in [episode, series] {
        let bindings = catalog.bindings();
        assert_eq!(bindings.uri("xsi"), Some(XSI_NS_URI));
        assert_eq!(bindings.uri("oc"), Some(OC_PROPERTY_NS_URI));
        assert_eq!(bindings.uri(""), Some(OC_DC_CATALOG_NS_URI));
        assert_eq!(bindings.len(), 5);
    }
}

#[test]
fn identifier_defaulting() {
    let episode = factory::make_episode_catalog(None, Some("series-1")).snapshot();
    assert_eq!(episode.identifier(), None);
    assert_eq!(episode.first(&PROPERTY_IS_PART_OF), Some("series-1"));

    let episode = factory::make_episode_catalog(Some("abc"), None).snapshot();
    assert_eq!(episode.identifier(), Some("abc"));
    assert!(!episode.has(&PROPERTY_IS_PART_OF));

    let series = factory::make_series_catalog(None).snapshot();
    assert_eq!(series.identifier(), None);
}

#[test]
fn generated_identifiers_are_distinct_uuids() -> Result<()> {
    let mut seen = HashSet::new();
    for i in 0..64 {
        let id = if i % 2 == 0 {
            factory::make_identified_episode_catalog(None).dc_identifier()
        } else {
            factory::make_identified_series_catalog(None).dc_identifier()
        };
        let id = id.ok_or_else(|| anyhow::anyhow!("identifier missing"))?;
        Uuid::parse_str(&id)?;
        assert!(seen.insert(id), "duplicate identifier");
    }
    Ok(())
}

#[test]
fn wrapped_catalog_is_aliased_not_copied() {
    let shared = opencast::share(factory::make_empty_standard_catalog());
    let episode = factory::wrap_existing_as_episode(Rc::clone(&shared));
    let series = factory::wrap_existing_as_series(Rc::clone(&shared));

    episode.set_title(Some("Shared"));
    assert_eq!(series.title().as_deref(), Some("Shared"));
    assert_eq!(shared.borrow().first(&PROPERTY_TITLE), Some("Shared"));

    drop(episode);
    drop(series);
    assert_eq!(Rc::strong_count(&shared), 1);
    assert_eq!(shared.borrow().first(&PROPERTY_TITLE), Some("Shared"));
}

#[test]
fn binding_accumulation_is_a_union() {
    let mut catalog = factory::make_empty_standard_catalog();
    catalog.add_binding(NamespaceBinding::new("ex", "urn:example"));
    catalog.add_binding(NamespaceBinding::new("dc", "http://purl.org/dc/elements/1.1/"));
    assert_eq!(catalog.bindings().len(), 3);

    let rebound = catalog.add_binding(NamespaceBinding::new("ex", "urn:other"));
    assert_eq!(rebound, Some(NamespaceBinding::new("ex1", "urn:other")));
    assert_eq!(catalog.bindings().uri("ex"), Some("urn:example"));
    assert_eq!(catalog.bindings().uri("ex1"), Some("urn:other"));
}
