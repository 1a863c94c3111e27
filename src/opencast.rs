//! Typed views over Opencast episode and series catalogs.
//!
//! An accessor does not own its catalog. It holds a [`SharedCatalog`] handle,
//! so every write through the accessor is visible to all other holders of the
//! same handle, and dropping the accessor leaves the catalog alive.

use crate::catalog::{DublinCoreCatalog, DublinCoreValue, EName};
use crate::vocabulary::{
    ENC_SCHEME_ISO8601, ENC_SCHEME_PERIOD, ENC_SCHEME_W3CDTF, OC_PROPERTY_ADVERTISED,
    OC_PROPERTY_AGENT_TIMEZONE, OC_PROPERTY_ANNOTATION, OC_PROPERTY_DURATION,
    OC_PROPERTY_PROMOTED, OC_PROPERTY_RECURRENCE, PROPERTY_AVAILABLE, PROPERTY_CONTRIBUTOR,
    PROPERTY_CREATED, PROPERTY_CREATOR, PROPERTY_DESCRIPTION, PROPERTY_EXTENT,
    PROPERTY_IDENTIFIER, PROPERTY_IS_PART_OF, PROPERTY_LANGUAGE, PROPERTY_LICENSE,
    PROPERTY_PUBLISHER, PROPERTY_RIGHTS_HOLDER, PROPERTY_SOURCE, PROPERTY_SPATIAL,
    PROPERTY_SUBJECT, PROPERTY_TEMPORAL, PROPERTY_TITLE, PROPERTY_TYPE,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable catalog handle.
pub type SharedCatalog = Rc<RefCell<DublinCoreCatalog>>;

pub fn share(catalog: DublinCoreCatalog) -> SharedCatalog {
    Rc::new(RefCell::new(catalog))
}

/// Accessors for the `dcterms` properties Opencast uses on every catalog.
///
/// Single-valued getters return the first value; setters replace all values.
/// Passing `None` to an optional setter removes the property.
pub trait OpencastDcterms {
    fn shared(&self) -> &SharedCatalog;

    /// Handle to the underlying catalog.
    fn catalog(&self) -> SharedCatalog {
        Rc::clone(self.shared())
    }

    /// Owned copy of the current catalog state.
    fn snapshot(&self) -> DublinCoreCatalog {
        self.shared().borrow().clone()
    }

    fn first(&self, name: &EName) -> Option<String> {
        self.shared().borrow().first(name).map(str::to_string)
    }

    fn all(&self, name: &EName) -> Vec<String> {
        self.shared()
            .borrow()
            .get(name)
            .iter()
            .map(|v| v.value().to_string())
            .collect()
    }

    fn replace(&self, name: &EName, value: Option<DublinCoreValue>) {
        let mut catalog = self.shared().borrow_mut();
        match value {
            Some(value) => catalog.set(name, value),
            None => {
                catalog.remove(name);
            }
        }
    }

    fn append(&self, name: &EName, value: DublinCoreValue) {
        self.shared().borrow_mut().add(name, value);
    }

    fn dc_identifier(&self) -> Option<String> {
        self.first(&PROPERTY_IDENTIFIER)
    }

    fn set_dc_identifier(&self, identifier: Option<&str>) {
        self.replace(&PROPERTY_IDENTIFIER, identifier.map(DublinCoreValue::from));
    }

    fn title(&self) -> Option<String> {
        self.first(&PROPERTY_TITLE)
    }

    fn set_title(&self, title: Option<&str>) {
        self.replace(&PROPERTY_TITLE, title.map(DublinCoreValue::from));
    }

    fn description(&self) -> Option<String> {
        self.first(&PROPERTY_DESCRIPTION)
    }

    fn set_description(&self, description: Option<&str>) {
        self.replace(&PROPERTY_DESCRIPTION, description.map(DublinCoreValue::from));
    }

    fn subjects(&self) -> Vec<String> {
        self.all(&PROPERTY_SUBJECT)
    }

    fn add_subject(&self, subject: &str) {
        self.append(&PROPERTY_SUBJECT, subject.into());
    }

    fn creators(&self) -> Vec<String> {
        self.all(&PROPERTY_CREATOR)
    }

    fn add_creator(&self, creator: &str) {
        self.append(&PROPERTY_CREATOR, creator.into());
    }

    fn contributors(&self) -> Vec<String> {
        self.all(&PROPERTY_CONTRIBUTOR)
    }

    fn add_contributor(&self, contributor: &str) {
        self.append(&PROPERTY_CONTRIBUTOR, contributor.into());
    }

    fn publishers(&self) -> Vec<String> {
        self.all(&PROPERTY_PUBLISHER)
    }

    fn add_publisher(&self, publisher: &str) {
        self.append(&PROPERTY_PUBLISHER, publisher.into());
    }

    fn language(&self) -> Option<String> {
        self.first(&PROPERTY_LANGUAGE)
    }

    fn set_language(&self, language: Option<&str>) {
        self.replace(&PROPERTY_LANGUAGE, language.map(DublinCoreValue::from));
    }

    fn license(&self) -> Option<String> {
        self.first(&PROPERTY_LICENSE)
    }

    fn set_license(&self, license: Option<&str>) {
        self.replace(&PROPERTY_LICENSE, license.map(DublinCoreValue::from));
    }

    fn rights_holder(&self) -> Option<String> {
        self.first(&PROPERTY_RIGHTS_HOLDER)
    }

    fn set_rights_holder(&self, rights_holder: Option<&str>) {
        self.replace(&PROPERTY_RIGHTS_HOLDER, rights_holder.map(DublinCoreValue::from));
    }

    fn created(&self) -> Option<String> {
        self.first(&PROPERTY_CREATED)
    }

    /// W3C date-time, e.g. `2024-03-01T10:00:00Z`. Stored with the W3CDTF scheme.
    fn set_created(&self, created: Option<&str>) {
        self.replace(&PROPERTY_CREATED, encoded(created, ENC_SCHEME_W3CDTF));
    }

    fn temporal(&self) -> Option<String> {
        self.first(&PROPERTY_TEMPORAL)
    }

    /// DCMI period, e.g. `start=2024-03-01T10:00:00Z; end=2024-03-01T11:00:00Z; scheme=W3C-DTF;`.
    fn set_temporal(&self, period: Option<&str>) {
        self.replace(&PROPERTY_TEMPORAL, encoded(period, ENC_SCHEME_PERIOD));
    }

    fn spatial(&self) -> Option<String> {
        self.first(&PROPERTY_SPATIAL)
    }

    fn set_spatial(&self, spatial: Option<&str>) {
        self.replace(&PROPERTY_SPATIAL, spatial.map(DublinCoreValue::from));
    }

    fn source(&self) -> Option<String> {
        self.first(&PROPERTY_SOURCE)
    }

    fn set_source(&self, source: Option<&str>) {
        self.replace(&PROPERTY_SOURCE, source.map(DublinCoreValue::from));
    }

    fn extent(&self) -> Option<String> {
        self.first(&PROPERTY_EXTENT)
    }

    /// ISO 8601 duration, e.g. `PT1H30M`.
    fn set_extent(&self, extent: Option<&str>) {
        self.replace(&PROPERTY_EXTENT, encoded(extent, ENC_SCHEME_ISO8601));
    }

    fn dc_type(&self) -> Option<String> {
        self.first(&PROPERTY_TYPE)
    }

    fn set_dc_type(&self, dc_type: Option<&str>) {
        self.replace(&PROPERTY_TYPE, dc_type.map(DublinCoreValue::from));
    }

    fn available(&self) -> Option<String> {
        self.first(&PROPERTY_AVAILABLE)
    }

    fn set_available(&self, available: Option<&str>) {
        self.replace(&PROPERTY_AVAILABLE, encoded(available, ENC_SCHEME_PERIOD));
    }

    fn annotation(&self) -> Option<String> {
        self.first(&OC_PROPERTY_ANNOTATION)
    }

    fn set_annotation(&self, annotation: Option<&str>) {
        self.replace(&OC_PROPERTY_ANNOTATION, annotation.map(DublinCoreValue::from));
    }

    fn advertised(&self) -> Option<bool> {
        self.first(&OC_PROPERTY_ADVERTISED).and_then(|v| parse_flag(&v))
    }

    fn set_advertised(&self, advertised: Option<bool>) {
        self.replace(&OC_PROPERTY_ADVERTISED, advertised.map(flag));
    }

    fn promoted(&self) -> Option<bool> {
        self.first(&OC_PROPERTY_PROMOTED).and_then(|v| parse_flag(&v))
    }

    fn set_promoted(&self, promoted: Option<bool>) {
        self.replace(&OC_PROPERTY_PROMOTED, promoted.map(flag));
    }
}

fn encoded(value: Option<&str>, scheme: EName) -> Option<DublinCoreValue> {
    value.map(|v| DublinCoreValue::new(v).with_encoding_scheme(scheme))
}

fn flag(value: bool) -> DublinCoreValue {
    DublinCoreValue::new(value.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accessor view over an episode catalog.
#[derive(Clone, Debug)]
pub struct Episode {
    catalog: SharedCatalog,
}

impl Episode {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }

    /// Identifier of the series this episode belongs to.
    pub fn is_part_of(&self) -> Option<String> {
        self.first(&PROPERTY_IS_PART_OF)
    }

    pub fn set_is_part_of(&self, series_id: Option<&str>) {
        self.replace(&PROPERTY_IS_PART_OF, series_id.map(DublinCoreValue::from));
    }

    pub fn agent_timezone(&self) -> Option<String> {
        self.first(&OC_PROPERTY_AGENT_TIMEZONE)
    }

    pub fn set_agent_timezone(&self, timezone: Option<&str>) {
        self.replace(&OC_PROPERTY_AGENT_TIMEZONE, timezone.map(DublinCoreValue::from));
    }

    pub fn recurrence(&self) -> Option<String> {
        self.first(&OC_PROPERTY_RECURRENCE)
    }

    pub fn set_recurrence(&self, rrule: Option<&str>) {
        self.replace(&OC_PROPERTY_RECURRENCE, rrule.map(DublinCoreValue::from));
    }

    /// Scheduled duration in milliseconds.
    pub fn duration(&self) -> Option<u64> {
        self.first(&OC_PROPERTY_DURATION)?.trim().parse().ok()
    }

    pub fn set_duration(&self, millis: Option<u64>) {
        self.replace(
            &OC_PROPERTY_DURATION,
            millis.map(|ms| DublinCoreValue::new(ms.to_string())),
        );
    }
}

impl OpencastDcterms for Episode {
    fn shared(&self) -> &SharedCatalog {
        &self.catalog
    }
}

/// Accessor view over a series catalog.
#[derive(Clone, Debug)]
pub struct Series {
    catalog: SharedCatalog,
}

impl Series {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

impl OpencastDcterms for Series {
    fn shared(&self) -> &SharedCatalog {
        &self.catalog
    }
}
