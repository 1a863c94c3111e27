//! The catalog value object.
//!
//! Properties are stored as an insertion-ordered list of (name, values) pairs.
//! Catalogs hold a few dozen properties at most, so lookups scan the list;
//! in exchange equality and serialization see the exact insertion order.

use crate::catalog::{DublinCoreValue, EName, Flavor, NamespaceBinding, NamespaceContext};
use crate::vocabulary::PROPERTY_IDENTIFIER;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A property and its values, in insertion order. Never empty.
pub struct Property {
    name: EName,
    values: Vec<DublinCoreValue>,
}

impl Property {
    pub fn name(&self) -> &EName {
        &self.name
    }

    pub fn values(&self) -> &[DublinCoreValue] {
        &self.values
    }

    pub fn first(&self) -> Option<&DublinCoreValue> {
        self.values.first()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// DublinCore metadata catalog: ordered multi-valued properties keyed by
/// qualified name, plus optional root tag, optional flavor and the namespace
/// bindings used when serializing.
pub struct DublinCoreCatalog {
    root_tag: Option<EName>,
    flavor: Option<Flavor>,
    bindings: NamespaceContext,
    properties: Vec<Property>,
}

impl DublinCoreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_tag(&self) -> Option<&EName> {
        self.root_tag.as_ref()
    }

    pub fn set_root_tag(&mut self, root_tag: EName) {
        self.root_tag = Some(root_tag);
    }

    pub fn clear_root_tag(&mut self) {
        self.root_tag = None;
    }

    pub fn flavor(&self) -> Option<&Flavor> {
        self.flavor.as_ref()
    }

    pub fn set_flavor(&mut self, flavor: Flavor) {
        self.flavor = Some(flavor);
    }

    pub fn clear_flavor(&mut self) {
        self.flavor = None;
    }

    pub fn bindings(&self) -> &NamespaceContext {
        &self.bindings
    }

    /// Register one binding; see [`NamespaceContext::add`] for the conflict policy.
    pub fn add_binding(&mut self, binding: NamespaceBinding) -> Option<NamespaceBinding> {
        self.bindings.add(binding)
    }

    /// Union `bindings` into the catalog's binding context.
    pub fn add_bindings(&mut self, bindings: impl IntoIterator<Item = NamespaceBinding>) {
        self.bindings.extend(bindings);
    }

    /// All values of `name`; empty when the property is not set.
    pub fn get(&self, name: &EName) -> &[DublinCoreValue] {
        self.property(name).map(Property::values).unwrap_or_default()
    }

    pub fn first_value(&self, name: &EName) -> Option<&DublinCoreValue> {
        self.property(name).and_then(Property::first)
    }

    /// The first value of `name` as a string.
    pub fn first(&self, name: &EName) -> Option<&str> {
        self.first_value(name).map(DublinCoreValue::value)
    }

    /// The first value of `name` tagged with `language` (`None` selects values
    /// without a language).
    pub fn first_in_language(&self, name: &EName, language: Option<&str>) -> Option<&str> {
        self.get(name)
            .iter()
            .find(|v| v.language() == language)
            .map(DublinCoreValue::value)
    }

    pub fn has(&self, name: &EName) -> bool {
        self.property(name).is_some()
    }

    /// Replace all values of `name` with `value`.
    pub fn set(&mut self, name: &EName, value: impl Into<DublinCoreValue>) {
        self.set_all(name, [value.into()]);
    }

    /// Replace all values of `name`. An empty `values` removes the property.
    pub fn set_all(&mut self, name: &EName, values: impl IntoIterator<Item = DublinCoreValue>) {
        let values: Vec<DublinCoreValue> = values.into_iter().collect();
        if values.is_empty() {
            self.remove(name);
            return;
        }
        match self.property_mut(name) {
            Some(property) => property.values = values,
            None => self.properties.push(Property {
                name: name.clone(),
                values,
            }),
        }
    }

    /// Append `value` to the values of `name`.
    pub fn add(&mut self, name: &EName, value: impl Into<DublinCoreValue>) {
        let value = value.into();
        match self.property_mut(name) {
            Some(property) => property.values.push(value),
            None => self.properties.push(Property {
                name: name.clone(),
                values: vec![value],
            }),
        }
    }

    /// Remove `name` and return its values.
    pub fn remove(&mut self, name: &EName) -> Vec<DublinCoreValue> {
        match self.properties.iter().position(|p| &p.name == name) {
            Some(idx) => self.properties.remove(idx).values,
            None => Vec::new(),
        }
    }

    pub fn clear_values(&mut self) {
        self.properties.clear();
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &EName> {
        self.properties.iter().map(Property::name)
    }

    /// Number of distinct properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Total number of values across all properties.
    pub fn value_count(&self) -> usize {
        self.properties.iter().map(|p| p.values.len()).sum()
    }

    /// First value of `dcterms:identifier`.
    pub fn identifier(&self) -> Option<&str> {
        self.first(&PROPERTY_IDENTIFIER)
    }

    pub fn set_identifier(&mut self, identifier: &str) {
        self.set(&PROPERTY_IDENTIFIER, identifier);
    }

    fn property(&self, name: &EName) -> Option<&Property> {
        self.properties.iter().find(|p| &p.name == name)
    }

    fn property_mut(&mut self, name: &EName) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| &p.name == name)
    }
}
