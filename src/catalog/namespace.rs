//! Namespace bindings and the binding context a catalog accumulates.
//!
//! Bindings are only ever added. Registering a binding set unions it with what
//! is already present; a prefix that is already bound to a different URI is
//! never overwritten. The new URI is stored under a derived prefix instead
//! (`dc1`, `dc2`, ... or `ns1`, `ns2`, ... for the default namespace) so both
//! URIs stay reachable.

use std::borrow::Cow;
use tracing::debug;

pub const XML_NS_PREFIX: &str = "xml";
pub const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_ATTRIBUTE: &str = "xmlns";

/// The empty prefix binds the default namespace.
pub const DEFAULT_NS_PREFIX: &str = "";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceBinding {
    prefix: Cow<'static, str>,
    uri: Cow<'static, str>,
}

impl NamespaceBinding {
    pub const fn from_static(prefix: &'static str, uri: &'static str) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
            uri: Cow::Borrowed(uri),
        }
    }

    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: Cow::Owned(prefix.into()),
            uri: Cow::Owned(uri.into()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered union of namespace bindings.
pub struct NamespaceContext {
    bindings: Vec<NamespaceBinding>,
}

impl NamespaceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from `bindings`, applying the same union rules as `add`.
    pub fn mk(bindings: impl IntoIterator<Item = NamespaceBinding>) -> Self {
        let mut ctx = Self::new();
        ctx.extend(bindings);
        ctx
    }

    /// Register a binding and return the binding that was actually stored.
    ///
    /// Returns `None` when nothing new was stored: the exact binding already
    /// exists, the prefix is reserved (`xml`, `xmlns`), the URI is empty, or the
    /// prefix conflicts and the URI is already reachable through another prefix.
    pub fn add(&mut self, binding: NamespaceBinding) -> Option<NamespaceBinding> {
        if binding.uri().is_empty() {
            debug!(prefix = binding.prefix(), "ignoring namespace binding with empty uri");
            return None;
        }
        if is_reserved_prefix(binding.prefix()) {
            debug!(prefix = binding.prefix(), "ignoring reserved namespace prefix");
            return None;
        }
        if self.bindings.contains(&binding) {
            return None;
        }

        if self.uri(binding.prefix()).is_none() {
            self.bindings.push(binding.clone());
            return Some(binding);
        }

        if self.bindings.iter().any(|b| b.uri() == binding.uri()) {
            debug!(
                prefix = binding.prefix(),
                uri = binding.uri(),
                "prefix already bound; uri reachable through another prefix"
            );
            return None;
        }

        let derived = self.derive_prefix(binding.prefix());
        debug!(
            prefix = binding.prefix(),
            derived = derived.as_str(),
            uri = binding.uri(),
            "prefix already bound to a different uri; rebinding under derived prefix"
        );
        let rebound = NamespaceBinding::new(derived, binding.uri().to_string());
        self.bindings.push(rebound.clone());
        Some(rebound)
    }

    /// Union `other` into this context, in `other`'s order.
    pub fn merge(&mut self, other: &NamespaceContext) {
        self.extend(other.iter().cloned());
    }

    /// URI bound to `prefix`. The `xml` prefix is always bound.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        if prefix == XML_NS_PREFIX {
            return Some(XML_NS_URI);
        }
        self.bindings
            .iter()
            .find(|b| b.prefix() == prefix)
            .map(NamespaceBinding::uri)
    }

    /// First prefix bound to `uri`, the default namespace included.
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        if uri == XML_NS_URI {
            return Some(XML_NS_PREFIX);
        }
        self.bindings
            .iter()
            .find(|b| b.uri() == uri)
            .map(NamespaceBinding::prefix)
    }

    /// First non-empty prefix bound to `uri`.
    ///
    /// Attribute names and QName-valued attributes cannot use the default
    /// namespace, so they need this lookup instead of `prefix`.
    pub fn attribute_prefix(&self, uri: &str) -> Option<&str> {
        if uri == XML_NS_URI {
            return Some(XML_NS_PREFIX);
        }
        self.bindings
            .iter()
            .find(|b| b.uri() == uri && !b.is_default())
            .map(NamespaceBinding::prefix)
    }

    pub fn contains(&self, binding: &NamespaceBinding) -> bool {
        self.bindings.contains(binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn derive_prefix(&self, base: &str) -> String {
        let stem = if base.is_empty() { "ns" } else { base };
        let mut n = 1usize;
        loop {
            let candidate = format!("{stem}{n}");
            if self.uri(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Extend<NamespaceBinding> for NamespaceContext {
    fn extend<T: IntoIterator<Item = NamespaceBinding>>(&mut self, iter: T) {
        for binding in iter {
            self.add(binding);
        }
    }
}

impl<'a> IntoIterator for &'a NamespaceContext {
    type Item = &'a NamespaceBinding;
    type IntoIter = std::slice::Iter<'a, NamespaceBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

pub(crate) fn is_reserved_prefix(prefix: &str) -> bool {
    prefix == XML_NS_PREFIX || prefix == XMLNS_ATTRIBUTE
}
