//! DublinCore catalog data model.
//!
//! A catalog is an ordered multi-map from qualified property names to string
//! values, plus the namespace bindings, optional root tag and optional flavor
//! needed to serialize it. Types here are pure values; encoding lives in
//! `codec` and construction helpers in `factory`.

pub mod ename;
pub mod flavor;
pub mod model;
pub mod namespace;
pub mod value;

pub use ename::{EName, ENameParseError};
pub use flavor::{Flavor, FlavorParseError};
pub use model::{DublinCoreCatalog, Property};
pub use namespace::{NamespaceBinding, NamespaceContext};
pub use value::DublinCoreValue;
