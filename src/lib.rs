//! DublinCore metadata catalogs for Opencast.
//!
//! [`catalog`] holds the value model, [`factory`] builds empty and Opencast
//! flavored catalogs, [`opencast`] wraps shared catalogs in typed accessors,
//! and [`codec`] reads and writes the XML and JSON wire formats.
//!
//! ```ignore
//! use dublincore::{factory, opencast::OpencastDcterms, Format};
//!
//! let episode = factory::make_episode_catalog(Some("e-1"), Some("s-1"));
//! episode.set_title(Some("Lecture 1"));
//! let xml = Format::Xml.write(&episode.snapshot(), &Default::default())?;
//! let back = dublincore::read_str(&xml)?;
//! ```

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod opencast;
pub mod vocabulary;

pub use catalog::{
    DublinCoreCatalog, DublinCoreValue, EName, Flavor, NamespaceBinding, NamespaceContext,
    Property,
};
pub use codec::{Format, read, read_str};
pub use config::WriteOptions;
pub use error::{CatalogError, Result};
pub use opencast::{Episode, OpencastDcterms, Series, SharedCatalog};
