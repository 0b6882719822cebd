//! Cache-aside synchronization of the remote catalogs.
//!
//! One `CatalogCache` per `CatalogKind`. A miss pulls every page from the
//! remote source, persisting each page before asking for the next; a hit is
//! served straight from the local store.

pub mod cache;
pub mod error;

pub use cache::{CatalogCache, DEFAULT_PAGE_LIMIT};
pub use error::CatalogError;
