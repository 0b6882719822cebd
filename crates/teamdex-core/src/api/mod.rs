//! Remote catalog access.
//!
//! `RemoteCatalogClient` is the paging contract the catalog cache consumes;
//! `HttpCatalogClient` implements it against the catalog HTTP functions.

pub mod client;
pub mod error;
pub mod remote;

pub use client::HttpCatalogClient;
pub use error::ApiError;
pub use remote::{CatalogPage, RemoteCatalogClient};
