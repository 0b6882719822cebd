//! Local persistent storage.
//!
//! `LocalStore` is the single source of truth for catalog caches, favorites
//! and the roster. It is opened once per session and shared by `Arc`.
//!
//! On disk a store is a directory holding `manifest.json` plus one
//! `<collection>.json` document per collection.

pub mod engine;
pub mod error;
pub mod locks;
pub mod manifest;

use serde::{de::DeserializeOwned, Serialize};

pub use engine::LocalStore;
pub use error::StoreError;
pub use locks::KeyedLocks;

/// Current schema version. Version 2 added `catalogSync`.
pub const SCHEMA_VERSION: u32 = 2;

/// Collection names and the schema they belong to.
pub mod collections {
    pub const CREATURE_CATALOG: &str = "creatureCatalog";
    pub const ITEM_CATALOG: &str = "itemCatalog";
    pub const CREATURE_FAVORITES: &str = "creatureFavorites";
    pub const ITEM_FAVORITES: &str = "itemFavorites";
    pub const ROSTER: &str = "roster";
    pub const CATALOG_SYNC: &str = "catalogSync";

    /// Collections of schema version 1.
    pub const V1: &[&str] = &[
        CREATURE_CATALOG,
        ITEM_CATALOG,
        CREATURE_FAVORITES,
        ITEM_FAVORITES,
        ROSTER,
    ];

    /// Collections of the current schema.
    pub const ALL: &[&str] = &[
        CREATURE_CATALOG,
        ITEM_CATALOG,
        CREATURE_FAVORITES,
        ITEM_FAVORITES,
        ROSTER,
        CATALOG_SYNC,
    ];
}

/// A value stored under a primary key.
pub trait Record: Serialize + DeserializeOwned {
    fn key(&self) -> String;
}
