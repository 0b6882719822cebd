//! Client-side data layer for teamdex.
//!
//! - `store`: schema-versioned local persistence (`LocalStore`)
//! - `api`: the remote catalog contract and its HTTP client
//! - `catalog`: cache-aside catalog synchronization
//! - `favorites`: per-kind favorite snapshots
//! - `roster`: the validated, bounded team
//!
//! `Teamdex` opens one store and hands it to every component.

pub mod api;
pub mod catalog;
pub mod favorites;
pub mod models;
pub mod roster;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use api::RemoteCatalogClient;
use catalog::CatalogCache;
use favorites::FavoritesRegistry;
use models::CatalogKind;
use roster::RosterManager;
use store::{collections, LocalStore, StoreError, SCHEMA_VERSION};

/// One session's view of the data layer.
pub struct Teamdex<C> {
    store: Arc<LocalStore>,
    creatures: CatalogCache<C>,
    items: CatalogCache<C>,
    creature_favorites: FavoritesRegistry,
    item_favorites: FavoritesRegistry,
    roster: RosterManager,
}

impl<C: RemoteCatalogClient + Clone> Teamdex<C> {
    /// Open (or create) the store in `data_dir` at the current schema and
    /// wire every component to it.
    pub async fn open(
        data_dir: impl Into<PathBuf>,
        client: C,
        page_limit: u32,
    ) -> Result<Self, StoreError> {
        let store = Arc::new(
            LocalStore::open_or_create(data_dir, SCHEMA_VERSION, collections::ALL).await?,
        );
        Ok(Self::with_store(store, client, page_limit))
    }

    pub fn with_store(store: Arc<LocalStore>, client: C, page_limit: u32) -> Self {
        Self {
            creatures: CatalogCache::new(store.clone(), client.clone(), CatalogKind::Creatures)
                .with_page_limit(page_limit),
            items: CatalogCache::new(store.clone(), client, CatalogKind::Items)
                .with_page_limit(page_limit),
            creature_favorites: FavoritesRegistry::new(store.clone(), CatalogKind::Creatures),
            item_favorites: FavoritesRegistry::new(store.clone(), CatalogKind::Items),
            roster: RosterManager::new(store.clone()),
            store,
        }
    }
}

impl<C> Teamdex<C> {
    pub fn catalog(&self, kind: CatalogKind) -> &CatalogCache<C> {
        match kind {
            CatalogKind::Creatures => &self.creatures,
            CatalogKind::Items => &self.items,
        }
    }

    pub fn favorites(&self, kind: CatalogKind) -> &FavoritesRegistry {
        match kind {
            CatalogKind::Creatures => &self.creature_favorites,
            CatalogKind::Items => &self.item_favorites,
        }
    }

    pub fn roster(&self) -> &RosterManager {
        &self.roster
    }

    pub fn store(&self) -> &Arc<LocalStore> {
        &self.store
    }

    pub fn close(&self) {
        self.store.close();
    }
}
