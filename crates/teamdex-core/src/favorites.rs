//! Per-kind favorites.
//!
//! A favorite is a snapshot of a catalog entry stored under the entry id.
//! Toggling is a read-then-write, serialized per id so concurrent toggles of
//! the same entry never lose an update.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::{CatalogEntry, CatalogKind, FavoriteEntry};
use crate::store::{KeyedLocks, LocalStore, StoreError};

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Cannot favorite a {found} entry in the {expected} registry")]
    WrongKind {
        expected: CatalogKind,
        found: CatalogKind,
    },

    #[error("Snapshot #{snapshot_id} cannot be favorited as #{id}")]
    IdMismatch { id: i64, snapshot_id: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

pub struct FavoritesRegistry {
    store: Arc<LocalStore>,
    kind: CatalogKind,
    locks: KeyedLocks,
}

impl FavoritesRegistry {
    pub fn new(store: Arc<LocalStore>, kind: CatalogKind) -> Self {
        Self {
            store,
            kind,
            locks: KeyedLocks::new(),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Remove `id` if favorited, otherwise store `snapshot` under it.
    /// The snapshot must be of this registry's kind and carry `id`.
    pub async fn toggle(
        &self,
        id: i64,
        snapshot: CatalogEntry,
    ) -> Result<FavoriteToggle, FavoritesError> {
        if snapshot.kind() != self.kind {
            return Err(FavoritesError::WrongKind {
                expected: self.kind,
                found: snapshot.kind(),
            });
        }
        if snapshot.id != id {
            return Err(FavoritesError::IdMismatch {
                id,
                snapshot_id: snapshot.id,
            });
        }

        let key = id.to_string();
        let collection = self.kind.favorites_collection();
        let _guard = self.locks.lock(&key).await;

        if self.store.contains(collection, &key).await? {
            self.store.delete(collection, &key).await?;
            info!(kind = %self.kind, id, name = %snapshot.name, "Removed from favorites");
            Ok(FavoriteToggle::Removed)
        } else {
            let name = snapshot.name.clone();
            self.store
                .put(collection, &FavoriteEntry::new(id, snapshot))
                .await?;
            info!(kind = %self.kind, id, name = %name, "Added to favorites");
            Ok(FavoriteToggle::Added)
        }
    }

    pub async fn list(&self) -> Result<Vec<FavoriteEntry>, StoreError> {
        let mut favorites: Vec<FavoriteEntry> =
            self.store.get_all(self.kind.favorites_collection()).await?;
        favorites.sort_by_key(|f| f.id);
        Ok(favorites)
    }

    pub async fn contains(&self, id: i64) -> Result<bool, StoreError> {
        self.store
            .contains(self.kind.favorites_collection(), &id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogCache;
    use crate::models::CatalogSyncState;
    use crate::store::collections;
    use crate::testing::{creature, item, open_store, FakeCatalogClient};
    use futures::future::join_all;

    #[tokio::test]
    async fn test_toggle_twice_restores_prior_state() {
        let (_dir, store) = open_store().await;
        let favorites = FavoritesRegistry::new(store, CatalogKind::Creatures);
        favorites
            .toggle(4, creature(4, "charmander"))
            .await
            .expect("seed favorite");
        let before = favorites.list().await.expect("list");

        let first = favorites.toggle(25, creature(25, "pikachu")).await.expect("toggle");
        assert_eq!(first, FavoriteToggle::Added);
        assert!(favorites.contains(25).await.expect("contains"));

        let second = favorites.toggle(25, creature(25, "pikachu")).await.expect("toggle");
        assert_eq!(second, FavoriteToggle::Removed);
        assert_eq!(favorites.list().await.expect("list"), before);
    }

    #[tokio::test]
    async fn test_snapshot_is_stored_verbatim() {
        let (_dir, store) = open_store().await;
        let favorites = FavoritesRegistry::new(store, CatalogKind::Items);
        let potion = item(17, "potion");
        favorites.toggle(17, potion.clone()).await.expect("toggle");

        let listed = favorites.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].snapshot, potion);
    }

    #[tokio::test]
    async fn test_registries_do_not_share_storage() {
        let (_dir, store) = open_store().await;
        let creatures = FavoritesRegistry::new(store.clone(), CatalogKind::Creatures);
        let items = FavoritesRegistry::new(store, CatalogKind::Items);

        creatures.toggle(1, creature(1, "bulbasaur")).await.expect("toggle");
        assert!(creatures.contains(1).await.expect("contains"));
        assert!(!items.contains(1).await.expect("contains"));
        assert!(items.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_wrong_kind_is_rejected() {
        let (_dir, store) = open_store().await;
        let creatures = FavoritesRegistry::new(store, CatalogKind::Creatures);
        let result = creatures.toggle(17, item(17, "potion")).await;
        assert!(matches!(result, Err(FavoritesError::WrongKind { .. })));
    }

    #[tokio::test]
    async fn test_mismatched_id_is_rejected() {
        let (_dir, store) = open_store().await;
        let creatures = FavoritesRegistry::new(store, CatalogKind::Creatures);
        let result = creatures.toggle(5, creature(4, "charmander")).await;
        assert!(matches!(
            result,
            Err(FavoritesError::IdMismatch {
                id: 5,
                snapshot_id: 4
            })
        ));
        assert!(!creatures.contains(5).await.expect("contains"));
        assert!(creatures.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_catalog_resync() {
        let (_dir, store) = open_store().await;
        let favorites = FavoritesRegistry::new(store.clone(), CatalogKind::Creatures);
        let original = creature(1, "bulbasaur");
        store
            .put(collections::CREATURE_CATALOG, &original)
            .await
            .expect("seed catalog");
        favorites.toggle(1, original.clone()).await.expect("toggle");

        // Force a re-sync that serves a changed entry under the same id.
        store
            .put(
                collections::CATALOG_SYNC,
                &CatalogSyncState::new(CatalogKind::Creatures, 1, 1),
            )
            .await
            .expect("seed checkpoint");
        let client = Arc::new(FakeCatalogClient::paged(
            CatalogKind::Creatures,
            vec![vec![creature(1, "bulbasaur-renamed")]],
        ));
        let cache = CatalogCache::new(store, client, CatalogKind::Creatures);
        cache.fetch_catalog().await.expect("re-sync");
        let cached = cache.get_entry(1).await.expect("get").expect("entry");
        assert_eq!(cached.name, "bulbasaur-renamed");

        let listed = favorites.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].snapshot, original);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_do_not_lose_updates() {
        let (_dir, store) = open_store().await;
        let favorites = FavoritesRegistry::new(store, CatalogKind::Creatures);

        let odd = join_all((0..7).map(|_| favorites.toggle(150, creature(150, "mewtwo")))).await;
        assert!(odd.iter().all(|r| r.is_ok()));
        assert!(favorites.contains(150).await.expect("contains"));

        let even = join_all((0..8).map(|_| favorites.toggle(151, creature(151, "mew")))).await;
        assert!(even.iter().all(|r| r.is_ok()));
        assert!(!favorites.contains(151).await.expect("contains"));
    }
}
