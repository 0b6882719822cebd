use std::sync::Arc;

use tracing::{debug, info};

use super::CatalogError;
use crate::api::RemoteCatalogClient;
use crate::models::{CatalogEntry, CatalogKind, CatalogSyncState};
use crate::store::{collections, LocalStore, StoreError};

/// Page size requested from the remote catalog.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Cache-aside view of one remote catalog.
///
/// A populated collection is served as is: there is no TTL and no
/// invalidation, the catalog is treated as near-static. Concurrent
/// `fetch_catalog` calls on an empty cache are not deduplicated; each may run
/// a full sync, which is wasteful but safe because every write is an upsert.
pub struct CatalogCache<C> {
    store: Arc<LocalStore>,
    client: C,
    kind: CatalogKind,
    page_limit: u32,
}

impl<C: RemoteCatalogClient> CatalogCache<C> {
    pub fn new(store: Arc<LocalStore>, client: C, kind: CatalogKind) -> Self {
        Self {
            store,
            client,
            kind,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// The full catalog, pulled from the remote source on a miss.
    ///
    /// A fresh sync writes an incomplete checkpoint before the first request.
    /// Each page is then persisted in one atomic batch as soon as it arrives,
    /// followed by an advanced checkpoint, so records never exist without an
    /// incomplete checkpoint until the last page lands. An interrupted sync
    /// resumes at the first missing page on the next call.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let collection = self.kind.catalog_collection();
        // Count before reading the checkpoint: a concurrent sync writes its
        // checkpoint before any record, so seen records imply a seen checkpoint.
        let cached = self.store.count(collection).await?;
        let checkpoint = self.sync_state().await?;

        let (mut page, mut total_pages) = match checkpoint {
            Some(state) if !state.complete => {
                info!(
                    kind = %self.kind,
                    next_page = state.next_page,
                    total_pages = state.total_pages,
                    "Resuming interrupted catalog sync"
                );
                (state.next_page, state.total_pages)
            }
            _ if cached > 0 => {
                debug!(kind = %self.kind, records = cached, "Catalog cache hit");
                return Ok(self.cached_entries().await?);
            }
            _ => {
                debug!(kind = %self.kind, "Catalog cache miss, syncing from remote");
                let started = CatalogSyncState::new(self.kind, 1, 1);
                self.store.put(collections::CATALOG_SYNC, &started).await?;
                (1, 1)
            }
        };

        let mut fetched = 0usize;
        while page <= total_pages {
            let result = self
                .client
                .fetch_page(self.kind, page, self.page_limit)
                .await
                .map_err(|source| CatalogError::RemoteFetchFailed {
                    kind: self.kind,
                    page,
                    source,
                })?;

            self.store.put_batch(collection, &result.entries).await?;
            fetched += result.entries.len();

            // No page count means the whole catalog came in this response.
            total_pages = result.pages.unwrap_or(page);
            page += 1;

            let state = CatalogSyncState::new(self.kind, page, total_pages);
            self.store.put(collections::CATALOG_SYNC, &state).await?;
            debug!(
                kind = %self.kind,
                page = page - 1,
                total_pages,
                records = result.entries.len(),
                "Persisted catalog page"
            );
        }

        info!(kind = %self.kind, fetched, "Catalog sync complete");
        Ok(self.cached_entries().await?)
    }

    /// One entry from the local cache. Never calls the remote source.
    pub async fn get_entry(&self, id: i64) -> Result<Option<CatalogEntry>, StoreError> {
        self.store
            .get(self.kind.catalog_collection(), &id.to_string())
            .await
    }

    pub async fn sync_state(&self) -> Result<Option<CatalogSyncState>, StoreError> {
        self.store
            .get(collections::CATALOG_SYNC, self.kind.name())
            .await
    }

    async fn cached_entries(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut entries: Vec<CatalogEntry> =
            self.store.get_all(self.kind.catalog_collection()).await?;
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }
}
