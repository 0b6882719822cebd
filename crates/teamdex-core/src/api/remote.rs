use crate::models::{CatalogEntry, CatalogKind};

use super::ApiError;

/// One page of a remote catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    /// Total page count as reported by the server. `None` means the
    /// catalog was served in a single response.
    pub pages: Option<u32>,
    pub total: Option<u64>,
}

/// A paginated source of catalog entries.
#[allow(async_fn_in_trait)]
pub trait RemoteCatalogClient {
    /// Fetch one page (1-based) of `limit` entries.
    async fn fetch_page(
        &self,
        kind: CatalogKind,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, ApiError>;
}

impl<T: RemoteCatalogClient> RemoteCatalogClient for std::sync::Arc<T> {
    async fn fetch_page(
        &self,
        kind: CatalogKind,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, ApiError> {
        (**self).fetch_page(kind, page, limit).await
    }
}
