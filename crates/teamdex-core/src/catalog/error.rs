use thiserror::Error;

use crate::api::ApiError;
use crate::models::CatalogKind;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A page request failed. Pages persisted before it stay persisted;
    /// the caller decides whether to retry.
    #[error("Failed to fetch {kind} page {page}: {source}")]
    RemoteFetchFailed {
        kind: CatalogKind,
        page: u32,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
