use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CatalogKind;
use crate::store::Record;

/// Progress of a catalog sync, written after each persisted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CatalogSyncState {
    pub kind: CatalogKind,
    /// First page not yet persisted.
    pub next_page: u32,
    pub total_pages: u32,
    pub complete: bool,
    pub updated_at: DateTime<Utc>,
}

impl CatalogSyncState {
    pub fn new(kind: CatalogKind, next_page: u32, total_pages: u32) -> Self {
        Self {
            kind,
            next_page,
            total_pages,
            complete: next_page > total_pages,
            updated_at: Utc::now(),
        }
    }
}

impl Record for CatalogSyncState {
    fn key(&self) -> String {
        self.kind.name().to_string()
    }
}
