use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::store::Record;

/// A snapshot of a catalog entry taken when it was favorited.
/// Later catalog re-syncs do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FavoriteEntry {
    pub id: i64,
    pub snapshot: CatalogEntry,
    pub favorited_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(id: i64, snapshot: CatalogEntry) -> Self {
        Self {
            id,
            snapshot,
            favorited_at: Utc::now(),
        }
    }
}

impl Record for FavoriteEntry {
    fn key(&self) -> String {
        self.id.to_string()
    }
}
