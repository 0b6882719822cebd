use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;

/// Manifest file name in the store directory
pub(crate) const MANIFEST_FILE: &str = "manifest.json";

/// Schema description persisted next to the collection files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub schema_version: u32,
    pub collections: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub opened_at: DateTime<Utc>,
}

impl Manifest {
    pub fn new(schema_version: u32, collections: &[&str]) -> Self {
        let now = Utc::now();
        Self {
            schema_version,
            collections: collections.iter().map(|c| c.to_string()).collect(),
            created_at: now,
            opened_at: now,
        }
    }

    pub async fn load(dir: &Path) -> Result<Option<Self>, StoreError> {
        let path = dir.join(MANIFEST_FILE);
        let contents = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::unavailable(path, e)),
        };
        let manifest = serde_json::from_slice(&contents).map_err(|source| StoreError::Corrupt {
            name: MANIFEST_FILE.to_string(),
            source,
        })?;
        Ok(Some(manifest))
    }

    pub fn has(&self, collection: &str) -> bool {
        self.collections.iter().any(|c| c == collection)
    }

    /// Collections declared in `wanted` that this manifest lacks.
    pub fn missing<'a>(&self, wanted: &[&'a str]) -> Vec<&'a str> {
        wanted.iter().copied().filter(|c| !self.has(c)).collect()
    }
}
