use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::manifest::{Manifest, MANIFEST_FILE};
use super::{Record, StoreError};

/// Extension for in-flight writes. Anything left with it was interrupted.
const TEMP_EXTENSION: &str = "tmp";

/// Records of one collection, by primary key.
type Collection = BTreeMap<String, Value>;

/// Schema-versioned, multi-collection key-value store persisted as one JSON
/// document per collection.
///
/// Every write replaces the collection document atomically (temp file, fsync,
/// rename) before the in-memory view changes, so a crash leaves either the
/// old or the new contents. Collections are locked independently.
pub struct LocalStore {
    dir: PathBuf,
    schema_version: u32,
    collections: HashMap<String, RwLock<Collection>>,
    closed: AtomicBool,
}

impl LocalStore {
    /// Open the store in `dir`, creating it if needed.
    ///
    /// A newer `schema_version` adds any collection in `collection_names`
    /// that the stored schema lacks. Existing collections are never dropped.
    pub async fn open_or_create(
        dir: impl Into<PathBuf>,
        schema_version: u32,
        collection_names: &[&str],
    ) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::unavailable(&dir, e))?;

        Self::discard_interrupted_writes(&dir).await?;

        let mut manifest = match Manifest::load(&dir).await? {
            None => {
                info!(dir = %dir.display(), version = schema_version, "Creating local store");
                for name in collection_names {
                    Self::create_collection_file(&dir, name).await?;
                }
                Manifest::new(schema_version, collection_names)
            }
            Some(existing) if schema_version < existing.schema_version => {
                return Err(StoreError::VersionDowngrade {
                    stored: existing.schema_version,
                    requested: schema_version,
                });
            }
            Some(mut existing) if schema_version > existing.schema_version => {
                let missing = existing.missing(collection_names);
                info!(
                    from = existing.schema_version,
                    to = schema_version,
                    added = ?missing,
                    "Migrating local store"
                );
                for name in &missing {
                    Self::create_collection_file(&dir, name).await?;
                }
                existing
                    .collections
                    .extend(missing.iter().map(|c| c.to_string()));
                existing.schema_version = schema_version;
                existing
            }
            Some(existing) => existing,
        };

        // Rewriting the manifest on every open doubles as a write-access check.
        manifest.opened_at = Utc::now();
        let bytes = serde_json::to_vec_pretty(&manifest)?;
        let manifest_path = dir.join(MANIFEST_FILE);
        write_atomic(&manifest_path, &bytes)
            .await
            .map_err(|e| StoreError::unavailable(&manifest_path, e))?;

        let mut collections = HashMap::new();
        for name in &manifest.collections {
            let records = Self::load_collection(&dir, name).await?;
            debug!(collection = %name, records = records.len(), "Loaded collection");
            collections.insert(name.clone(), RwLock::new(records));
        }

        Ok(Self {
            dir,
            schema_version: manifest.schema_version,
            collections,
            closed: AtomicBool::new(false),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Names of all collections, sorted.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// End the store's lifecycle. Every later operation fails with `Closed`.
    /// All writes are already durable, so there is nothing to flush.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!(dir = %self.dir.display(), "Closed local store");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // ===== Reads =====

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let records = self.collection(collection)?.read().await;
        records
            .get(key)
            .map(|value| decode(collection, value.clone()))
            .transpose()
    }

    /// All records of a collection, in primary-key order.
    pub async fn get_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let records = self.collection(collection)?.read().await;
        records
            .values()
            .map(|value| decode(collection, value.clone()))
            .collect()
    }

    pub async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.collection(collection)?.read().await.len())
    }

    pub async fn contains(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self.collection(collection)?.read().await.contains_key(key))
    }

    // ===== Writes =====

    /// Insert or overwrite one record by its primary key.
    pub async fn put<T: Record>(&self, collection: &str, record: &T) -> Result<(), StoreError> {
        let key = record.key();
        let value = serde_json::to_value(record)?;
        self.mutate(collection, move |records| {
            records.insert(key, value);
        })
        .await
    }

    /// Upsert many records as one atomic write: all of them land or none do.
    pub async fn put_batch<T: Record>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let encoded = records
            .iter()
            .map(|r| Ok((r.key(), serde_json::to_value(r)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;
        self.mutate(collection, move |existing| {
            existing.extend(encoded);
        })
        .await
    }

    /// Remove one record. Returns whether it existed.
    pub async fn delete(&self, collection: &str, key: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        self.mutate(collection, |records| {
            removed = records.remove(key).is_some();
        })
        .await?;
        Ok(removed)
    }

    pub async fn clear(&self, collection: &str) -> Result<(), StoreError> {
        self.mutate(collection, |records| records.clear()).await
    }

    // ===== Internals =====

    fn collection(&self, name: &str) -> Result<&RwLock<Collection>, StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        self.collections
            .get(name)
            .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
    }

    /// Apply `change` to a copy of the collection, persist the copy, then
    /// swap it in. Writers to the same collection are serialized.
    async fn mutate<F>(&self, name: &str, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Collection),
    {
        let lock = self.collection(name)?;
        let mut current = lock.write().await;
        let mut next = current.clone();
        change(&mut next);

        let bytes = serde_json::to_vec_pretty(&next)?;
        write_atomic(&collection_path(&self.dir, name), &bytes)
            .await
            .map_err(|source| StoreError::Io {
                name: name.to_string(),
                source,
            })?;

        *current = next;
        Ok(())
    }

    async fn create_collection_file(dir: &Path, name: &str) -> Result<(), StoreError> {
        let path = collection_path(dir, name);
        // A previous interrupted migration may already have created it.
        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::unavailable(&path, e))?
        {
            return Ok(());
        }
        let bytes = serde_json::to_vec_pretty(&Collection::new())?;
        write_atomic(&path, &bytes)
            .await
            .map_err(|e| StoreError::unavailable(&path, e))
    }

    async fn load_collection(dir: &Path, name: &str) -> Result<Collection, StoreError> {
        let path = collection_path(dir, name);
        let contents = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(collection = name, "Collection file missing, starting empty");
                return Ok(Collection::new());
            }
            Err(e) => return Err(StoreError::unavailable(&path, e)),
        };
        serde_json::from_slice(&contents).map_err(|source| StoreError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    async fn discard_interrupted_writes(dir: &Path) -> Result<(), StoreError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| StoreError::unavailable(dir, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::unavailable(dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(TEMP_EXTENSION) {
                warn!(file = %path.display(), "Discarding interrupted write");
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!(file = %path.display(), error = %e, "Failed to remove temp file");
                }
            }
        }
        Ok(())
    }
}

fn collection_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

fn decode<T: DeserializeOwned>(collection: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
        name: collection.to_string(),
        source,
    })
}

/// Write `bytes` next to `path`, flush to disk, then rename over `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension(format!("json.{}", TEMP_EXTENSION));
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(&tmp, path).await
}
