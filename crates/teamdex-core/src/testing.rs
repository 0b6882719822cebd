//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::api::{ApiError, CatalogPage, RemoteCatalogClient};
use crate::models::{
    CatalogEntry, CatalogKind, CreaturePayload, EntityKind, ItemCategory, ItemPayload, StatBlock,
};
use crate::store::{collections, LocalStore, SCHEMA_VERSION};

pub const MOVEPOOL: [&str; 6] = [
    "tackle",
    "growl",
    "vine-whip",
    "razor-leaf",
    "sleep-powder",
    "solar-beam",
];

pub fn creature(id: i64, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        entity: EntityKind::Creature(CreaturePayload {
            types: vec!["grass".to_string()],
            base_stats: StatBlock {
                hp: 100,
                attack: 100,
                defense: 100,
                special: 100,
                speed: 100,
            },
            movepool: MOVEPOOL.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }),
    }
}

pub fn item(id: i64, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        entity: EntityKind::Item(ItemPayload {
            category: ItemCategory::Healing,
            cost: 300,
            effect: "Restores 20 HP.".to_string(),
            sprite: None,
            heal_amount: Some(20),
            usable_in_battle: true,
            generation: 1,
        }),
    }
}

pub async fn open_store() -> (TempDir, Arc<LocalStore>) {
    let dir = TempDir::new().expect("temp dir");
    let store = LocalStore::open_or_create(dir.path(), SCHEMA_VERSION, collections::ALL)
        .await
        .expect("open store");
    (dir, Arc::new(store))
}

/// In-memory remote catalog that records every page request.
pub struct FakeCatalogClient {
    kind: CatalogKind,
    pages: Vec<Vec<CatalogEntry>>,
    report_pages: bool,
    requests: Mutex<Vec<u32>>,
    fail_on: Mutex<Option<u32>>,
}

impl FakeCatalogClient {
    pub fn paged(kind: CatalogKind, pages: Vec<Vec<CatalogEntry>>) -> Self {
        Self {
            kind,
            pages,
            report_pages: true,
            requests: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    /// Serves everything in one response with no page count.
    pub fn unpaged(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self {
            report_pages: false,
            ..Self::paged(kind, vec![entries])
        }
    }

    pub fn fail_on_page(&self, page: u32) {
        *self.fail_on.lock().expect("fail_on lock") = Some(page);
    }

    pub fn clear_failure(&self) {
        *self.fail_on.lock().expect("fail_on lock") = None;
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl RemoteCatalogClient for FakeCatalogClient {
    async fn fetch_page(
        &self,
        kind: CatalogKind,
        page: u32,
        _limit: u32,
    ) -> Result<CatalogPage, ApiError> {
        assert_eq!(kind, self.kind, "fake serves a single kind");
        self.requests.lock().expect("requests lock").push(page);

        if *self.fail_on.lock().expect("fail_on lock") == Some(page) {
            return Err(ApiError::ServerError("simulated outage".to_string()));
        }

        let entries = self
            .pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();
        Ok(CatalogPage {
            total: Some(self.pages.iter().map(|p| p.len() as u64).sum()),
            pages: self.report_pages.then_some(self.pages.len() as u32),
            entries,
        })
    }
}
