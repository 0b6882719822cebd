//! HTTP client for the remote catalog functions.
//!
//! Creatures are served page by page from `getGen1Pokemon`; items come back
//! in one response from `getGen1Items`, which reports no page count.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::models::{CatalogKind, CreaturePageResponse, ItemPageResponse};

use super::{ApiError, CatalogPage, RemoteCatalogClient};

/// Default base URL (local functions dev server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/.netlify/functions";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Catalog client over HTTP.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(kind: CatalogKind) -> &'static str {
        match kind {
            CatalogKind::Creatures => "getGen1Pokemon",
            CatalogKind::Items => "getGen1Items",
        }
    }

    fn page_url(&self, kind: CatalogKind, page: u32, limit: u32) -> String {
        format!(
            "{}/{}?page={}&limit={}",
            self.base_url,
            Self::endpoint(kind),
            page,
            limit
        )
    }

    /// Decode a page body. Records live under `pokemon` or `items`.
    pub fn parse_page(kind: CatalogKind, body: &str) -> Result<CatalogPage, ApiError> {
        let invalid = |e: serde_json::Error| {
            ApiError::InvalidResponse(format!("Failed to parse {} page: {}", kind, e))
        };
        match kind {
            CatalogKind::Creatures => {
                let parsed: CreaturePageResponse = serde_json::from_str(body).map_err(invalid)?;
                Ok(CatalogPage {
                    entries: parsed.pokemon.iter().map(|c| c.to_entry()).collect(),
                    pages: parsed.pages,
                    total: parsed.total,
                })
            }
            CatalogKind::Items => {
                let parsed: ItemPageResponse = serde_json::from_str(body).map_err(invalid)?;
                Ok(CatalogPage {
                    entries: parsed.items.iter().map(|i| i.to_entry()).collect(),
                    pages: parsed.pages,
                    total: parsed.total,
                })
            }
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

impl RemoteCatalogClient for HttpCatalogClient {
    async fn fetch_page(
        &self,
        kind: CatalogKind,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, ApiError> {
        let url = self.page_url(kind, page, limit);
        debug!(url = %url, "Fetching catalog page");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        Self::parse_page(kind, &body)
    }
}
