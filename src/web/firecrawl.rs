//! Firecrawl API gateway.
//!
//! One client per process, shared across tools. All calls are bearer-token
//! authenticated POSTs; the API key is checked lazily so that tools can
//! report a configuration error instead of failing at startup.

use crate::config::FirecrawlConfig;
use crate::types::{AppError, Result};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(60);
const CRAWL_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the Firecrawl search/scrape/crawl endpoints.
pub struct FirecrawlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirecrawlClient {
    pub fn new(config: &FirecrawlConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("FIRECRAWL_API_KEY env not set".to_string()))
    }

    async fn post(&self, path: &str, payload: &Value, timeout: Duration) -> Result<Value> {
        let key = self.key()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("Firecrawl POST {}", path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(payload)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Firecrawl request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Firecrawl {} returned {}", path, status);
            return Err(AppError::Http(format!(
                "Firecrawl request failed ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Http(format!("Failed to parse Firecrawl response: {}", e)))
    }

    /// Search the web. Returns the raw response body.
    pub async fn search(&self, query: &str, limit: u64) -> Result<Value> {
        let payload = json!({ "query": query, "limit": limit });
        self.post("/v1/search", &payload, SEARCH_TIMEOUT).await
    }

    /// Scrape a single page as main-content markdown. Returns the raw
    /// response body.
    pub async fn scrape(&self, url: &str) -> Result<Value> {
        let payload = json!({
            "url": url,
            "formats": ["markdown"],
            "onlyMainContent": true
        });
        self.post("/v1/scrape", &payload, SCRAPE_TIMEOUT).await
    }

    /// Start a bounded crawl from `start_url`. Returns the raw response
    /// body.
    pub async fn crawl(&self, start_url: &str, limit: u64) -> Result<Value> {
        let payload = json!({
            "url": start_url,
            "limit": limit,
            "scrapeOptions": { "formats": ["markdown"], "onlyMainContent": true }
        });
        self.post("/v1/crawl", &payload, CRAWL_TIMEOUT).await
    }
}
