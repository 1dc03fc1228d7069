//! Web search, scrape, and crawl tools over the Firecrawl gateway.

use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use crate::web::firecrawl::FirecrawlClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_SEARCH_LIMIT: u64 = 5;
const DEFAULT_CRAWL_LIMIT: u64 = 10;

fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    match args.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AppError::Validation(format!("{} is required", key))),
    }
}

fn limit_arg(args: &Value, default: u64) -> u64 {
    args.get("limit").and_then(Value::as_u64).unwrap_or(default)
}

/// Web search via the Firecrawl search endpoint.
pub struct WebSearchTool {
    client: Arc<FirecrawlClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web using Firecrawl's search API."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query string"
                },
                "limit": {
                    "type": "integer",
                    "description": "Max number of results to return",
                    "default": DEFAULT_SEARCH_LIMIT
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let query = require_str(&args, "query")?;
        let limit = limit_arg(&args, DEFAULT_SEARCH_LIMIT);
        let results = self.client.search(query, limit).await?;
        Ok(json!({ "results": results }))
    }
}

/// Single-page scrape via the Firecrawl scrape endpoint.
pub struct WebScrapeTool {
    client: Arc<FirecrawlClient>,
}

impl WebScrapeTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebScrapeTool {
    fn name(&self) -> &str {
        "web_scrape"
    }

    fn description(&self) -> &str {
        "Scrape a single URL using Firecrawl."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Absolute URL to scrape"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let url = require_str(&args, "url")?;
        let content = self.client.scrape(url).await?;
        Ok(json!({ "content": content }))
    }
}

/// Bounded site crawl via the Firecrawl crawl endpoint.
pub struct WebCrawlTool {
    client: Arc<FirecrawlClient>,
}

impl WebCrawlTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebCrawlTool {
    fn name(&self) -> &str {
        "web_crawl"
    }

    fn description(&self) -> &str {
        "Crawl a website starting from start_url using Firecrawl (limited pages)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "start_url": {
                    "type": "string",
                    "description": "Starting URL to crawl"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of pages to crawl",
                    "default": DEFAULT_CRAWL_LIMIT
                }
            },
            "required": ["start_url"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let start_url = require_str(&args, "start_url")?;
        let limit = limit_arg(&args, DEFAULT_CRAWL_LIMIT);
        let crawl = self.client.crawl(start_url, limit).await?;
        Ok(json!({ "crawl": crawl }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirecrawlConfig;

    fn unkeyed_client() -> Arc<FirecrawlClient> {
        Arc::new(FirecrawlClient::new(&FirecrawlConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let tool = WebSearchTool::new(unkeyed_client());
        for args in [json!({}), json!({ "query": "" })] {
            let err = tool.execute(args).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(err.message(), "query is required");
        }
    }

    #[tokio::test]
    async fn test_validation_runs_before_config_check() {
        let tool = WebSearchTool::new(unkeyed_client());
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = tool.execute(json!({ "query": "rust" })).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_scrape_requires_url() {
        let tool = WebScrapeTool::new(unkeyed_client());
        let err = tool.execute(json!({})).await.unwrap_err();
        assert_eq!(err.message(), "url is required");
    }

    #[tokio::test]
    async fn test_crawl_requires_start_url() {
        let tool = WebCrawlTool::new(unkeyed_client());
        let err = tool.execute(json!({ "limit": 3 })).await.unwrap_err();
        assert_eq!(err.message(), "start_url is required");
    }

    #[test]
    fn test_tool_definitions() {
        let client = unkeyed_client();
        for tool in [
            Box::new(WebSearchTool::new(client.clone())) as Box<dyn Tool>,
            Box::new(WebScrapeTool::new(client.clone())),
            Box::new(WebCrawlTool::new(client)),
        ] {
            assert!(!tool.name().is_empty());
            assert!(!tool.description().is_empty());
            assert!(tool.parameters_schema().get("properties").is_some());
        }
    }
}
