//! Directory tools: About page, person lookups, and the hello tool.

use crate::team::directory::{
    self, extract_person_snippet, fetch_about_markdown, Person, ABOUT_URL,
};
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use crate::web::firecrawl::FirecrawlClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

fn no_args_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Scrapes the company About page and returns its markdown.
pub struct AboutPageTool {
    client: Arc<FirecrawlClient>,
}

impl AboutPageTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for AboutPageTool {
    fn name(&self) -> &str {
        "about_page"
    }

    fn description(&self) -> &str {
        "Crawl/scrape the Ferrous Labs About page and return markdown content."
    }

    fn parameters_schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        let data = self.client.scrape(ABOUT_URL).await?;
        Ok(json!({
            "url": ABOUT_URL,
            "markdown": directory::markdown_value(&data),
        }))
    }
}

async fn person_info(client: &FirecrawlClient, person: &Person) -> Value {
    match fetch_about_markdown(client).await {
        Ok(md) => person.enriched(extract_person_snippet(&md, person.name)),
        Err(err) => {
            warn!("About page fetch failed: {}", err);
            person.record()
        }
    }
}

/// Returns the CEO record, enriched with an About-page snippet when possible.
pub struct CeoInfoTool {
    client: Arc<FirecrawlClient>,
}

impl CeoInfoTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CeoInfoTool {
    fn name(&self) -> &str {
        "ceo_info"
    }

    fn description(&self) -> &str {
        "Return hardcoded info for Iris Navarro and include About page snippet."
    }

    fn parameters_schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        Ok(person_info(&self.client, &directory::CEO).await)
    }
}

/// Returns the CTO record, enriched with an About-page snippet when possible.
pub struct CtoInfoTool {
    client: Arc<FirecrawlClient>,
}

impl CtoInfoTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CtoInfoTool {
    fn name(&self) -> &str {
        "cto_info"
    }

    fn description(&self) -> &str {
        "Return hardcoded info for Elif Demir and include About page snippet."
    }

    fn parameters_schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        Ok(person_info(&self.client, &directory::CTO).await)
    }
}

/// Combined directory listing backed by a single About-page scrape.
///
/// Unlike the per-person tools this one treats a failed scrape as an
/// error, since its whole payload depends on the page.
pub struct TeamInfoTool {
    client: Arc<FirecrawlClient>,
}

impl TeamInfoTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TeamInfoTool {
    fn name(&self) -> &str {
        "team_info"
    }

    fn description(&self) -> &str {
        "Return combined info for Iris Navarro and Elif Demir from the About page."
    }

    fn parameters_schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        let md = fetch_about_markdown(&self.client).await?;
        let ceo = &directory::CEO;
        let cto = &directory::CTO;
        Ok(json!({
            "source_url": ABOUT_URL,
            "ceo": ceo.enriched(extract_person_snippet(&md, ceo.name)),
            "cto": cto.enriched(extract_person_snippet(&md, cto.name)),
        }))
    }
}

/// Builds a hello message for a name.
pub struct GreetTool;

#[async_trait]
impl Tool for GreetTool {
    fn name(&self) -> &str {
        "greet"
    }

    fn description(&self) -> &str {
        "Show a hello message"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name to greet"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let name = args
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?;
        Ok(json!({ "result": format!("Hello, {}!", name) }))
    }
}

// ============= Tests =============
