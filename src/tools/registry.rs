use crate::config::Config;
use crate::envelope::{Envelope, ErrorCode};
use crate::math::tools::{
    AddTool, CalculateTool, CosTool, DivideTool, FactorialTool, LogTool, MultiplyTool, PowerTool,
    SinTool, SqrtTool, SubtractTool, TanTool,
};
use crate::team::tools::{AboutPageTool, CeoInfoTool, CtoInfoTool, GreetTool, TeamInfoTool};
use crate::types::{Result, ToolDefinition};
use crate::weather::openmeteo::WeatherClient;
use crate::weather::tools::{CurrentTimeTool, WeatherByCityTool, WeatherByCoordsTool};
use crate::web::firecrawl::FirecrawlClient;
use crate::web::tools::{WebCrawlTool, WebScrapeTool, WebSearchTool};
use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<Value>;
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the full tool set (arithmetic, expression
    /// calculator, content gateway, weather, directory)
    pub fn with_default_tools(config: &Config) -> Self {
        let mut registry = Self::new();

        // Register arithmetic and expression tools
        registry.register(Arc::new(CalculateTool));
        registry.register(Arc::new(AddTool));
        registry.register(Arc::new(SubtractTool));
        registry.register(Arc::new(MultiplyTool));
        registry.register(Arc::new(DivideTool));
        registry.register(Arc::new(PowerTool));
        registry.register(Arc::new(SqrtTool));
        registry.register(Arc::new(FactorialTool));
        registry.register(Arc::new(LogTool));
        registry.register(Arc::new(SinTool));
        registry.register(Arc::new(CosTool));
        registry.register(Arc::new(TanTool));

        // Content gateway tools share one Firecrawl client
        let firecrawl = Arc::new(FirecrawlClient::new(&config.firecrawl));
        registry.register(Arc::new(WebSearchTool::new(firecrawl.clone())));
        registry.register(Arc::new(WebScrapeTool::new(firecrawl.clone())));
        registry.register(Arc::new(WebCrawlTool::new(firecrawl.clone())));

        // Weather tools share one Open-Meteo client
        let weather = Arc::new(WeatherClient::new(&config.weather));
        registry.register(Arc::new(CurrentTimeTool));
        registry.register(Arc::new(WeatherByCityTool::new(weather.clone())));
        registry.register(Arc::new(WeatherByCoordsTool::new(weather)));

        // Directory tools reuse the Firecrawl client for About-page scrapes
        registry.register(Arc::new(AboutPageTool::new(firecrawl.clone())));
        registry.register(Arc::new(CeoInfoTool::new(firecrawl.clone())));
        registry.register(Arc::new(CtoInfoTool::new(firecrawl.clone())));
        registry.register(Arc::new(TeamInfoTool::new(firecrawl)));
        registry.register(Arc::new(GreetTool));

        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        if let Some(tool) = self.tools.get(name) {
            tool.execute(args).await
        } else {
            Err(crate::types::AppError::NotFound(format!(
                "Tool not found: {}",
                name
            )))
        }
    }

    /// Run a tool and fold the outcome into a response envelope.
    ///
    /// This is the single success/error boundary: unknown names, handler
    /// errors, and handler panics all come back as error envelopes, so a
    /// caller never sees a transport-level failure for a tool-level one.
    pub async fn dispatch(&self, name: &str, args: Value) -> Envelope {
        let tool = match self.tools.get(name) {
            Some(tool) => tool,
            None => {
                return Envelope::err(format!("Tool not found: {}", name), ErrorCode::NotFound)
            }
        };

        debug!("Dispatching tool: {}", name);
        match AssertUnwindSafe(tool.execute(args)).catch_unwind().await {
            Ok(Ok(data)) => Envelope::ok(data),
            Ok(Err(err)) => {
                debug!("Tool '{}' returned error: {}", name, err);
                Envelope::from_error(&err)
            }
            Err(panic) => {
                error!("Tool '{}' panicked: {}", name, panic_message(panic.as_ref()));
                Envelope::err(
                    format!("Tool '{}' failed unexpectedly", name),
                    ErrorCode::InternalError,
                )
            }
        }
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names().len(), 0);
    }

    #[test]
    fn test_registry_with_default_tools() {
        let registry = ToolRegistry::with_default_tools(&Config::default());
        let tools = registry.tool_names();

        assert_eq!(tools.len(), 23);
        for name in [
            "calculate",
            "add",
            "divide",
            "factorial",
            "web_search",
            "web_crawl",
            "current_time",
            "weather_by_city",
            "about_page",
            "team_info",
            "greet",
        ] {
            assert!(registry.has_tool(name), "missing tool {}", name);
        }
    }

    #[test]
    fn test_get_tool_definitions() {
        let registry = ToolRegistry::with_default_tools(&Config::default());
        let definitions = registry.get_tool_definitions();

        assert_eq!(definitions.len(), 23);

        // Verify each definition has required fields
        for def in &definitions {
            assert!(!def.name.is_empty());
            assert!(!def.description.is_empty());
            assert!(def.parameters.is_object());
        }
    }

    #[tokio::test]
    async fn test_execute_add() {
        let registry = ToolRegistry::with_default_tools(&Config::default());

        let result = registry
            .execute("add", json!({ "a": 5, "b": 3 }))
            .await
            .unwrap();
        assert_eq!(result["result"], json!(8));
    }

    #[tokio::test]
    async fn test_nonexistent_tool() {
        let registry = ToolRegistry::with_default_tools(&Config::default());

        let result = registry.execute("nonexistent_tool", json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_wraps_success() {
        let registry = ToolRegistry::with_default_tools(&Config::default());

        let envelope = registry.dispatch("add", json!({ "a": 2, "b": 3 })).await;
        assert!(envelope.ok);
        assert_eq!(envelope.data, Some(json!({ "result": 5 })));
        assert!(envelope.error.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = ToolRegistry::new();

        let envelope = registry.dispatch("nope", json!({})).await;
        assert_eq!(envelope.error_code(), Some(ErrorCode::NotFound));
        assert_eq!(
            envelope.error.unwrap().message,
            "Tool not found: nope"
        );
    }

    #[tokio::test]
    async fn test_dispatch_maps_handler_errors() {
        let registry = ToolRegistry::with_default_tools(&Config::default());

        let envelope = registry.dispatch("divide", json!({ "a": 1, "b": 0 })).await;
        assert_eq!(envelope.error_code(), Some(ErrorCode::MathError));
        assert_eq!(
            envelope.error.unwrap().message,
            "Division by zero is not allowed"
        );
    }

    struct PanickingTool;

    #[async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str {
            "panicky"
        }

        fn description(&self) -> &str {
            "always panics"
        }

        fn parameters_schema(&self) -> Value {
            json!({ "type": "object" })
        }

        async fn execute(&self, _args: Value) -> Result<Value> {
            panic!("boom")
        }
    }

    #[tokio::test]
    async fn test_dispatch_contains_panics() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanickingTool));

        let envelope = registry.dispatch("panicky", json!({})).await;
        assert_eq!(envelope.error_code(), Some(ErrorCode::InternalError));
        assert_eq!(
            envelope.error.unwrap().message,
            "Tool 'panicky' failed unexpectedly"
        );
    }
}
