use crate::math::number::Operand;
use crate::tools::ToolRegistry;
use crate::types::AppError;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Parameters for the expression calculator
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CalculateParams {
    /// Expression to evaluate, e.g. "sqrt(16) + 2**10"
    pub expression: String,
}

/// Parameters for two-operand arithmetic
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PairParams {
    /// First operand (number or numeric string)
    pub a: Operand,
    /// Second operand (number or numeric string)
    pub b: Operand,
}

/// Parameters for exponentiation
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PowerParams {
    /// Base (number or numeric string)
    pub base: Operand,
    /// Exponent (number or numeric string)
    pub exponent: Operand,
}

/// Parameters for square root
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SqrtParams {
    /// Value to take the square root of
    pub value: Operand,
}

/// Parameters for factorial
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct FactorialParams {
    /// Non-negative integer
    pub n: Operand,
}

/// Parameters for logarithm
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LogParams {
    /// Value to take the logarithm of
    pub value: Operand,
    /// Optional base; natural log when omitted (the string "e" is accepted)
    pub base: Option<Operand>,
}

/// Parameters for trigonometric functions
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TrigParams {
    /// Angle value
    pub angle: Operand,
    /// "radians" (default) or "degrees"
    pub unit: Option<String>,
}

/// Parameters for web search
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchParams {
    /// The search query
    pub query: String,
    /// Maximum number of results to return
    pub limit: Option<u64>,
}

/// Parameters for scraping a single page
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ScrapeParams {
    /// URL of the page to scrape
    pub url: String,
}

/// Parameters for a site crawl
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CrawlParams {
    /// URL the crawl starts from
    pub start_url: String,
    /// Maximum number of pages to crawl
    pub limit: Option<u64>,
}

/// Parameters for the clock tool
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TimeParams {
    /// IANA timezone name to echo back, e.g. "Europe/London"
    pub tz: Option<String>,
}

/// Parameters for weather by city name
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityParams {
    /// City name, e.g. "Berlin"
    pub city: String,
}

/// Parameters for weather by coordinates
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordsParams {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Parameters for the hello tool
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GreetParams {
    /// Name to greet
    pub name: String,
}

fn to_args<T: Serialize>(params: T) -> Result<Value, McpError> {
    serde_json::to_value(params).map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// MCP server exposing the full Ferrous Labs tool suite
#[derive(Clone)]
pub struct SatchelMcpServer {
    registry: Arc<ToolRegistry>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SatchelMcpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            tool_router: Self::tool_router(),
        }
    }

    /// Dispatch through the registry and return the envelope as text content.
    async fn call(&self, name: &str, args: Value) -> Result<CallToolResult, McpError> {
        let envelope = self.registry.dispatch(name, args).await;
        let text = serde_json::to_string(&envelope)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Evaluate any mathematical expression. Supports all standard operations, functions (sin, cos, log, sqrt, etc.), and constants (pi, e). Handles integers, floats, and large numbers."
    )]
    async fn calculate(
        &self,
        params: Parameters<CalculateParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("calculate", to_args(params.0)?).await
    }

    #[tool(description = "Add two numbers. Supports any numeric value regardless of size.")]
    async fn add(&self, params: Parameters<PairParams>) -> Result<CallToolResult, McpError> {
        self.call("add", to_args(params.0)?).await
    }

    #[tool(description = "Subtract two numbers. Supports any numeric value regardless of size.")]
    async fn subtract(&self, params: Parameters<PairParams>) -> Result<CallToolResult, McpError> {
        self.call("subtract", to_args(params.0)?).await
    }

    #[tool(description = "Multiply two numbers. Supports any numeric value regardless of size.")]
    async fn multiply(&self, params: Parameters<PairParams>) -> Result<CallToolResult, McpError> {
        self.call("multiply", to_args(params.0)?).await
    }

    #[tool(description = "Divide two numbers. Supports any numeric value regardless of size.")]
    async fn divide(&self, params: Parameters<PairParams>) -> Result<CallToolResult, McpError> {
        self.call("divide", to_args(params.0)?).await
    }

    #[tool(description = "Raise base to the power of exponent. Supports any numeric value.")]
    async fn power(&self, params: Parameters<PowerParams>) -> Result<CallToolResult, McpError> {
        self.call("power", to_args(params.0)?).await
    }

    #[tool(description = "Calculate square root. Supports any positive numeric value.")]
    async fn sqrt(&self, params: Parameters<SqrtParams>) -> Result<CallToolResult, McpError> {
        self.call("sqrt", to_args(params.0)?).await
    }

    #[tool(
        description = "Calculate factorial of a non-negative integer. Supports large integers."
    )]
    async fn factorial(
        &self,
        params: Parameters<FactorialParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("factorial", to_args(params.0)?).await
    }

    #[tool(description = "Calculate logarithm. Default is natural log (base e).")]
    async fn log(&self, params: Parameters<LogParams>) -> Result<CallToolResult, McpError> {
        self.call("log", to_args(params.0)?).await
    }

    #[tool(description = "Calculate sine. Angle can be in radians (default) or degrees.")]
    async fn sin(&self, params: Parameters<TrigParams>) -> Result<CallToolResult, McpError> {
        self.call("sin", to_args(params.0)?).await
    }

    #[tool(description = "Calculate cosine. Angle can be in radians (default) or degrees.")]
    async fn cos(&self, params: Parameters<TrigParams>) -> Result<CallToolResult, McpError> {
        self.call("cos", to_args(params.0)?).await
    }

    #[tool(description = "Calculate tangent. Angle can be in radians (default) or degrees.")]
    async fn tan(&self, params: Parameters<TrigParams>) -> Result<CallToolResult, McpError> {
        self.call("tan", to_args(params.0)?).await
    }

    #[tool(description = "Search the web using Firecrawl's search API.")]
    async fn web_search(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("web_search", to_args(params.0)?).await
    }

    #[tool(description = "Scrape a single URL using Firecrawl.")]
    async fn web_scrape(
        &self,
        params: Parameters<ScrapeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("web_scrape", to_args(params.0)?).await
    }

    #[tool(
        description = "Crawl a website starting from start_url using Firecrawl (limited pages)."
    )]
    async fn web_crawl(&self, params: Parameters<CrawlParams>) -> Result<CallToolResult, McpError> {
        self.call("web_crawl", to_args(params.0)?).await
    }

    #[tool(
        description = "Get current time. Optionally specify IANA timezone (e.g., 'UTC', 'Europe/London')."
    )]
    async fn current_time(
        &self,
        params: Parameters<TimeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("current_time", to_args(params.0)?).await
    }

    #[tool(description = "Get current weather for a city name using Open-Meteo (no API key).")]
    async fn weather_by_city(
        &self,
        params: Parameters<CityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("weather_by_city", to_args(params.0)?).await
    }

    #[tool(description = "Get current weather by coordinates (latitude, longitude).")]
    async fn weather_by_coords(
        &self,
        params: Parameters<CoordsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("weather_by_coords", to_args(params.0)?).await
    }

    #[tool(description = "Crawl/scrape the Ferrous Labs About page and return markdown content.")]
    async fn about_page(&self) -> Result<CallToolResult, McpError> {
        self.call("about_page", json!({})).await
    }

    #[tool(description = "Return hardcoded info for Iris Navarro and include About page snippet.")]
    async fn ceo_info(&self) -> Result<CallToolResult, McpError> {
        self.call("ceo_info", json!({})).await
    }

    #[tool(description = "Return hardcoded info for Elif Demir and include About page snippet.")]
    async fn cto_info(&self) -> Result<CallToolResult, McpError> {
        self.call("cto_info", json!({})).await
    }

    #[tool(
        description = "Return combined info for Iris Navarro and Elif Demir from the About page."
    )]
    async fn team_info(&self) -> Result<CallToolResult, McpError> {
        self.call("team_info", json!({})).await
    }

    #[tool(description = "Show a hello message")]
    async fn greet(&self, params: Parameters<GreetParams>) -> Result<CallToolResult, McpError> {
        self.call("greet", to_args(params.0)?).await
    }
}

#[tool_handler]
impl ServerHandler for SatchelMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "satchel-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Satchel MCP Server - math expression evaluation, arithmetic, web \
                 search/scrape/crawl, weather, and Ferrous Labs team info tools. Every \
                 tool returns a JSON envelope {ok, data, error, meta}."
                    .into(),
            ),
        }
    }
}

/// Start the MCP server with stdio transport
pub async fn start_stdio_server(registry: Arc<ToolRegistry>) -> crate::types::Result<()> {
    use rmcp::{ServiceExt, transport::io::stdio};

    let server = SatchelMcpServer::new(registry);
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| AppError::Internal(format!("MCP server error: {}", e)))?;

    info!("MCP server listening on stdio");
    service
        .waiting()
        .await
        .map_err(|e| AppError::Internal(format!("MCP server error: {}", e)))?;

    Ok(())
}
