//! # Satchel - Ferrous Labs MCP Tool Server
//!
//! An MCP (Model Context Protocol) server exposing a safe math expression
//! evaluator, arbitrary-precision arithmetic tools, Firecrawl-backed web
//! search/scrape/crawl, Open-Meteo weather lookups, and Ferrous Labs team
//! info tools.
//!
//! ## Overview
//!
//! Satchel can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `satchel-server` binary
//! 2. **As a library** - Import the tool registry into your own Rust project
//!
//! Every tool resolves to the same response envelope:
//!
//! ```json
//! {"ok": true, "data": {"result": 5}, "error": null, "meta": {}}
//! ```
//!
//! with exactly one of `data`/`error` non-null. Tool-level failures (bad
//! input, math domain errors, gateway failures, missing credentials) live
//! inside the envelope under a stable error code vocabulary; they never
//! become protocol-level errors.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use satchel::{Config, ToolRegistry};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ToolRegistry::with_default_tools(&Config::from_env());
//!
//!     let envelope = registry.dispatch("calculate", json!({
//!         "expression": "sqrt(16) + 2**10"
//!     })).await;
//!
//!     assert!(envelope.ok);
//! }
//! ```
//!
//! ### Serving MCP
//!
//! ```rust,ignore
//! use satchel::{Config, ToolRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ToolRegistry::with_default_tools(&Config::from_env()));
//! satchel::mcp::start_stdio_server(registry).await?;
//! ```
//!
//! ## Modules
//!
//! - [`math`] - Exact bignum arithmetic and the expression evaluator
//! - [`web`] - Firecrawl content gateway (search, scrape, crawl)
//! - [`weather`] - Open-Meteo geocoding and current conditions
//! - [`team`] - Ferrous Labs directory and About-page snippets
//! - [`tools`] - Tool trait, registry, and the dispatch boundary
//! - [`envelope`] - The uniform response envelope and error codes
//! - [`mcp`] - MCP protocol binding over stdio
//! - [`cli`] - Command-line interface
//! - [`types`] - Common types and error handling
//!
//! ## Numbers
//!
//! Arithmetic tools keep integers exact at any size (results beyond 64-bit
//! range are serialized as decimal strings). In the expression evaluator
//! `/` always yields a float, `//` and `%` use floored division with the
//! remainder taking the divisor's sign, and `**` stays exact for integer
//! operands.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface parsing and output helpers.
pub mod cli;
/// Environment-based configuration.
pub mod config;
/// Uniform response envelope and error codes.
pub mod envelope;
/// Exact numeric tower and the math tools.
pub mod math;
/// Model Context Protocol (MCP) server binding.
pub mod mcp;
/// Company directory tools.
pub mod team;
/// Tool trait, registry, and dispatch.
pub mod tools;
/// Core types and error handling.
pub mod types;
/// Open-Meteo weather tools.
pub mod weather;
/// Firecrawl content gateway tools.
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use envelope::{Envelope, ErrorBody, ErrorCode};
pub use tools::registry::{Tool, ToolRegistry};
pub use types::{AppError, Result};
