//! Tool Infrastructure
//!
//! This module provides the registry that tool implementations plug into
//! and the dispatch boundary that folds every outcome into a response
//! envelope.
//!
//! # Module Structure
//!
//! - [`registry`](crate::tools::registry) - Tool registration, discovery, and dispatch
//!
//! # Dispatch
//!
//! The [`registry`](crate::tools::registry) module manages tool discovery and execution:
//! ```ignore
//! let registry = ToolRegistry::with_default_tools(&Config::from_env());
//! let tools = registry.get_tool_definitions();  // Get available tool schemas
//! let envelope = registry.dispatch("add", json!({"a": 2, "b": 3})).await;
//! ```
//!
//! Dispatch never fails at the call level. Unknown tools, handler errors,
//! and handler panics all come back as error envelopes with a stable code,
//! so transports can forward the result verbatim.

/// Tool registry for managing available tools.
pub mod registry;

pub use registry::{Tool, ToolRegistry};
