//! MCP Protocol Binding
//!
//! Exposes the registered tool suite over the Model Context Protocol. The
//! binding is a thin shell: every call goes through the registry's dispatch
//! boundary and the serialized envelope travels back as text content, so an
//! MCP call itself only fails on protocol-level problems.
//!
//! # Module Structure
//!
//! - [`server`](crate::mcp::server) - `rmcp` server handler and the stdio entry point

pub mod server;

pub use server::{start_stdio_server, SatchelMcpServer};
