//! Core types shared across the crate: the error enum, the crate-wide
//! `Result` alias, and the tool definition record.

use serde::{Deserialize, Serialize};

// ============= Tool Types =============

/// A tool's advertised interface: name, description, and JSON Schema for
/// its parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    /// Unique tool name used for dispatch.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema object describing the accepted arguments.
    pub parameters: serde_json::Value,
}

// ============= Error Types =============

/// Crate-wide error type. Variants map 1:1 to the envelope code
/// vocabulary; the payload is the message surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input, rejected before any computation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Domain violation during a well-formed computation.
    #[error("Math error: {0}")]
    Math(String),

    /// Outbound request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Required credential or setting absent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unanticipated failure, caught as a last resort.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The bare message without the variant prefix, as surfaced in error
    /// envelopes. `Display` keeps the prefix for logs.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Math(msg)
            | AppError::Http(msg)
            | AppError::Config(msg)
            | AppError::NotFound(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_variant_prefix() {
        let err = AppError::Math("Division by zero is not allowed".to_string());
        assert_eq!(err.to_string(), "Math error: Division by zero is not allowed");
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::Validation("query is required".to_string());
        assert_eq!(err.message(), "query is required");

        let err = AppError::Config("FIRECRAWL_API_KEY env not set".to_string());
        assert_eq!(err.message(), "FIRECRAWL_API_KEY env not set");
    }

    #[test]
    fn test_tool_definition_serializes() {
        let def = ToolDefinition {
            name: "add".to_string(),
            description: "Add two numbers".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["name"], "add");
        assert_eq!(value["parameters"]["type"], "object");
    }
}
