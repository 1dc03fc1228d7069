//! Uniform response envelope returned by every tool.
//!
//! Every tool call resolves to `{ok, data, error, meta}` with exactly one
//! of `data`/`error` non-null. `data` and `error` are serialized as
//! explicit `null` when absent so the wire shape is stable. `meta` is
//! reserved for future diagnostic fields and is currently always empty.

use crate::types::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Fixed error code vocabulary carried in error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or missing input, caught before any computation.
    ValidationError,
    /// Domain violation during a well-formed computation.
    MathError,
    /// Outbound request failed or returned an error status.
    HttpError,
    /// Required credential absent.
    ConfigError,
    /// Named resource (tool, geocoded city) does not exist.
    NotFound,
    /// Unanticipated failure, caught as a last resort.
    InternalError,
}

impl ErrorCode {
    /// The wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::MathError => "MATH_ERROR",
            ErrorCode::HttpError => "HTTP_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl From<&AppError> for ErrorCode {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Math(_) => ErrorCode::MathError,
            AppError::Http(_) => ErrorCode::HttpError,
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// The `error` record of a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
    /// Member of the fixed code vocabulary.
    pub code: ErrorCode,
}

/// The uniform success/error wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// True iff the operation completed without a handled error.
    pub ok: bool,
    /// Present iff `ok`; always a mapping.
    pub data: Option<Value>,
    /// Present iff not `ok`.
    pub error: Option<ErrorBody>,
    /// Reserved for future diagnostic fields.
    pub meta: Map<String, Value>,
}

impl Envelope {
    /// Success envelope wrapping arbitrary response data.
    pub fn ok(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            meta: Map::new(),
        }
    }

    /// Success envelope wrapping a single value under the `result` key.
    pub fn result(value: Value) -> Self {
        Self::ok(json!({ "result": value }))
    }

    /// Error envelope from a message and code.
    pub fn err(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
                code,
            }),
            meta: Map::new(),
        }
    }

    /// Error envelope from an [`AppError`], mapping the variant to its code.
    pub fn from_error(err: &AppError) -> Self {
        Self::err(err.message(), ErrorCode::from(err))
    }

    /// The error code, if this is an error envelope.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }
}
