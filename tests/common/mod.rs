//! Shared helpers for integration tests.
//!
//! Builds registries whose gateway clients point at a wiremock server and
//! provides envelope accessors that assert the wire invariants on every
//! unwrap.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use satchel::config::{Config, FirecrawlConfig, WeatherConfig};
use satchel::envelope::{Envelope, ErrorCode};
use satchel::tools::ToolRegistry;
use serde_json::Value;

/// Registry with every gateway client pointed at `base_uri`.
pub fn registry_for(base_uri: &str, api_key: Option<&str>) -> ToolRegistry {
    let config = Config {
        firecrawl: FirecrawlConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_uri.to_string(),
        },
        weather: WeatherConfig {
            geocode_url: format!("{}/v1/search", base_uri),
            forecast_url: format!("{}/v1/forecast", base_uri),
        },
    };
    ToolRegistry::with_default_tools(&config)
}

/// Registry with gateway clients pointed at unroutable endpoints.
pub fn offline_registry(api_key: Option<&str>) -> ToolRegistry {
    registry_for("http://127.0.0.1:9", api_key)
}

/// Unwrap a success envelope, asserting the wire invariants.
pub fn expect_data(envelope: Envelope) -> Value {
    assert!(
        envelope.ok,
        "expected success envelope, got error: {:?}",
        envelope.error
    );
    assert!(envelope.error.is_none());
    assert!(envelope.meta.is_empty());
    envelope.data.expect("success envelope carries data")
}

/// Unwrap an error envelope, asserting the wire invariants.
pub fn expect_error(envelope: Envelope) -> (String, ErrorCode) {
    assert!(!envelope.ok, "expected error envelope, got: {:?}", envelope.data);
    assert!(envelope.data.is_none());
    assert!(envelope.meta.is_empty());
    let body = envelope.error.expect("error envelope carries a body");
    (body.message, body.code)
}
