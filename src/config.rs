//! Environment-based configuration.
//!
//! Read once at startup; a `.env` file in the working directory is honored.
//! A missing gateway credential is not an error here. Tools that need it
//! degrade to `CONFIG_ERROR` envelopes per call instead of the process
//! refusing to start.

use serde::Deserialize;
use std::env;

/// Default Firecrawl API endpoint.
pub const DEFAULT_FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev";
/// Default Open-Meteo geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
/// Default Open-Meteo forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Content gateway (search/scrape/crawl) settings.
    pub firecrawl: FirecrawlConfig,
    /// Weather API settings.
    pub weather: WeatherConfig,
}

/// Firecrawl gateway settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FirecrawlConfig {
    /// Bearer token; `None` degrades dependent tools to `CONFIG_ERROR`.
    pub api_key: Option<String>,
    /// Base URL, overridable for tests.
    pub base_url: String,
}

/// Open-Meteo settings. Both endpoints are keyless.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding search endpoint.
    pub geocode_url: String,
    /// Current-conditions forecast endpoint.
    pub forecast_url: String,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_FIRECRAWL_BASE_URL.to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firecrawl: FirecrawlConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            firecrawl: FirecrawlConfig {
                api_key: env::var("FIRECRAWL_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: env::var("FIRECRAWL_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_FIRECRAWL_BASE_URL.to_string()),
            },
            weather: WeatherConfig {
                geocode_url: env::var("OPEN_METEO_GEOCODE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEOCODE_URL.to_string()),
                forecast_url: env::var("OPEN_METEO_FORECAST_URL")
                    .unwrap_or_else(|_| DEFAULT_FORECAST_URL.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_public_endpoints() {
        let config = Config::default();
        assert!(config.firecrawl.api_key.is_none());
        assert_eq!(config.firecrawl.base_url, "https://api.firecrawl.dev");
        assert!(config.weather.geocode_url.contains("geocoding-api.open-meteo.com"));
        assert!(config.weather.forecast_url.contains("api.open-meteo.com"));
    }
}
