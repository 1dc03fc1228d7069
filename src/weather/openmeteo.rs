//! Open-Meteo API gateway: geocoding plus current conditions. The API is
//! keyless, so unlike the Firecrawl gateway there is no configuration
//! check before a request goes out.

use crate::config::WeatherConfig;
use crate::types::{AppError, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Current-conditions variables requested from the forecast endpoint.
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Best geocoding hit for a city name.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    /// Resolved place name as reported by the geocoder.
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Client for the Open-Meteo geocoding and forecast endpoints.
pub struct WeatherClient {
    http: reqwest::Client,
    geocode_url: String,
    forecast_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            geocode_url: config.geocode_url.clone(),
            forecast_url: config.forecast_url.clone(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!("Open-Meteo GET {}", url);
        let response = self
            .http
            .get(url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Open-Meteo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Open-Meteo request to {} returned {}", url, status);
            return Err(AppError::Http(format!(
                "Open-Meteo request failed ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Http(format!("Failed to parse Open-Meteo response: {}", e)))
    }

    /// Best match for a city name, or `None` when the geocoder has no
    /// results for it.
    pub async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>> {
        let query = [
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let data = self.get_json(&self.geocode_url, &query).await?;
        let first = data
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .cloned();
        match first {
            Some(hit) => serde_json::from_value(hit)
                .map(Some)
                .map_err(|e| AppError::Http(format!("Malformed geocoding result: {}", e))),
            None => Ok(None),
        }
    }

    /// The `current` object from the forecast response for a coordinate
    /// pair; an empty object when the response carries none.
    pub async fn current_conditions(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ];
        let data = self.get_json(&self.forecast_url, &query).await?;
        Ok(data.get("current").cloned().unwrap_or_else(|| json!({})))
    }
}
