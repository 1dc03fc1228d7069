//! Current time and weather tools.

use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use crate::weather::openmeteo::WeatherClient;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

/// UTC clock readout with a timezone echo.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get current time. Optionally specify IANA timezone (e.g., 'UTC', 'Europe/London')."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "tz": {
                    "type": "string",
                    "description": "IANA timezone name to echo back"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let tz = args
            .get("tz")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("UTC");
        let now = Utc::now();
        Ok(json!({
            "utc": now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            "timezone": tz,
        }))
    }
}

/// Current weather for a city name, resolved through the geocoder.
pub struct WeatherByCityTool {
    client: Arc<WeatherClient>,
}

impl WeatherByCityTool {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WeatherByCityTool {
    fn name(&self) -> &str {
        "weather_by_city"
    }

    fn description(&self) -> &str {
        "Get current weather for a city name using Open-Meteo (no API key)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. \"Berlin\""
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let city = match args.get("city").and_then(Value::as_str) {
            Some(c) if !c.is_empty() => c,
            _ => return Err(AppError::Validation("city is required".to_string())),
        };
        let location = self
            .client
            .geocode(city)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("city not found: {}", city)))?;
        let current = self
            .client
            .current_conditions(location.latitude, location.longitude)
            .await?;
        Ok(json!({
            "city": location.name,
            "lat": location.latitude,
            "lon": location.longitude,
            "current": current,
        }))
    }
}

/// Current weather for an explicit coordinate pair.
pub struct WeatherByCoordsTool {
    client: Arc<WeatherClient>,
}

impl WeatherByCoordsTool {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WeatherByCoordsTool {
    fn name(&self) -> &str {
        "weather_by_coords"
    }

    fn description(&self) -> &str {
        "Get current weather by coordinates (latitude, longitude)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "latitude": { "type": "number", "description": "Latitude in decimal degrees" },
                "longitude": { "type": "number", "description": "Longitude in decimal degrees" }
            },
            "required": ["latitude", "longitude"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let latitude = args
            .get("latitude")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::Validation("latitude is required".to_string()))?;
        let longitude = args
            .get("longitude")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::Validation("longitude is required".to_string()))?;
        let current = self.client.current_conditions(latitude, longitude).await?;
        Ok(json!({
            "lat": latitude,
            "lon": longitude,
            "current": current,
        }))
    }
}
