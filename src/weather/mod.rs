//! Open-Meteo weather access and time reporting.
//!
//! # Module Structure
//!
//! - [`openmeteo`](crate::weather::openmeteo) - Geocoding and forecast gateway
//! - [`tools`](crate::weather::tools) - Time and weather tools

/// Geocoding and current-forecast gateway for Open-Meteo.
pub mod openmeteo;
/// Current time and weather tools.
pub mod tools;
