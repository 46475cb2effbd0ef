//! Forecast API client for OpenMeteo integration
//!
//! This module provides HTTP client functionality for retrieving hourly
//! forecast data from the OpenMeteo API. OpenMeteo requires no API key.

use crate::RidecastError;
use crate::config::RidecastConfig;
use crate::models::{Coordinates, HourlyForecast};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Comma-joined hourly field list requested from the forecast service
const HOURLY_FIELDS: &str = "temperature_2m,precipitation,wind_speed_10m";

/// Forecast API client for OpenMeteo
pub struct ForecastClient {
    /// HTTP client
    client: reqwest::Client,
    /// Base URL for the forecast API
    base_url: String,
    /// Forecast horizon in calendar days
    forecast_days: u32,
}

impl ForecastClient {
    /// Create a new forecast API client
    pub fn new(config: &RidecastConfig) -> Result<Self, RidecastError> {
        let timeout = Duration::from_secs(config.forecast.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("ridecast/0.1.0")
            .build()
            .map_err(|e| RidecastError::fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.forecast.base_url.clone(),
            forecast_days: config.forecast.forecast_days,
        })
    }

    /// Get the hourly forecast for a coordinate pair
    ///
    /// One GET request, no automatic retry; a failed fetch is surfaced to the
    /// caller and can be retried by explicit user action.
    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    pub async fn fetch_hourly(&self, coords: Coordinates) -> Result<HourlyForecast, RidecastError> {
        info!(
            "Fetching {}-day hourly forecast for coordinates: {}",
            self.forecast_days,
            coords.format_coordinates()
        );
        let start_time = Instant::now();

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&wind_speed_unit=kmh&timezone=auto&forecast_days={}",
            self.base_url, coords.latitude, coords.longitude, HOURLY_FIELDS, self.forecast_days
        );
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Forecast request failed: {}", e);
            RidecastError::fetch(format!("Forecast request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Forecast request returned HTTP {}", status);
            return Err(RidecastError::fetch(format!(
                "Forecast request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read forecast response body: {}", e);
            RidecastError::fetch(format!("Failed to read forecast response body: {e}"))
        })?;

        let forecast_response: openmeteo::ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| {
                error!("Failed to parse forecast response: {}", e);
                RidecastError::payload(format!("Invalid forecast response body: {e}"))
            })?;

        let forecast = openmeteo::into_hourly_forecast(forecast_response)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            forecast.len(),
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(forecast)
    }
}

/// `OpenMeteo` API response structures and conversion utilities
pub(crate) mod openmeteo {
    use crate::RidecastError;
    use crate::models::{HourlyForecast, HourlyObservation};
    use chrono::NaiveDateTime;
    use serde::Deserialize;

    /// Timestamp format used by `OpenMeteo` local-time responses
    const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

    /// Forecast response from the `OpenMeteo` API
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub hourly: Option<HourlyData>,
    }

    /// Hourly weather data from `OpenMeteo`, four parallel arrays
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<Vec<f32>>,
        pub precipitation: Option<Vec<f32>>,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: Option<Vec<f32>>,
    }

    /// Convert an `OpenMeteo` response into the internal forecast model
    ///
    /// Absent hourly arrays or arrays whose length differs from `time` are a
    /// malformed payload; downstream derivation never sees partial data.
    pub fn into_hourly_forecast(
        response: ForecastResponse,
    ) -> Result<HourlyForecast, RidecastError> {
        let hourly = response
            .hourly
            .ok_or_else(|| RidecastError::payload("Response is missing the hourly block"))?;

        let len = hourly.time.len();
        let temperature = expect_array(hourly.temperature, "temperature_2m", len)?;
        let precipitation = expect_array(hourly.precipitation, "precipitation", len)?;
        let wind_speed = expect_array(hourly.wind_speed, "wind_speed_10m", len)?;

        let mut observations = Vec::with_capacity(len);
        for i in 0..len {
            let timestamp = NaiveDateTime::parse_from_str(&hourly.time[i], TIME_FORMAT)
                .map_err(|e| {
                    RidecastError::payload(format!(
                        "Unparseable timestamp '{}': {e}",
                        hourly.time[i]
                    ))
                })?;

            observations.push(HourlyObservation {
                timestamp,
                temperature_c: temperature[i],
                precipitation_mm: precipitation[i],
                wind_speed_kmh: wind_speed[i],
            });
        }

        Ok(HourlyForecast::new(observations))
    }

    fn expect_array(
        array: Option<Vec<f32>>,
        name: &str,
        expected_len: usize,
    ) -> Result<Vec<f32>, RidecastError> {
        let array = array
            .ok_or_else(|| RidecastError::payload(format!("Hourly array '{name}' is missing")))?;

        if array.len() != expected_len {
            return Err(RidecastError::payload(format!(
                "Hourly array '{name}' has {} entries, expected {expected_len}",
                array.len()
            )));
        }

        Ok(array)
    }

}
