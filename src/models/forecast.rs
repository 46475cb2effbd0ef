//! Hourly forecast model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hour-long weather observation
///
/// The interval described by an observation is `[timestamp, timestamp + 1h)`.
/// Timestamps are naive datetimes in the forecast location's local time, as
/// delivered by the forecast service with automatic timezone resolution.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct HourlyObservation {
    /// Start of the hour this observation describes
    pub timestamp: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature_c: f32,
    /// Precipitation amount in mm
    pub precipitation_mm: f32,
    /// Wind speed in km/h
    pub wind_speed_kmh: f32,
}

/// Hourly forecast containing observations sorted by timestamp
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyForecast {
    /// Hourly observations, strictly increasing in time
    pub observations: Vec<HourlyObservation>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl HourlyForecast {
    /// Create a new forecast
    #[must_use]
    pub fn new(observations: Vec<HourlyObservation>) -> Self {
        Self {
            observations,
            retrieved_at: Utc::now(),
        }
    }

    /// Number of hourly observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the forecast holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
