//! Riding criteria model and the hourly suitability predicate

use serde::{Deserialize, Serialize};

use super::HourlyObservation;

/// User-adjustable thresholds deciding whether an hour is suitable for riding
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Criteria {
    /// Maximum tolerated precipitation in mm
    pub max_precipitation_mm: f32,
    /// Maximum tolerated wind speed in km/h
    pub max_wind_speed_kmh: f32,
    /// Minimum acceptable temperature in Celsius
    pub min_temperature_c: f32,
    /// Maximum acceptable temperature in Celsius
    pub max_temperature_c: f32,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            max_precipitation_mm: 0.0,
            max_wind_speed_kmh: 20.0,
            min_temperature_c: 10.0,
            max_temperature_c: 35.0,
        }
    }
}

impl Criteria {
    /// Check whether a single hourly observation meets all four thresholds
    #[must_use]
    pub fn is_suitable(&self, observation: &HourlyObservation) -> bool {
        observation.precipitation_mm <= self.max_precipitation_mm
            && observation.wind_speed_kmh <= self.max_wind_speed_kmh
            && observation.temperature_c >= self.min_temperature_c
            && observation.temperature_c <= self.max_temperature_c
    }

    /// Whether any observation could ever match
    ///
    /// An inverted temperature range is valid input; it just classifies every
    /// hour as unsuitable.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.max_temperature_c >= self.min_temperature_c
    }
}
