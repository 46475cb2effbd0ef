//! Configuration management for the `ridecast` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::RidecastError;
use crate::models::{Coordinates, Criteria};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `ridecast` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RidecastConfig {
    /// Forecast service configuration
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Default location and criteria
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_forecast_timeout")]
    pub timeout_seconds: u32,
    /// Forecast horizon in calendar days
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Default location and riding criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Fallback latitude when the location capability is unavailable
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Fallback longitude when the location capability is unavailable
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Maximum tolerated precipitation in mm
    #[serde(default = "default_max_precipitation")]
    pub max_precipitation_mm: f32,
    /// Maximum tolerated wind speed in km/h
    #[serde(default = "default_max_wind_speed")]
    pub max_wind_speed_kmh: f32,
    /// Minimum acceptable temperature in Celsius
    #[serde(default = "default_min_temperature")]
    pub min_temperature_c: f32,
    /// Maximum acceptable temperature in Celsius
    #[serde(default = "default_max_temperature")]
    pub max_temperature_c: f32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u32 {
    7
}

fn default_latitude() -> f64 {
    52.52
}

fn default_longitude() -> f64 {
    13.405
}

fn default_max_precipitation() -> f32 {
    0.0
}

fn default_max_wind_speed() -> f32 {
    20.0
}

fn default_min_temperature() -> f32 {
    10.0
}

fn default_max_temperature() -> f32 {
    35.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            timeout_seconds: default_forecast_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            max_precipitation_mm: default_max_precipitation(),
            max_wind_speed_kmh: default_max_wind_speed(),
            min_temperature_c: default_min_temperature(),
            max_temperature_c: default_max_temperature(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl RidecastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with RIDECAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("RIDECAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: RidecastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ridecast").join("config.toml"))
    }

    /// The fallback coordinates used when the location capability fails
    #[must_use]
    pub fn default_coordinates(&self) -> Coordinates {
        Coordinates::new(self.defaults.latitude, self.defaults.longitude)
    }

    /// The initial riding criteria
    #[must_use]
    pub fn default_criteria(&self) -> Criteria {
        Criteria {
            max_precipitation_mm: self.defaults.max_precipitation_mm,
            max_wind_speed_kmh: self.defaults.max_wind_speed_kmh,
            min_temperature_c: self.defaults.min_temperature_c,
            max_temperature_c: self.defaults.max_temperature_c,
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.timeout_seconds > 300 {
            return Err(
                RidecastError::config("Forecast API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.forecast.forecast_days == 0 || self.forecast.forecast_days > 16 {
            return Err(
                RidecastError::config("Forecast horizon must be between 1 and 16 days").into(),
            );
        }

        if !self.default_coordinates().is_valid() {
            return Err(RidecastError::config(format!(
                "Default coordinates out of range: lat={}, lon={}",
                self.defaults.latitude, self.defaults.longitude
            ))
            .into());
        }

        if self.defaults.max_precipitation_mm < 0.0 {
            return Err(RidecastError::config("Maximum precipitation cannot be negative").into());
        }

        if self.defaults.max_wind_speed_kmh < 0.0 {
            return Err(RidecastError::config("Maximum wind speed cannot be negative").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RidecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RidecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.forecast.base_url.starts_with("http://")
            && !self.forecast.base_url.starts_with("https://")
        {
            return Err(RidecastError::config(
                "Forecast API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
