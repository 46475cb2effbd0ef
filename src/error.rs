//! Error types and handling for the `ridecast` application

use thiserror::Error;

/// Main error type for the `ridecast` application
#[derive(Error, Debug)]
pub enum RidecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast service communication errors (transport or non-2xx status)
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Response parsed but the expected hourly arrays are absent or inconsistent
    #[error("Malformed forecast payload: {message}")]
    Payload { message: String },

    /// Location capability missing or denied
    #[error("Location unavailable: {message}")]
    Location { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl RidecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new malformed-payload error
    pub fn payload<S: Into<String>>(message: S) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Create a new location error
    pub fn location<S: Into<String>>(message: S) -> Self {
        Self::Location {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    ///
    /// Fetch and payload failures read the same to the user; the distinction
    /// only matters in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RidecastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            RidecastError::Fetch { .. } | RidecastError::Payload { .. } => {
                "Unable to load the forecast. Please check your internet connection and try again."
                    .to_string()
            }
            RidecastError::Location { .. } => {
                "Could not determine your location, using default location.".to_string()
            }
            RidecastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for RidecastError {
    fn from(err: reqwest::Error) -> Self {
        RidecastError::Fetch {
            message: err.to_string(),
        }
    }
}
