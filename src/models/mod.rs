//! Data models for the ridecast application
//!
//! This module contains the core domain models organized by concern:
//! - Location: geographic coordinates
//! - Criteria: user-adjustable riding thresholds
//! - Forecast: hourly forecast observations

pub mod criteria;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use criteria::Criteria;
pub use forecast::{HourlyForecast, HourlyObservation};
pub use location::Coordinates;
