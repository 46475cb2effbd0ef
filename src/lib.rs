//! `ridecast` - motorcycle riding weather windows
//!
//! This library fetches hourly weather forecasts for a location and derives
//! the contiguous time windows and day-by-hour grid of hours suitable for
//! motorcycle riding, based on user-adjustable thresholds for precipitation,
//! wind speed and temperature.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod location_resolver;
pub mod models;
pub mod riding;
pub mod state;

// Re-export core types for public API
pub use api::ForecastClient;
pub use config::RidecastConfig;
pub use error::RidecastError;
pub use location_resolver::{GeoIpProvider, LocationProvider, resolve_startup_location};
pub use models::{Coordinates, Criteria, HourlyForecast, HourlyObservation};
pub use riding::{GridCell, RidingGrid, RidingWindow, derive_grid, derive_windows};
pub use state::{FetchState, ForecastController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RidecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
