//! Startup location resolution
//!
//! Resolves the initial coordinate pair from the environment's location
//! capability, falling back to a configured default when the capability is
//! missing or reports failure. Runs exactly once at startup; the user can
//! always override coordinates manually afterwards.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::RidecastError;
use crate::models::Coordinates;

/// Async source of the device's current coordinates
#[async_trait]
pub trait LocationProvider {
    /// Attempt to obtain the current coordinates; no retry, no polling
    async fn current_location(&self) -> Result<Coordinates, RidecastError>;
}

/// Outcome of startup location resolution
#[derive(Debug, Clone, PartialEq)]
pub struct StartupLocation {
    /// The resolved (or fallback) coordinates
    pub coordinates: Coordinates,
    /// Non-fatal advisory when the fallback was used
    pub advisory: Option<String>,
}

/// Resolve the startup location, falling back to `default` on any failure
pub async fn resolve_startup_location(
    provider: &dyn LocationProvider,
    default: Coordinates,
) -> StartupLocation {
    match provider.current_location().await {
        Ok(coordinates) => {
            info!(
                "Resolved current location: {}",
                coordinates.format_coordinates()
            );
            StartupLocation {
                coordinates,
                advisory: None,
            }
        }
        Err(err) => {
            warn!("Location capability unavailable: {err}, using default location");
            StartupLocation {
                coordinates: default,
                advisory: Some("Using default location".to_string()),
            }
        }
    }
}

/// IP-based location provider
///
/// Uses a free IP-geolocation JSON service, no API key required. Accuracy is
/// city-level, which is plenty for an hourly weather forecast.
pub struct GeoIpProvider {
    client: reqwest::Client,
    base_url: String,
}

const GEOIP_URL: &str = "https://ipapi.co";

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl GeoIpProvider {
    /// Create a provider against the default geolocation service
    pub fn new() -> Result<Self, RidecastError> {
        Self::with_base_url(GEOIP_URL.to_string())
    }

    /// Create a provider against a specific base URL
    pub fn with_base_url(base_url: String) -> Result<Self, RidecastError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("ridecast/0.1.0")
            .build()
            .map_err(|e| RidecastError::location(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl LocationProvider for GeoIpProvider {
    async fn current_location(&self) -> Result<Coordinates, RidecastError> {
        let url = format!("{}/json/", self.base_url);
        debug!("GeoIP request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RidecastError::location(format!("GeoIP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RidecastError::location(format!(
                "GeoIP request returned status {status}"
            )));
        }

        let body: GeoIpResponse = response
            .json()
            .await
            .map_err(|e| RidecastError::location(format!("GeoIP parse error: {e}")))?;

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coordinates = Coordinates::new(latitude, longitude);
                if coordinates.is_valid() {
                    Ok(coordinates)
                } else {
                    Err(RidecastError::location(format!(
                        "GeoIP returned out-of-range coordinates: {}",
                        coordinates.format_coordinates()
                    )))
                }
            }
            _ => Err(RidecastError::location(
                "GeoIP response is missing coordinates",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Coordinates);

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn current_location(&self) -> Result<Coordinates, RidecastError> {
            Ok(self.0)
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn current_location(&self) -> Result<Coordinates, RidecastError> {
            Err(RidecastError::location("permission denied"))
        }
    }

    fn default_coords() -> Coordinates {
        Coordinates::new(52.52, 13.405)
    }

    #[tokio::test]
    async fn test_successful_resolution_adopts_provider_coordinates() {
        let provider = FixedProvider(Coordinates::new(46.82, 8.23));
        let resolved = resolve_startup_location(&provider, default_coords()).await;

        assert_eq!(resolved.coordinates, Coordinates::new(46.82, 8.23));
        assert!(resolved.advisory.is_none());
    }

    #[tokio::test]
    async fn test_failed_resolution_falls_back_with_advisory() {
        let resolved = resolve_startup_location(&FailingProvider, default_coords()).await;

        assert_eq!(resolved.coordinates, default_coords());
        let advisory = resolved.advisory.expect("fallback should carry an advisory");
        assert!(advisory.to_lowercase().contains("default location"));
    }
}
