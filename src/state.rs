//! Fetch orchestration state machine
//!
//! The [`ForecastController`] owns the single in-process state: coordinates,
//! criteria and the fetch lifecycle. Derived views (windows, grid) are
//! recomputed on demand from the current payload and criteria, so outputs
//! always reflect the latest inputs.
//!
//! Overlapping fetches are resolved last-write-wins: every request carries a
//! monotonic sequence number and a completion older than the most recently
//! issued request is dropped instead of overwriting newer state.

use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

use crate::RidecastError;
use crate::api::ForecastClient;
use crate::models::{Coordinates, Criteria, HourlyForecast};
use crate::riding::{RidingGrid, RidingWindow, derive_grid, derive_windows};

/// Lifecycle of a forecast fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No fetch issued yet, or coordinates are not available
    Idle,
    /// A request is in flight; any prior payload or error has been cleared
    Loading,
    /// The latest request succeeded
    Ready(HourlyForecast),
    /// The latest request failed, with a user-facing message
    Failed(String),
}

/// Handle for one issued fetch, tagged with its sequence number
///
/// Returned by [`ForecastController::begin_fetch`]; hand it back to
/// [`ForecastController::complete_fetch`] together with the request's result.
#[derive(Debug)]
#[must_use]
pub struct FetchTicket {
    seq: u64,
    coordinates: Coordinates,
}

impl FetchTicket {
    /// The coordinates this fetch was issued for
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

/// Owner of coordinates, criteria and fetch state
#[derive(Debug)]
pub struct ForecastController {
    coordinates: Option<Coordinates>,
    criteria: Criteria,
    state: FetchState,
    advisory: Option<String>,
    /// Sequence number of the most recently issued request
    seq: u64,
}

impl ForecastController {
    /// Create a controller with no coordinates yet
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            coordinates: None,
            criteria,
            state: FetchState::Idle,
            advisory: None,
            seq: 0,
        }
    }

    /// Create a controller with an initial coordinate pair
    #[must_use]
    pub fn with_coordinates(coordinates: Coordinates, criteria: Criteria) -> Self {
        Self {
            coordinates: Some(coordinates),
            ..Self::new(criteria)
        }
    }

    /// Current fetch state
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Current coordinates, if resolved
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Current riding criteria
    #[must_use]
    pub fn criteria(&self) -> Criteria {
        self.criteria
    }

    /// Non-fatal advisory to surface to the user, e.g. "using default location"
    #[must_use]
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Set an advisory message
    pub fn set_advisory<S: Into<String>>(&mut self, advisory: S) {
        self.advisory = Some(advisory.into());
    }

    /// Update coordinates
    ///
    /// Invalidates the current payload; the caller must follow up with a
    /// fetch, which is the trigger for every coordinate change.
    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        debug!("Coordinates set to {}", coordinates.format_coordinates());
        self.coordinates = Some(coordinates);
    }

    /// Update criteria
    ///
    /// Invalidates derived windows/grid but not the fetched payload; the next
    /// call to [`windows`](Self::windows) or [`grid`](Self::grid) reflects the
    /// new thresholds without a new fetch.
    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
    }

    /// Whether a manual refresh is currently allowed
    ///
    /// False while a request is in flight; the explicit refresh action is
    /// gated, coordinate-change-triggered fetches are not.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        !matches!(self.state, FetchState::Loading)
    }

    /// Begin a fetch: transition to Loading and issue a tagged ticket
    ///
    /// Returns `None` without touching state when no coordinates are
    /// available. Any previously held payload or error is cleared.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let Some(coordinates) = self.coordinates else {
            debug!("No coordinates available, fetch not issued");
            return None;
        };

        self.seq += 1;
        self.state = FetchState::Loading;
        debug!(seq = self.seq, "Fetch issued");

        Some(FetchTicket {
            seq: self.seq,
            coordinates,
        })
    }

    /// Complete a fetch with its result
    ///
    /// A completion whose ticket is older than the most recently issued
    /// request is stale and ignored; the in-flight newer request will settle
    /// the state instead.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<HourlyForecast, RidecastError>,
    ) {
        if ticket.seq != self.seq {
            warn!(
                stale_seq = ticket.seq,
                current_seq = self.seq,
                "Ignoring stale fetch completion"
            );
            return;
        }

        match result {
            Ok(forecast) => {
                info!(
                    seq = ticket.seq,
                    hours = forecast.len(),
                    "Forecast ready"
                );
                self.state = FetchState::Ready(forecast);
            }
            Err(err) => {
                error!(seq = ticket.seq, "Forecast fetch failed: {err}");
                self.state = FetchState::Failed(err.user_message());
            }
        }
    }

    /// Run one full fetch cycle against the forecast service
    pub async fn refresh(&mut self, client: &ForecastClient) {
        let Some(ticket) = self.begin_fetch() else {
            return;
        };
        let result = client.fetch_hourly(ticket.coordinates()).await;
        self.complete_fetch(ticket, result);
    }

    /// The current payload, when the last fetch succeeded
    #[must_use]
    pub fn forecast(&self) -> Option<&HourlyForecast> {
        match &self.state {
            FetchState::Ready(forecast) => Some(forecast),
            _ => None,
        }
    }

    /// Riding windows derived from the current payload and criteria
    ///
    /// Empty when no payload is held; derivation is never invoked with
    /// absent or malformed data.
    #[must_use]
    pub fn windows(&self) -> Vec<RidingWindow> {
        match self.forecast() {
            Some(forecast) => derive_windows(forecast, &self.criteria),
            None => Vec::new(),
        }
    }

    /// Day-by-hour grid derived from the current payload and criteria
    #[must_use]
    pub fn grid(&self, now: NaiveDateTime) -> RidingGrid {
        match self.forecast() {
            Some(forecast) => derive_grid(forecast, &self.criteria, now),
            None => RidingGrid {
                days: Vec::new(),
                hours: Vec::new(),
                cells: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HourlyObservation;
    use chrono::NaiveDate;

    fn coords() -> Coordinates {
        Coordinates::new(52.52, 13.405)
    }

    fn forecast_with_temperature(temperature_c: f32) -> HourlyForecast {
        let base = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        HourlyForecast::new(
            (0..4)
                .map(|i| HourlyObservation {
                    timestamp: base + chrono::Duration::hours(i),
                    temperature_c,
                    precipitation_mm: 0.0,
                    wind_speed_kmh: 5.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_no_coordinates_stays_idle() {
        let mut controller = ForecastController::new(Criteria::default());
        assert!(controller.begin_fetch().is_none());
        assert_eq!(*controller.state(), FetchState::Idle);
    }

    #[test]
    fn test_begin_fetch_clears_previous_state() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());

        let ticket = controller.begin_fetch().unwrap();
        controller.complete_fetch(ticket, Ok(forecast_with_temperature(15.0)));
        assert!(controller.forecast().is_some());

        let _ticket = controller.begin_fetch().unwrap();
        assert_eq!(*controller.state(), FetchState::Loading);
        assert!(controller.forecast().is_none());
        assert!(controller.windows().is_empty());
    }

    #[test]
    fn test_failure_then_manual_refresh_recovers() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());

        let ticket = controller.begin_fetch().unwrap();
        controller.complete_fetch(ticket, Err(RidecastError::fetch("HTTP 400")));
        assert!(matches!(controller.state(), FetchState::Failed(_)));
        assert!(controller.can_refresh());

        let ticket = controller.begin_fetch().unwrap();
        assert_eq!(*controller.state(), FetchState::Loading);
        controller.complete_fetch(ticket, Ok(forecast_with_temperature(15.0)));
        assert!(matches!(controller.state(), FetchState::Ready(_)));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());

        let ticket_a = controller.begin_fetch().unwrap();
        controller.set_coordinates(Coordinates::new(48.14, 11.58));
        let ticket_b = controller.begin_fetch().unwrap();

        // B's response arrives first, then A's stale response.
        controller.complete_fetch(ticket_b, Ok(forecast_with_temperature(20.0)));
        controller.complete_fetch(ticket_a, Ok(forecast_with_temperature(-5.0)));

        let forecast = controller.forecast().expect("state should be Ready");
        assert_eq!(forecast.observations[0].temperature_c, 20.0);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_ready_state() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());

        let ticket_a = controller.begin_fetch().unwrap();
        let ticket_b = controller.begin_fetch().unwrap();

        controller.complete_fetch(ticket_b, Ok(forecast_with_temperature(20.0)));
        controller.complete_fetch(ticket_a, Err(RidecastError::fetch("timed out")));

        assert!(matches!(controller.state(), FetchState::Ready(_)));
    }

    #[test]
    fn test_manual_refresh_gated_while_loading() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());
        assert!(controller.can_refresh());

        let ticket = controller.begin_fetch().unwrap();
        assert!(!controller.can_refresh());

        controller.complete_fetch(ticket, Ok(forecast_with_temperature(15.0)));
        assert!(controller.can_refresh());
    }

    #[test]
    fn test_criteria_change_recomputes_without_refetch() {
        let mut controller = ForecastController::with_coordinates(coords(), Criteria::default());
        let ticket = controller.begin_fetch().unwrap();
        controller.complete_fetch(ticket, Ok(forecast_with_temperature(15.0)));

        assert_eq!(controller.windows().len(), 1);

        // Raising the temperature floor above the payload makes every hour unsuitable.
        controller.set_criteria(Criteria {
            min_temperature_c: 25.0,
            ..Criteria::default()
        });
        assert!(controller.windows().is_empty());

        // The payload itself is untouched.
        assert!(controller.forecast().is_some());
    }

    #[test]
    fn test_derived_views_empty_when_not_ready() {
        let controller = ForecastController::new(Criteria::default());
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        assert!(controller.windows().is_empty());
        assert!(controller.grid(now).is_empty());
    }
}
