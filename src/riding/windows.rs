//! Riding window derivation
//!
//! A riding window is a maximal run of consecutive suitable hours,
//! represented as a half-open interval `[start, end)`.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Criteria, HourlyForecast};

/// A maximal contiguous span of hours meeting the riding criteria
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RidingWindow {
    /// Start of the window (inclusive)
    pub start: NaiveDateTime,
    /// End of the window (exclusive), always after `start`
    pub end: NaiveDateTime,
}

impl RidingWindow {
    /// Length of the window
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Derive the ordered list of riding windows from a forecast
///
/// Single forward pass: a window opens at the first suitable hour and closes
/// at the boundary of the first unsuitable hour that follows. A window still
/// open after the final observation closes one hour past it, since each
/// observation covers a full hour.
#[must_use]
pub fn derive_windows(forecast: &HourlyForecast, criteria: &Criteria) -> Vec<RidingWindow> {
    let mut windows = Vec::new();
    let mut open_start: Option<NaiveDateTime> = None;

    for observation in &forecast.observations {
        match (criteria.is_suitable(observation), open_start) {
            (true, None) => open_start = Some(observation.timestamp),
            (false, Some(start)) => {
                windows.push(RidingWindow {
                    start,
                    end: observation.timestamp,
                });
                open_start = None;
            }
            _ => {}
        }
    }

    if let (Some(start), Some(last)) = (open_start, forecast.observations.last()) {
        windows.push(RidingWindow {
            start,
            end: last.timestamp + Duration::hours(1),
        });
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HourlyObservation;
    use chrono::NaiveDate;

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    /// Build an hourly forecast from parallel value slices
    fn forecast(precipitation: &[f32], wind: &[f32], temperature: &[f32]) -> HourlyForecast {
        assert_eq!(precipitation.len(), wind.len());
        assert_eq!(wind.len(), temperature.len());

        let observations = precipitation
            .iter()
            .zip(wind)
            .zip(temperature)
            .enumerate()
            .map(|(i, ((&p, &w), &t))| HourlyObservation {
                timestamp: base_time() + Duration::hours(i as i64),
                temperature_c: t,
                precipitation_mm: p,
                wind_speed_kmh: w,
            })
            .collect();

        HourlyForecast::new(observations)
    }

    #[test]
    fn test_wind_spike_splits_windows() {
        let forecast = forecast(
            &[0.0, 0.0, 0.0, 0.0],
            &[5.0, 5.0, 25.0, 5.0],
            &[15.0, 15.0, 15.0, 15.0],
        );
        let windows = derive_windows(&forecast, &Criteria::default());

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, base_time());
        assert_eq!(windows[0].end, base_time() + Duration::hours(2));
        assert_eq!(windows[1].start, base_time() + Duration::hours(3));
        assert_eq!(windows[1].end, base_time() + Duration::hours(4));
    }

    #[test]
    fn test_empty_forecast_yields_no_windows() {
        let forecast = HourlyForecast::new(Vec::new());
        assert!(derive_windows(&forecast, &Criteria::default()).is_empty());
    }

    #[test]
    fn test_all_hours_suitable_yields_single_full_span_window() {
        let forecast = forecast(
            &[0.0; 6],
            &[5.0; 6],
            &[15.0, 16.0, 17.0, 18.0, 17.0, 16.0],
        );
        let windows = derive_windows(&forecast, &Criteria::default());

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, base_time());
        assert_eq!(windows[0].end, base_time() + Duration::hours(6));
    }

    #[test]
    fn test_no_hours_suitable_yields_no_windows() {
        let forecast = forecast(&[2.0, 3.0, 2.5], &[5.0, 5.0, 5.0], &[15.0, 15.0, 15.0]);
        assert!(derive_windows(&forecast, &Criteria::default()).is_empty());
    }

    #[test]
    fn test_degenerate_criteria_yield_no_windows() {
        let criteria = Criteria {
            min_temperature_c: 30.0,
            max_temperature_c: 10.0,
            ..Criteria::default()
        };
        let forecast = forecast(&[0.0; 4], &[5.0; 4], &[15.0; 4]);
        assert!(derive_windows(&forecast, &criteria).is_empty());
    }

    #[test]
    fn test_single_suitable_hour_spans_one_hour() {
        let forecast = forecast(
            &[2.0, 0.0, 2.0],
            &[5.0, 5.0, 5.0],
            &[15.0, 15.0, 15.0],
        );
        let windows = derive_windows(&forecast, &Criteria::default());

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, base_time() + Duration::hours(1));
        assert_eq!(windows[0].end, base_time() + Duration::hours(2));
        assert_eq!(windows[0].duration(), Duration::hours(1));
    }

    #[test]
    fn test_windows_are_ordered_and_disjoint() {
        let forecast = forecast(
            &[0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 2.0, 0.0],
            &[5.0; 8],
            &[15.0; 8],
        );
        let windows = derive_windows(&forecast, &Criteria::default());

        assert_eq!(windows.len(), 4);
        for window in &windows {
            assert!(window.end > window.start);
        }
        for pair in windows.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_derivation_is_pure() {
        let forecast = forecast(
            &[0.0, 2.0, 0.0],
            &[5.0, 5.0, 5.0],
            &[15.0, 15.0, 15.0],
        );
        let criteria = Criteria::default();

        let first = derive_windows(&forecast, &criteria);
        let second = derive_windows(&forecast, &criteria);
        assert_eq!(first, second);
    }
}
