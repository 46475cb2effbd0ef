//! Day-by-hour suitability grid derivation

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::{Criteria, HourlyForecast};

/// Forecast hours before 06:00 local are excluded from the grid's columns
const FIRST_DISPLAY_HOUR: u32 = 6;

/// Suitability classification of one (day, hour-of-day) slot
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Whether the hour meets the riding criteria
    pub suitable: bool,
    /// Temperature in Celsius
    pub temperature_c: f32,
    /// Precipitation amount in mm
    pub precipitation_mm: f32,
    /// Wind speed in km/h
    pub wind_speed_kmh: f32,
    /// Whether the hour lies in the past relative to evaluation time
    pub is_past: bool,
}

/// Dense day-row by hour-column matrix of grid cells
///
/// `cells[d][h]` classifies the hour `hours[h]` on day `days[d]`; `None`
/// means no observation exists for that slot, which is distinct from a
/// present-but-unsuitable cell.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RidingGrid {
    /// Calendar days, sorted ascending, no duplicates
    pub days: Vec<NaiveDate>,
    /// Hour-of-day columns, sorted ascending, no duplicates, all `>= 6`
    pub hours: Vec<u32>,
    /// One row per day, one entry per hour column
    pub cells: Vec<Vec<Option<GridCell>>>,
}

impl RidingGrid {
    /// The cell at a day row and hour column, if an observation exists there
    #[must_use]
    pub fn cell(&self, day_index: usize, hour_index: usize) -> Option<&GridCell> {
        self.cells.get(day_index)?.get(hour_index)?.as_ref()
    }

    /// Whether the grid has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Derive the day-by-hour grid from a forecast
///
/// Days and hour columns are collected from the observations themselves, so
/// the grid adapts to whatever horizon the forecast covers. Uses the same
/// suitability predicate as window derivation.
#[must_use]
pub fn derive_grid(forecast: &HourlyForecast, criteria: &Criteria, now: NaiveDateTime) -> RidingGrid {
    let mut days = BTreeSet::new();
    let mut hours = BTreeSet::new();
    let mut by_slot = HashMap::new();

    for observation in &forecast.observations {
        let day = observation.timestamp.date();
        let hour = observation.timestamp.hour();
        days.insert(day);
        if hour >= FIRST_DISPLAY_HOUR {
            hours.insert(hour);
        }
        by_slot.insert((day, hour), observation);
    }

    let days: Vec<NaiveDate> = days.into_iter().collect();
    let hours: Vec<u32> = hours.into_iter().collect();

    let cells = days
        .iter()
        .map(|&day| {
            hours
                .iter()
                .map(|&hour| {
                    by_slot.get(&(day, hour)).map(|observation| GridCell {
                        suitable: criteria.is_suitable(observation),
                        temperature_c: observation.temperature_c,
                        precipitation_mm: observation.precipitation_mm,
                        wind_speed_kmh: observation.wind_speed_kmh,
                        is_past: observation.timestamp < now,
                    })
                })
                .collect()
        })
        .collect();

    RidingGrid { days, hours, cells }
}
