//! Display formatting helpers for windows, grid cells and measurements

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::Criteria;
use crate::riding::{GridCell, RidingWindow};

/// Format a day relative to today (Today, Tomorrow, day of week)
#[must_use]
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A, %B %d").to_string(),
    }
}

/// Format a riding window as a human-readable span
///
/// The end time omits the date when the window does not cross midnight.
#[must_use]
pub fn format_window(window: &RidingWindow) -> String {
    let start = window.start.format("%a %d %b %H:%M");
    if window.start.date() == window.end.date() {
        format!("{} - {}", start, window.end.format("%H:%M"))
    } else {
        format!("{} - {}", start, window.end.format("%a %d %b %H:%M"))
    }
}

/// Footer line stating when the forecast payload was retrieved
#[must_use]
pub fn retrieved_label(retrieved_at: DateTime<Utc>) -> String {
    format!("Retrieved {} UTC", retrieved_at.format("%Y-%m-%d %H:%M"))
}

/// Advisory when the thresholds can never classify any hour as suitable
#[must_use]
pub fn criteria_note(criteria: &Criteria) -> Option<String> {
    if criteria.is_satisfiable() {
        None
    } else {
        Some(format!(
            "Minimum temperature ({}) exceeds maximum ({}); no hour can qualify",
            format_temperature(criteria.min_temperature_c),
            format_temperature(criteria.max_temperature_c)
        ))
    }
}

/// Format temperature with unit
#[must_use]
pub fn format_temperature(temperature_c: f32) -> String {
    format!("{temperature_c:.1}\u{b0}C")
}

/// Format wind speed with unit
#[must_use]
pub fn format_wind(wind_speed_kmh: f32) -> String {
    format!("{wind_speed_kmh:.0} km/h")
}

/// Format precipitation with unit
#[must_use]
pub fn format_precipitation(precipitation_mm: f32) -> String {
    format!("{precipitation_mm:.1} mm")
}

/// One-character terminal rendering of a grid slot
///
/// Absent slots must stay distinguishable from present-but-unsuitable ones.
#[must_use]
pub fn cell_symbol(cell: Option<&GridCell>) -> char {
    match cell {
        None => ' ',
        Some(cell) if cell.is_past => '-',
        Some(cell) if cell.suitable => '#',
        Some(_) => '.',
    }
}

/// Hour-of-day column header, e.g. "06"
#[must_use]
pub fn hour_header(hour: u32) -> String {
    format!("{hour:02}")
}

/// Short row label for a grid day
#[must_use]
pub fn day_header(date: NaiveDate) -> String {
    date.format("%a %d %b").to_string()
}
