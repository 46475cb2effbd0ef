//! Riding suitability derivation
//!
//! Pure functions that turn an hourly forecast plus riding criteria into:
//! - contiguous riding windows ("when can I ride")
//! - a day-by-hour suitability grid ("what does the week look like")
//!
//! Both views share the same suitability predicate, so they can never
//! disagree on classification, only on presentation shape.

pub mod grid;
pub mod windows;

// Re-export commonly used types from submodules
pub use grid::{GridCell, RidingGrid, derive_grid};
pub use windows::{RidingWindow, derive_windows};
