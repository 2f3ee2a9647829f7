//! Core seams for the roster planner.
//!
//! The solver consults travel estimates only through [`TravelModel`], so
//! callers can swap in a road-network or tabulated model without touching
//! the assignment logic.

use chrono::TimeDelta;

use crate::model::{Location, Vehicle};

/// Estimates deadhead travel between two points.
pub trait TravelModel {
    /// Distance between two locations, in model units.
    fn distance(&self, from: Location, to: Location) -> f64;

    /// Time needed to cover `distance`.
    fn travel_time(&self, distance: f64) -> TimeDelta;

    /// Monetary cost of covering `distance` with `vehicle`.
    fn travel_cost(&self, distance: f64, vehicle: &Vehicle) -> f64;
}
