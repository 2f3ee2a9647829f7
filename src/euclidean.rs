//! Straight-line travel model.
//!
//! Distance is the planar Euclidean distance between coordinates, travel time
//! grows linearly with distance, and cost is the fuel burnt at the vehicle's
//! efficiency.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::PlannerResult;
use crate::model::{Location, Vehicle};
use crate::traits::TravelModel;

/// Minutes of travel per unit of distance.
const DEFAULT_MINUTES_PER_UNIT: f64 = 5.0;

/// Fuel price per unit of fuel.
const DEFAULT_FUEL_PRICE_PER_UNIT: f64 = 5.50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EuclideanTravel {
    pub minutes_per_unit: f64,
    pub fuel_price_per_unit: f64,
}

impl Default for EuclideanTravel {
    fn default() -> Self {
        Self {
            minutes_per_unit: DEFAULT_MINUTES_PER_UNIT,
            fuel_price_per_unit: DEFAULT_FUEL_PRICE_PER_UNIT,
        }
    }
}

impl EuclideanTravel {
    pub fn new(minutes_per_unit: f64, fuel_price_per_unit: f64) -> Self {
        Self {
            minutes_per_unit,
            fuel_price_per_unit,
        }
    }

    fn euclidean(from: Location, to: Location) -> f64 {
        (from.lat - to.lat).hypot(from.lon - to.lon)
    }
}

impl TravelModel for EuclideanTravel {
    fn distance(&self, from: Location, to: Location) -> f64 {
        Self::euclidean(from, to)
    }

    fn travel_time(&self, distance: f64) -> TimeDelta {
        let millis = (distance * self.minutes_per_unit * 60_000.0).round() as i64;
        TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX)
    }

    /// Falls back to the distance itself when the vehicle has no usable
    /// efficiency (missing, zero, negative or NaN).
    fn travel_cost(&self, distance: f64, vehicle: &Vehicle) -> f64 {
        match vehicle.fuel_efficiency {
            Some(efficiency) if efficiency > 0.0 => distance / efficiency * self.fuel_price_per_unit,
            _ => distance,
        }
    }
}

/// Distance between two raw `"lat,lon"` strings.
pub fn distance_between(from: &str, to: &str) -> PlannerResult<f64> {
    Ok(EuclideanTravel::euclidean(from.parse()?, to.parse()?))
}
