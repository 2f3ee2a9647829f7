//! Loader-facing records.
//!
//! These mirror the tabular inputs field for field and deserialize from any
//! serde format. Conversion into the typed model parses coordinates and
//! times; a failure rejects only the record being converted, the caller
//! decides whether to skip it or abort the run.

use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{Availability, DEFAULT_MAX_WORK_HOURS, Driver, ManualException, Route, Vehicle, parse_time};

/// Identifier given either as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(number) => write!(f, "{number}"),
            RecordId::Text(text) => f.write_str(text.trim()),
        }
    }
}

/// Capability tags, as a list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capabilities {
    List(Vec<String>),
    Joined(String),
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::List(Vec::new())
    }
}

impl Capabilities {
    pub fn tags(&self) -> Vec<String> {
        let tags: Vec<&str> = match self {
            Capabilities::List(list) => list.iter().map(String::as_str).collect(),
            Capabilities::Joined(joined) => joined.split(',').collect(),
        };
        tags.into_iter()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub max_work_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub number: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub fuel_efficiency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: RecordId,
    pub origin: String,
    pub destination: String,
    /// `HH:MM`.
    pub start_time: String,
    pub duration_minutes: i64,
    pub required_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub route_id: RecordId,
    pub driver_name: String,
    #[serde(default)]
    pub vehicle_number: Option<RecordId>,
}

fn max_work(driver: &str, hours: Option<f64>) -> PlannerResult<TimeDelta> {
    match hours {
        None => Ok(TimeDelta::hours(DEFAULT_MAX_WORK_HOURS)),
        Some(hours) if hours.is_nan() || hours < 0.0 => Err(PlannerError::InvalidWorkHours {
            driver: driver.to_string(),
            hours,
        }),
        Some(hours) => {
            let millis = (hours * 3_600_000.0).round() as i64;
            Ok(TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX))
        }
    }
}

impl TryFrom<DriverRecord> for Driver {
    type Error = PlannerError;

    fn try_from(record: DriverRecord) -> Result<Self, Self::Error> {
        Ok(Driver {
            location: record.location.parse()?,
            availability: record.availability,
            capabilities: record.capabilities.tags(),
            max_work: max_work(&record.name, record.max_work_hours)?,
            name: record.name,
        })
    }
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Vehicle {
            id: record.number.to_string(),
            kind: record.kind.trim().to_string(),
            availability: record.availability,
            fuel_efficiency: record.fuel_efficiency,
        }
    }
}

impl TryFrom<RouteRecord> for Route {
    type Error = PlannerError;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        let id = record.id.to_string();
        if record.duration_minutes < 0 {
            return Err(PlannerError::InvalidDuration {
                route_id: id,
                minutes: record.duration_minutes,
            });
        }

        let duration = TimeDelta::try_minutes(record.duration_minutes).ok_or_else(|| PlannerError::InvalidDuration {
            route_id: id.clone(),
            minutes: record.duration_minutes,
        })?;

        Ok(Route::new(
            id,
            record.origin.parse()?,
            record.destination.parse()?,
            parse_time(&record.start_time)?,
            duration,
            record.required_type.trim(),
        ))
    }
}

impl From<ExceptionRecord> for ManualException {
    fn from(record: ExceptionRecord) -> Self {
        let vehicle = record
            .vehicle_number
            .map(|number| number.to_string())
            .filter(|number| !number.is_empty());

        ManualException {
            route_id: record.route_id.to_string(),
            driver: record.driver_name,
            vehicle,
        }
    }
}
