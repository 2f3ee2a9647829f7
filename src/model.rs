//! Typed planner entities.
//!
//! Loader-facing records live in [`crate::records`]; everything here is
//! already validated and parsed.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Working-time cap applied when a driver has none configured.
pub const DEFAULT_MAX_WORK_HOURS: i64 = 24;

/// Display format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// A planar coordinate parsed from a `"lat,lon"` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl FromStr for Location {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidLocation {
            value: value.to_string(),
        };

        let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid());
        }

        Ok(Self { lat, lon })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    #[serde(alias = "disponivel")]
    Available,
    #[serde(alias = "indisponivel")]
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

/// Parses a `HH:MM` time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime, PlannerError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| PlannerError::InvalidTime {
        value: value.to_string(),
    })
}

/// Offset of a time of day from midnight.
pub fn since_midnight(time: NaiveTime) -> TimeDelta {
    TimeDelta::seconds(i64::from(time.num_seconds_from_midnight()))
}

/// A committed interval within the planning day.
///
/// Stores the start and the real length, so intervals running past midnight
/// or lasting a day or more keep their full extent on the offset axis. The
/// end time of day is derived and wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    #[serde(rename = "duration_secs", with = "seconds")]
    duration: TimeDelta,
}

impl TimeWindow {
    /// Window between two times of day. An end before the start means the
    /// interval runs past midnight.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        let span = end.signed_duration_since(start);
        let duration = if end < start { span + TimeDelta::days(1) } else { span };
        Self { start, duration }
    }

    /// Negative durations are clamped to zero.
    pub fn from_start(start: NaiveTime, duration: TimeDelta) -> Self {
        Self {
            start,
            duration: duration.max(TimeDelta::zero()),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// End time of day, wrapped past midnight.
    pub fn end(&self) -> NaiveTime {
        let (end, _) = self.start.overflowing_add_signed(self.duration);
        end
    }

    pub fn start_offset(&self) -> TimeDelta {
        since_midnight(self.start)
    }

    pub fn end_offset(&self) -> TimeDelta {
        self.start_offset().checked_add(&self.duration).unwrap_or(TimeDelta::MAX)
    }
}

/// Serializes a [`TimeDelta`] as whole seconds.
mod seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(secs)
            .filter(|delta| *delta >= TimeDelta::zero())
            .ok_or_else(|| de::Error::custom(format!("duration out of range: {secs}s")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    /// Unique driver name.
    pub name: String,
    /// Base location the driver starts the day from.
    pub location: Location,
    pub availability: Availability,
    /// Capability tags; a route's required tag must be among them.
    pub capabilities: Vec<String>,
    pub max_work: TimeDelta,
}

impl Driver {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            availability: Availability::Available,
            capabilities: Vec::new(),
            max_work: TimeDelta::hours(DEFAULT_MAX_WORK_HOURS),
        }
    }

    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.iter().any(|capability| capability == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle number.
    pub id: String,
    /// Capability tag ("type") of the vehicle.
    pub kind: String,
    pub availability: Availability,
    /// Distance units per unit of fuel. `None` or non-positive falls back to
    /// distance as the travel cost.
    pub fuel_efficiency: Option<f64>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            availability: Availability::Available,
            fuel_efficiency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    /// Scheduled start and length.
    pub window: TimeWindow,
    /// Tag both the driver and the vehicle must carry.
    pub required_type: String,
}

impl Route {
    pub fn new(
        id: impl Into<String>,
        origin: Location,
        destination: Location,
        start: NaiveTime,
        duration: TimeDelta,
        required_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            window: TimeWindow::from_start(start, duration),
            required_type: required_type.into(),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.window.start
    }

    pub fn end(&self) -> NaiveTime {
        self.window.end()
    }

    pub fn duration(&self) -> TimeDelta {
        self.window.duration()
    }

    pub fn display_start(&self) -> String {
        self.window.start.format(TIME_FORMAT).to_string()
    }
}

/// An operator-supplied binding that pre-empts optimization for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualException {
    pub route_id: String,
    pub driver: String,
    pub vehicle: Option<String>,
}

impl ManualException {
    pub fn new(route_id: impl Into<String>, driver: impl Into<String>, vehicle: Option<&str>) -> Self {
        Self {
            route_id: route_id.into(),
            driver: driver.into(),
            vehicle: vehicle.map(str::to_string),
        }
    }
}

/// A route committed by the solver to a driver and vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub route_id: String,
    pub driver: String,
    pub vehicle: String,
    pub window: TimeWindow,
    /// Score the pair won with, including any new-driver penalty.
    pub score: f64,
}

impl Assignment {
    pub fn display_start(&self) -> String {
        self.window.start.format(TIME_FORMAT).to_string()
    }
}
