//! Per-driver running itinerary.

use chrono::TimeDelta;

use crate::model::{Location, TimeWindow};
use crate::rules::time_conflict;

/// A committed route in a driver's day.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub route_id: String,
    pub window: TimeWindow,
    /// Where the driver is once the route ends.
    pub destination: Location,
}

/// Where and when a driver can leave for the next route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Departure {
    pub location: Location,
    /// Offset from midnight.
    pub ready_at: TimeDelta,
}

/// Ordered list of routes committed to one driver during a run.
///
/// Stops are only ever appended; seeded by manual exceptions and then grown
/// by the solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    stops: Vec<Stop>,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route_id: impl Into<String>, window: TimeWindow, destination: Location) {
        self.stops.push(Stop {
            route_id: route_id.into(),
            window,
            destination,
        });
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn windows(&self) -> impl Iterator<Item = &TimeWindow> {
        self.stops.iter().map(|stop| &stop.window)
    }

    /// Total committed time across all stops.
    pub fn worked(&self) -> TimeDelta {
        self.windows().fold(TimeDelta::zero(), |total, window| {
            total.checked_add(&window.duration()).unwrap_or(TimeDelta::MAX)
        })
    }

    pub fn conflicts_with(&self, window: &TimeWindow) -> bool {
        time_conflict(window, self.windows())
    }

    /// Departure point for a route starting at `start` (offset from midnight).
    ///
    /// Uses the destination of the latest stop ending at or before `start`,
    /// otherwise the driver's base location at the start of the day.
    pub fn departure_for(&self, start: TimeDelta, base: Location) -> Departure {
        // rev: on equal end times the earliest committed stop wins
        self.stops
            .iter()
            .rev()
            .filter(|stop| stop.window.end_offset() <= start)
            .max_by_key(|stop| stop.window.end_offset())
            .map(|stop| Departure {
                location: stop.destination,
                ready_at: stop.window.end_offset(),
            })
            .unwrap_or(Departure {
                location: base,
                ready_at: TimeDelta::zero(),
            })
    }
}
