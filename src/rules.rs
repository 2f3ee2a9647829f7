//! Feasibility predicates consulted by the solver.

use crate::model::{Driver, Route, TimeWindow, Vehicle};

/// The route's tag must be both a driver capability and the vehicle type.
pub fn capability_match(driver: &Driver, vehicle: &Vehicle, route: &Route) -> bool {
    driver.has_capability(&route.required_type) && vehicle.kind == route.required_type
}

/// Half-open overlap test against already committed windows.
///
/// Windows that only touch (one ends exactly when the other starts) do not
/// conflict.
pub fn time_conflict<'a>(window: &TimeWindow, existing: impl IntoIterator<Item = &'a TimeWindow>) -> bool {
    let (start, end) = (window.start_offset(), window.end_offset());
    existing
        .into_iter()
        .any(|other| start < other.end_offset() && end > other.start_offset())
}
