//! Manual exception pre-allocation.
//!
//! Exceptions are honored before the solver runs: their routes leave the
//! optimization universe, their vehicles leave the pool, and their drivers
//! start the run with the bound routes already in their itinerary. Drivers
//! stay eligible for other routes.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

use crate::itinerary::Itinerary;
use crate::model::{Driver, ManualException, Route, Vehicle};
use crate::roster::{Roster, RosterEntry};

/// Non-fatal problems found while applying exceptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExceptionWarning {
    /// Exception skipped: no such route.
    #[error("exception for driver `{driver}` references unknown route `{route_id}`; skipped")]
    UnknownRoute { route_id: String, driver: String },

    /// Exception skipped: an earlier exception already bound the route.
    #[error("route `{route_id}` already bound by an earlier exception; binding to `{driver}` skipped")]
    DuplicateRoute { route_id: String, driver: String },

    /// Binding honored, but the driver is not in the driver pool.
    #[error("route `{route_id}` bound to unknown driver `{driver}`")]
    UnknownDriver { route_id: String, driver: String },

    /// Binding honored, but the vehicle is not in the vehicle pool.
    #[error("route `{route_id}` bound to unknown vehicle `{vehicle}`")]
    UnknownVehicle { route_id: String, vehicle: String },
}

/// What is left for the solver once exceptions are applied.
#[derive(Debug, Clone)]
pub struct ManualResolution<'a> {
    /// Manually bound routes.
    pub roster: Roster,
    /// Routes still to be assigned.
    pub routes: Vec<&'a Route>,
    /// Vehicles not claimed by an exception.
    pub vehicles: Vec<&'a Vehicle>,
    /// Itineraries seeded with the bound routes, keyed by driver name.
    pub itineraries: HashMap<String, Itinerary>,
    pub warnings: Vec<ExceptionWarning>,
}

/// Applies manual bindings in input order.
///
/// When several exceptions name the same route the first one wins; later
/// ones are skipped with [`ExceptionWarning::DuplicateRoute`]. Operator files
/// written for last-one-wins semantics must list the intended binding first.
pub fn resolve_exceptions<'a>(
    drivers: &[Driver],
    vehicles: &'a [Vehicle],
    routes: &'a [Route],
    exceptions: &[ManualException],
) -> ManualResolution<'a> {
    let route_index: HashMap<&str, &Route> = routes.iter().map(|route| (route.id.as_str(), route)).collect();
    let known_drivers: HashSet<&str> = drivers.iter().map(|driver| driver.name.as_str()).collect();
    let known_vehicles: HashSet<&str> = vehicles.iter().map(|vehicle| vehicle.id.as_str()).collect();

    let mut roster = Roster::new();
    let mut itineraries: HashMap<String, Itinerary> = HashMap::new();
    let mut used_vehicles: HashSet<&str> = HashSet::new();
    let mut warnings = Vec::new();

    for exception in exceptions {
        let Some(route) = route_index.get(exception.route_id.as_str()) else {
            warnings.push(ExceptionWarning::UnknownRoute {
                route_id: exception.route_id.clone(),
                driver: exception.driver.clone(),
            });
            continue;
        };

        if roster.contains(&route.id) {
            warnings.push(ExceptionWarning::DuplicateRoute {
                route_id: route.id.clone(),
                driver: exception.driver.clone(),
            });
            continue;
        }

        if !known_drivers.contains(exception.driver.as_str()) {
            warnings.push(ExceptionWarning::UnknownDriver {
                route_id: route.id.clone(),
                driver: exception.driver.clone(),
            });
        }

        roster.insert(route.id.clone(), RosterEntry::manual(exception, route));
        itineraries
            .entry(exception.driver.clone())
            .or_default()
            .push(route.id.clone(), route.window, route.destination);

        if let Some(vehicle) = exception.vehicle.as_deref() {
            if !known_vehicles.contains(vehicle) {
                warnings.push(ExceptionWarning::UnknownVehicle {
                    route_id: route.id.clone(),
                    vehicle: vehicle.to_string(),
                });
            }
            used_vehicles.insert(vehicle);
        }
    }

    for warning in &warnings {
        warn!(%warning, "manual exception");
    }

    let routes = routes.iter().filter(|route| !roster.contains(&route.id)).collect();
    let vehicles = vehicles
        .iter()
        .filter(|vehicle| !used_vehicles.contains(vehicle.id.as_str()))
        .collect();

    ManualResolution {
        roster,
        routes,
        vehicles,
        itineraries,
        warnings,
    }
}
