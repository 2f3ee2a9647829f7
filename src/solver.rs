//! Greedy roster solver.
//!
//! Routes are visited once, in start-time order. For each route every
//! eligible driver/vehicle pair is scored and the cheapest feasible pair is
//! committed; nothing is revisited afterwards.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::exceptions::{ExceptionWarning, resolve_exceptions};
use crate::itinerary::Itinerary;
use crate::model::{Assignment, Driver, ManualException, Route, TIME_FORMAT, TimeWindow, Vehicle};
use crate::roster::{Roster, RosterEntry};
use crate::rules::capability_match;
use crate::traits::TravelModel;

/// Default cost added when a driver without commitments is activated.
pub const DEFAULT_NEW_DRIVER_PENALTY: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Added to the score of a driver with nothing committed yet. Higher
    /// values favour drivers already in motion.
    pub new_driver_penalty: f64,
    /// Wall-clock budget for the run. Routes not reached in time are left
    /// unassigned.
    pub deadline: Option<Duration>,
    /// Score candidate drivers on the rayon pool.
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            new_driver_penalty: DEFAULT_NEW_DRIVER_PENALTY,
            deadline: None,
            parallel: true,
        }
    }
}

impl SolveOptions {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.new_driver_penalty.is_finite() || self.new_driver_penalty < 0.0 {
            return Err(PlannerError::InvalidOption {
                name: "new_driver_penalty",
                reason: format!("must be a non-negative number, got {}", self.new_driver_penalty),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    /// No driver or no vehicle carries the route's tag.
    NoCapableCandidates,
    /// Candidates exist but none passed availability, working time, conflict
    /// and arrival checks.
    NoFeasiblePair,
    /// The run deadline passed before the route was considered.
    DeadlineExceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnassignedRoute {
    pub route_id: String,
    pub window: TimeWindow,
    pub reason: UnassignedReason,
}

impl UnassignedRoute {
    pub fn display_start(&self) -> String {
        self.window.start.format(TIME_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    /// Commitments in the order they were made.
    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<UnassignedRoute>,
    /// Final itineraries of every driver with at least one stop, seeded stops
    /// included.
    pub itineraries: HashMap<String, Itinerary>,
}

impl Schedule {
    pub fn assignment(&self, route_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|assignment| assignment.route_id == route_id)
    }

    pub fn roster(&self) -> Roster {
        let mut roster = Roster::new();
        for assignment in &self.assignments {
            roster.insert(assignment.route_id.clone(), RosterEntry::optimized(assignment));
        }
        for route in &self.unassigned {
            roster.insert(route.route_id.clone(), RosterEntry::unassigned(route));
        }
        roster
    }
}

/// Best pair found for a route.
///
/// Ranks index the name-sorted driver list and the id-sorted vehicle bucket,
/// so comparing `(score, driver, vehicle_rank)` breaks score ties by driver
/// name, then vehicle id.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    driver: usize,
    vehicle_rank: usize,
    vehicle: &'a Vehicle,
    score: f64,
}

impl Candidate<'_> {
    fn compare(a: &Self, b: &Self) -> Ordering {
        a.score
            .total_cmp(&b.score)
            .then(a.driver.cmp(&b.driver))
            .then(a.vehicle_rank.cmp(&b.vehicle_rank))
    }
}

/// Allocation state for a single run.
///
/// Owns the per-driver itineraries and the set of vehicles allocated so far;
/// [`Scheduler::solve`] consumes it, so no state leaks between runs.
pub struct Scheduler<'a, M> {
    travel: &'a M,
    options: SolveOptions,
    drivers: Vec<&'a Driver>,
    drivers_by_tag: HashMap<&'a str, Vec<usize>>,
    vehicles_by_tag: HashMap<&'a str, Vec<&'a Vehicle>>,
    itineraries: HashMap<String, Itinerary>,
    allocated: HashSet<&'a str>,
}

impl<'a, M> Scheduler<'a, M>
where
    M: TravelModel + Sync,
{
    pub fn new(
        drivers: &'a [Driver],
        vehicles: impl IntoIterator<Item = &'a Vehicle>,
        travel: &'a M,
        options: SolveOptions,
    ) -> PlannerResult<Self> {
        options.validate()?;

        let mut drivers: Vec<&'a Driver> = drivers.iter().collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));

        let mut drivers_by_tag: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (index, &driver) in drivers.iter().enumerate() {
            let tags: BTreeSet<&'a str> = driver.capabilities.iter().map(String::as_str).collect();
            for tag in tags {
                drivers_by_tag.entry(tag).or_default().push(index);
            }
        }

        let mut vehicles_by_tag: HashMap<&'a str, Vec<&'a Vehicle>> = HashMap::new();
        for vehicle in vehicles {
            vehicles_by_tag.entry(vehicle.kind.as_str()).or_default().push(vehicle);
        }
        for bucket in vehicles_by_tag.values_mut() {
            bucket.sort_by(|a, b| a.id.cmp(&b.id));
        }

        let itineraries = drivers
            .iter()
            .map(|driver| (driver.name.clone(), Itinerary::new()))
            .collect();

        Ok(Self {
            travel,
            options,
            drivers,
            drivers_by_tag,
            vehicles_by_tag,
            itineraries,
            allocated: HashSet::new(),
        })
    }

    /// Seeds itineraries, typically with the routes bound by manual
    /// exceptions.
    pub fn with_itineraries(mut self, seeded: HashMap<String, Itinerary>) -> Self {
        self.itineraries.extend(seeded);
        self
    }

    pub fn solve(mut self, routes: impl IntoIterator<Item = &'a Route>) -> Schedule {
        let mut routes: Vec<&'a Route> = routes.into_iter().collect();
        routes.sort_by_key(|route| route.start());

        let started = Instant::now();
        let mut expired = false;
        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();

        for route in routes {
            if !expired && self.options.deadline.is_some_and(|deadline| started.elapsed() >= deadline) {
                warn!(route_id = %route.id, "deadline exceeded; remaining routes left unassigned");
                expired = true;
            }

            let outcome = if expired {
                Err(UnassignedReason::DeadlineExceeded)
            } else {
                self.best_candidate(route)
            };

            match outcome {
                Ok(candidate) => {
                    let assignment = self.commit(route, candidate);
                    debug!(
                        route_id = %assignment.route_id,
                        driver = %assignment.driver,
                        vehicle = %assignment.vehicle,
                        score = assignment.score,
                        "route assigned"
                    );
                    assignments.push(assignment);
                }
                Err(reason) => {
                    debug!(route_id = %route.id, ?reason, "route unassigned");
                    unassigned.push(UnassignedRoute {
                        route_id: route.id.clone(),
                        window: route.window,
                        reason,
                    });
                }
            }
        }

        info!(
            assigned = assignments.len(),
            unassigned = unassigned.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "schedule solved"
        );

        self.itineraries.retain(|_, itinerary| !itinerary.is_empty());
        Schedule {
            assignments,
            unassigned,
            itineraries: self.itineraries,
        }
    }

    fn best_candidate(&self, route: &Route) -> Result<Candidate<'a>, UnassignedReason> {
        let tag = route.required_type.as_str();
        let (Some(drivers), Some(vehicles)) = (self.drivers_by_tag.get(tag), self.vehicles_by_tag.get(tag)) else {
            return Err(UnassignedReason::NoCapableCandidates);
        };

        let best = if self.options.parallel {
            drivers
                .par_iter()
                .filter_map(|&index| self.evaluate_driver(route, index, vehicles))
                .min_by(Candidate::compare)
        } else {
            drivers
                .iter()
                .filter_map(|&index| self.evaluate_driver(route, index, vehicles))
                .min_by(Candidate::compare)
        };

        best.ok_or(UnassignedReason::NoFeasiblePair)
    }

    /// Cheapest vehicle for one driver, if the driver can take the route.
    fn evaluate_driver(&self, route: &Route, index: usize, vehicles: &[&'a Vehicle]) -> Option<Candidate<'a>> {
        let driver = self.drivers[index];
        if !driver.availability.is_available() {
            return None;
        }

        let itinerary = self.itineraries.get(&driver.name)?;
        let worked = itinerary.worked().checked_add(&route.duration());
        if worked.is_none_or(|worked| worked > driver.max_work) {
            return None;
        }
        if itinerary.conflicts_with(&route.window) {
            return None;
        }

        let start = route.window.start_offset();
        let departure = itinerary.departure_for(start, driver.location);
        let distance = self.travel.distance(departure.location, route.origin);
        let arrival = departure.ready_at.checked_add(&self.travel.travel_time(distance));
        if arrival.is_none_or(|arrival| arrival > start) {
            return None;
        }

        let penalty = if itinerary.is_empty() {
            self.options.new_driver_penalty
        } else {
            0.0
        };

        vehicles
            .iter()
            .enumerate()
            .filter(|(_, vehicle)| {
                vehicle.availability.is_available()
                    && !self.allocated.contains(vehicle.id.as_str())
                    && capability_match(driver, vehicle, route)
            })
            .map(|(vehicle_rank, &vehicle)| Candidate {
                driver: index,
                vehicle_rank,
                vehicle,
                score: self.travel.travel_cost(distance, vehicle) + penalty,
            })
            .filter(|candidate| candidate.score.is_finite())
            .min_by(Candidate::compare)
    }

    fn commit(&mut self, route: &Route, candidate: Candidate<'a>) -> Assignment {
        let driver = self.drivers[candidate.driver];
        self.allocated.insert(candidate.vehicle.id.as_str());
        self.itineraries
            .entry(driver.name.clone())
            .or_default()
            .push(route.id.clone(), route.window, route.destination);

        Assignment {
            route_id: route.id.clone(),
            driver: driver.name.clone(),
            vehicle: candidate.vehicle.id.clone(),
            window: route.window,
            score: candidate.score,
        }
    }
}

/// Runs the solver over `routes` with the given seeded itineraries.
pub fn solve<'a, M>(
    drivers: &'a [Driver],
    vehicles: impl IntoIterator<Item = &'a Vehicle>,
    routes: impl IntoIterator<Item = &'a Route>,
    itineraries: HashMap<String, Itinerary>,
    travel: &'a M,
    options: SolveOptions,
) -> PlannerResult<Schedule>
where
    M: TravelModel + Sync,
{
    Ok(Scheduler::new(drivers, vehicles, travel, options)?
        .with_itineraries(itineraries)
        .solve(routes))
}

/// Outcome of a full planning run.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Every route, manual bindings first and authoritative.
    pub roster: Roster,
    pub schedule: Schedule,
    pub warnings: Vec<ExceptionWarning>,
}

/// Applies manual exceptions, solves the remaining routes and merges both
/// into one roster.
pub fn plan<'a, M>(
    drivers: &'a [Driver],
    vehicles: &'a [Vehicle],
    routes: &'a [Route],
    exceptions: &[ManualException],
    travel: &'a M,
    options: SolveOptions,
) -> PlannerResult<Plan>
where
    M: TravelModel + Sync,
{
    let resolution = resolve_exceptions(drivers, vehicles, routes, exceptions);
    let schedule = solve(
        drivers,
        resolution.vehicles,
        resolution.routes,
        resolution.itineraries,
        travel,
        options,
    )?;
    let roster = resolution.roster.merge(schedule.roster());

    Ok(Plan {
        roster,
        schedule,
        warnings: resolution.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SolveOptions::default();
        assert_eq!(options.new_driver_penalty, 10_000.0);
        assert!(options.deadline.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_penalty() {
        for penalty in [-1.0, f64::NAN, f64::INFINITY] {
            let options = SolveOptions {
                new_driver_penalty: penalty,
                ..SolveOptions::default()
            };
            assert!(matches!(
                options.validate(),
                Err(PlannerError::InvalidOption { name: "new_driver_penalty", .. })
            ));
        }
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: SolveOptions = serde_json::from_str(r#"{"new_driver_penalty": 250.0}"#).unwrap();
        assert_eq!(options.new_driver_penalty, 250.0);
        assert!(options.parallel);
    }

    #[test]
    fn test_candidate_ties_break_on_driver_then_vehicle() {
        let vehicle = crate::model::Vehicle::new("101", "simple");
        let candidate = |driver, vehicle_rank, score| Candidate {
            driver,
            vehicle_rank,
            vehicle: &vehicle,
            score,
        };

        let mut candidates = [candidate(1, 0, 5.0), candidate(0, 1, 5.0), candidate(0, 0, 5.0), candidate(2, 0, 4.0)];
        candidates.sort_by(Candidate::compare);
        let order: Vec<(usize, usize)> = candidates.iter().map(|c| (c.driver, c.vehicle_rank)).collect();
        assert_eq!(order, vec![(2, 0), (0, 0), (0, 1), (1, 0)]);
    }
}
