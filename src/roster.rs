//! Final roster: one entry per route, keyed and ordered by route id.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Assignment, ManualException, Route};
use crate::solver::{UnassignedReason, UnassignedRoute};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum EntryStatus {
    /// Bound by a manual exception.
    Manual,
    /// Chosen by the solver.
    Optimized,
    Unassigned(UnassignedReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub driver: Option<String>,
    pub vehicle: Option<String>,
    /// Route start as `HH:MM`.
    pub start: String,
    pub status: EntryStatus,
}

impl RosterEntry {
    pub fn manual(exception: &ManualException, route: &Route) -> Self {
        Self {
            driver: Some(exception.driver.clone()),
            vehicle: exception.vehicle.clone(),
            start: route.display_start(),
            status: EntryStatus::Manual,
        }
    }

    pub fn optimized(assignment: &Assignment) -> Self {
        Self {
            driver: Some(assignment.driver.clone()),
            vehicle: Some(assignment.vehicle.clone()),
            start: assignment.display_start(),
            status: EntryStatus::Optimized,
        }
    }

    pub fn unassigned(route: &UnassignedRoute) -> Self {
        Self {
            driver: None,
            vehicle: None,
            start: route.display_start(),
            status: EntryStatus::Unassigned(route.reason),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.driver.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: BTreeMap<String, RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, route_id: impl Into<String>, entry: RosterEntry) -> Option<RosterEntry> {
        self.entries.insert(route_id.into(), entry)
    }

    pub fn get(&self, route_id: &str) -> Option<&RosterEntry> {
        self.entries.get(route_id)
    }

    pub fn contains(&self, route_id: &str) -> bool {
        self.entries.contains_key(route_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in route id order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, RosterEntry> {
        self.entries.iter()
    }

    pub fn assigned_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_assigned()).count()
    }

    /// Distinct drivers used anywhere in the roster.
    pub fn drivers(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .filter_map(|entry| entry.driver.as_deref())
            .collect()
    }

    /// Unions two rosters by route id.
    ///
    /// Entries of `self` are never replaced; `other` only fills routes that
    /// are not already present.
    pub fn merge(mut self, other: Roster) -> Roster {
        for (route_id, entry) in other.entries {
            self.entries.entry(route_id).or_insert(entry);
        }
        self
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = (&'a String, &'a RosterEntry);
    type IntoIter = btree_map::Iter<'a, String, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
