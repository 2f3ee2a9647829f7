//! Side-by-side comparison of two rosters, e.g. a hand-made one against a
//! generated one.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::roster::{Roster, RosterEntry};

/// A route whose driver or vehicle differs, or that only one roster has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    pub route_id: String,
    pub reference: Option<RosterEntry>,
    pub candidate: Option<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Divergent routes in route id order.
    pub divergences: Vec<Divergence>,
    pub reference_drivers: usize,
    pub candidate_drivers: usize,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.divergences.is_empty()
    }
}

fn same_binding(a: &RosterEntry, b: &RosterEntry) -> bool {
    a.driver == b.driver && a.vehicle == b.vehicle
}

pub fn compare_rosters(reference: &Roster, candidate: &Roster) -> Comparison {
    let route_ids: BTreeSet<&str> = reference
        .iter()
        .chain(candidate.iter())
        .map(|(route_id, _)| route_id.as_str())
        .collect();

    let divergences = route_ids
        .into_iter()
        .filter_map(|route_id| {
            let (left, right) = (reference.get(route_id), candidate.get(route_id));
            match (left, right) {
                (Some(a), Some(b)) if same_binding(a, b) => None,
                _ => Some(Divergence {
                    route_id: route_id.to_string(),
                    reference: left.cloned(),
                    candidate: right.cloned(),
                }),
            }
        })
        .collect();

    Comparison {
        divergences,
        reference_drivers: reference.drivers().len(),
        candidate_drivers: candidate.drivers().len(),
    }
}
