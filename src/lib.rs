//! roster-planner core
//!
//! Greedy daily assignment of scheduled routes to drivers and vehicles,
//! with manual exceptions honored ahead of optimization.

pub mod traits;
pub mod error;
pub mod model;
pub mod euclidean;
pub mod rules;
pub mod itinerary;
pub mod exceptions;
pub mod solver;
pub mod roster;
pub mod records;
pub mod compare;
