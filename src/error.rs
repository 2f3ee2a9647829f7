//! Error types for the roster planner.
//!
//! Only malformed input and invalid options are errors. Conditions the
//! planner can work around (unknown exception references, routes without a
//! feasible pair) are reported as values by the resolver and the solver.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A coordinate was not a `"lat,lon"` pair of finite numbers.
    #[error("invalid location `{value}`: expected \"lat,lon\"")]
    InvalidLocation { value: String },

    /// A time of day was not in `HH:MM` form.
    #[error("invalid time `{value}`: expected HH:MM")]
    InvalidTime { value: String },

    #[error("route `{route_id}` has invalid duration {minutes} minutes")]
    InvalidDuration { route_id: String, minutes: i64 },

    #[error("driver `{driver}` has invalid max work hours {hours}")]
    InvalidWorkHours { driver: String, hours: f64 },

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
