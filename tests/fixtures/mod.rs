//! Test fixtures for roster-planner.
//!
//! Provides:
//! - Builders for drivers, vehicles and routes with sensible defaults
//! - Named São Paulo garage/terminal coordinates for end-to-end runs

#![allow(dead_code)]

pub mod builders;
pub mod sao_paulo_locations;

pub use builders::*;
