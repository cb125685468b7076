//! Shared types for the sales campaign tracker.
//!
//! Everything here is plain data: aggregates, enums, wire records of the
//! external sales report and the dashboard DTOs returned by the backend.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
