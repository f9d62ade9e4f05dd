//! Deterministic hero build recommendations.
//!
//! [`engine`] holds the pure scoring and ranking core. [`catalog`] turns raw
//! item exports into engine candidates, and [`advisor`] wires both to stored
//! build lists and an HTTP router.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
