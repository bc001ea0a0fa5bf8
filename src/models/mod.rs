//! Response models for the relay's JSON endpoints
//!
//! Cached values themselves are served as raw bytes; only the stats and
//! health endpoints speak JSON.

pub mod responses;

pub use responses::{HealthResponse, StatsResponse};
