//! Response DTOs for the relay's JSON endpoints
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats/:group)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Group the statistics belong to
    pub group: String,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of successful loads
    pub loads: u64,
    /// Number of failed loads
    pub load_failures: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub entries: usize,
    /// Accounted bytes in use
    pub bytes_used: usize,
    /// Byte budget (0 = unbounded)
    pub max_bytes: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a group's statistics
    pub fn new(group: impl Into<String>, stats: &CacheStats) -> Self {
        Self {
            group: group.into(),
            hits: stats.hits,
            misses: stats.misses,
            loads: stats.loads,
            load_failures: stats.load_failures,
            evictions: stats.evictions,
            entries: stats.entries,
            bytes_used: stats.bytes_used,
            max_bytes: stats.max_bytes,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Names of the registered groups
    pub groups: Vec<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(groups: Vec<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            groups,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
