//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default relay path prefix
pub const DEFAULT_BASE_PATH: &str = "/_geecache/";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget for the demo group's cache (0 = unbounded)
    pub cache_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Relay path prefix, always starting and ending with `/`
    pub base_path: String,
    /// Name the demo group is registered under
    pub group_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Cache byte budget (default: 2048)
    /// - `SERVER_PORT` - HTTP server port (default: 9999)
    /// - `BASE_PATH` - Relay path prefix (default: `/_geecache/`)
    /// - `GROUP_NAME` - Demo group name (default: `scores`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_bytes),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            base_path: env::var("BASE_PATH")
                .ok()
                .filter(|v| !v.trim_matches('/').is_empty())
                .map(|v| normalize_base_path(&v))
                .unwrap_or(defaults.base_path),
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.group_name),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_bytes: 2 << 10,
            server_port: 9999,
            base_path: DEFAULT_BASE_PATH.to_string(),
            group_name: "scores".to_string(),
        }
    }
}

/// Wraps a path prefix in exactly one leading and one trailing `/`.
pub fn normalize_base_path(path: &str) -> String {
    format!("/{}/", path.trim_matches('/'))
}
