//! API Handlers
//!
//! HTTP request handlers relaying lookups to cache groups.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::config::DEFAULT_BASE_PATH;
use crate::error::{CacheError, Result};
use crate::group::GroupRegistry;
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Groups reachable through the relay
    pub registry: Arc<GroupRegistry>,
    /// Relay path prefix, starting and ending with `/`
    pub base_path: String,
}

impl AppState {
    /// Creates a new AppState serving `registry` under the default base path.
    pub fn new(registry: Arc<GroupRegistry>) -> Self {
        Self {
            registry,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config, registry: Arc<GroupRegistry>) -> Self {
        Self {
            registry,
            base_path: config.base_path.clone(),
        }
    }
}

// == Path Parsing ==
/// Splits a relay path of the form `<group>/<key>` at the first `/`.
///
/// The key keeps any further slashes. An empty group or key is passed through
/// so the registry or the group can reject it.
pub fn split_group_key(path: &str) -> Result<(&str, &str)> {
    path.split_once('/')
        .ok_or_else(|| CacheError::InvalidPath(path.to_string()))
}

/// Handler for GET {base_path}<group>/<key>
///
/// Looks the key up in the named group and returns the raw bytes.
pub async fn relay_handler(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
) -> Result<Response> {
    info!(%method, path = %format!("{}{}", state.base_path, path), "relay request");

    let (group_name, key) = split_group_key(&path)?;
    let group = state
        .registry
        .lookup(group_name)
        .ok_or_else(|| CacheError::GroupNotFound(group_name.to_string()))?;

    // The loader may block, so keep it off the async workers
    let key = key.to_string();
    let view = tokio::task::spawn_blocking(move || group.get(&key))
        .await
        .map_err(|e| CacheError::Internal(e.to_string()))??;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        view.byte_slice(),
    )
        .into_response())
}

/// Handler for GET /stats/:group
///
/// Returns the named group's cache statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
) -> Result<Json<StatsResponse>> {
    let group = state
        .registry
        .lookup(&group_name)
        .ok_or_else(|| CacheError::GroupNotFound(group_name.clone()))?;

    Ok(Json(StatsResponse::new(group_name, &group.stats())))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.registry.names()))
}
