//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for groups and the HTTP relay.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty key passed to a group lookup
    #[error("key is required")]
    EmptyKey,

    /// The loader failed; displayed exactly as the loader reported it
    #[error(transparent)]
    Load(anyhow::Error),

    /// No group registered under the requested name
    #[error("no such group: {0}")]
    GroupNotFound(String),

    /// Relay path not shaped `<group>/<key>`
    #[error("bad request: {0}")]
    InvalidPath(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::EmptyKey
            | CacheError::Load(_)
            | CacheError::GroupNotFound(_)
            | CacheError::InvalidPath(_) => StatusCode::NOT_FOUND,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
