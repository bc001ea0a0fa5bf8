//! API Routes
//!
//! Configures the Axum router for the cache relay.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, relay_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET {base_path}<group>/<key>` - Raw cached bytes for a key
/// - `GET /stats/:group` - Statistics for a group
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let relay_route = format!("{}*path", state.base_path);

    Router::new()
        .route(&relay_route, get(relay_handler))
        .route("/stats/:group", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupRegistry;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let registry = Arc::new(GroupRegistry::new());
        registry.new_group("scores", 2 << 10, |key: &str| -> anyhow::Result<Vec<u8>> {
            match key {
                "Tom" => Ok(b"630".to_vec()),
                _ => Err(anyhow::anyhow!("{} not exist", key)),
            }
        });
        create_router(AppState::new(registry))
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(create_test_app(), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(
            status_of(create_test_app(), "/stats/scores").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_relay_endpoint() {
        assert_eq!(
            status_of(create_test_app(), "/_geecache/scores/Tom").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_relay_not_found() {
        assert_eq!(
            status_of(create_test_app(), "/_geecache/scores/nobody").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_relay_missing_key_segment() {
        assert_eq!(
            status_of(create_test_app(), "/_geecache/scores").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_relay_empty_group_segment() {
        assert_eq!(
            status_of(create_test_app(), "/_geecache//Tom").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_custom_base_path() {
        let registry = Arc::new(GroupRegistry::new());
        registry.new_group("g", 0, |key: &str| -> anyhow::Result<Vec<u8>> {
            Ok(key.as_bytes().to_vec())
        });
        let state = AppState {
            registry,
            base_path: "/cache/".to_string(),
        };
        let app = create_router(state);

        assert_eq!(status_of(app.clone(), "/cache/g/k").await, StatusCode::OK);
        assert_eq!(
            status_of(app, "/_geecache/g/k").await,
            StatusCode::NOT_FOUND
        );
    }
}
