//! Integration Tests for the HTTP Relay
//!
//! Tests full request/response cycle for each endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mini_groupcache::{api::create_router, AppState, GroupRegistry};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

/// Registers a "scores" group over a fixed table and returns its call counter.
fn create_test_registry(cache_bytes: usize) -> (Arc<GroupRegistry>, Arc<AtomicUsize>) {
    let db: HashMap<&str, &str> = HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]);
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);

    let registry = Arc::new(GroupRegistry::new());
    registry.new_group("scores", cache_bytes, move |key: &str| -> anyhow::Result<Vec<u8>> {
        counter.fetch_add(1, Ordering::SeqCst);
        db.get(key)
            .map(|v| v.as_bytes().to_vec())
            .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
    });
    (registry, loads)
}

fn create_test_app() -> (Router, Arc<AtomicUsize>) {
    let (registry, loads) = create_test_registry(2 << 10);
    (create_router(AppState::new(registry)), loads)
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_to_bytes(body).await).unwrap()
}

// == Relay Endpoint Tests ==

#[tokio::test]
async fn test_relay_returns_raw_bytes() {
    let (app, _) = create_test_app();

    let response = get(&app, "/_geecache/scores/Tom").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(body_to_bytes(response.into_body()).await, b"630");
}

#[tokio::test]
async fn test_relay_second_request_is_cache_hit() {
    let (app, loads) = create_test_app();

    for _ in 0..3 {
        let response = get(&app, "/_geecache/scores/Jack").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_bytes(response.into_body()).await, b"589");
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_relay_unknown_key_is_not_found() {
    let (app, loads) = create_test_app();

    let response = get(&app, "/_geecache/scores/unknown").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "unknown not exist");

    // failures are not cached, so the loader runs again
    get(&app, "/_geecache/scores/unknown").await;
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_relay_unknown_group_is_not_found() {
    let (app, loads) = create_test_app();

    let response = get(&app, "/_geecache/nosuchgroup/Tom").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nosuchgroup"));
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_relay_empty_key_is_not_found() {
    let (app, loads) = create_test_app();

    let response = get(&app, "/_geecache/scores/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_relay_rejects_path_without_key() {
    let (app, _) = create_test_app();

    let response = get(&app, "/_geecache/scores").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "bad request: scores");
}

#[tokio::test]
async fn test_relay_empty_group_segment_is_unknown_group() {
    let (app, loads) = create_test_app();

    let response = get(&app, "/_geecache//Tom").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "no such group: ");
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_relay_outside_base_path_is_not_routed() {
    let (app, loads) = create_test_app();

    let response = get(&app, "/other/scores/Tom").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _) = create_test_app();

    get(&app, "/_geecache/scores/Tom").await; // miss + load
    get(&app, "/_geecache/scores/Tom").await; // hit
    get(&app, "/_geecache/scores/nobody").await; // miss + failed load

    let response = get(&app, "/stats/scores").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["group"], "scores");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["loads"], 1);
    assert_eq!(json["load_failures"], 1);
    assert_eq!(json["entries"], 1);
    assert_eq!(json["bytes_used"], 6);
    assert_eq!(json["max_bytes"], 2048);
}

#[tokio::test]
async fn test_stats_endpoint_unknown_group() {
    let (app, _) = create_test_app();

    let response = get(&app, "/stats/nosuchgroup").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_report_evictions() {
    // room for one 6-byte entry
    let (registry, _) = create_test_registry(6);
    let app = create_router(AppState::new(registry));

    get(&app, "/_geecache/scores/Tom").await;
    get(&app, "/_geecache/scores/Sam").await;

    let json = body_to_json(get(&app, "/stats/scores").await.into_body()).await;
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["entries"], 1);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["groups"][0], "scores");
    assert!(json.get("timestamp").is_some());
}

// == End-to-End over TCP ==

#[tokio::test]
async fn test_served_over_tcp() {
    let (registry, loads) = create_test_registry(2 << 10);
    let app = create_router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let response = client
        .get(format!("{}/_geecache/scores/Sam", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"567");

    let stats: Value = client
        .get(format!("{}/stats/scores", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["loads"], 1);
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    server.abort();
}
