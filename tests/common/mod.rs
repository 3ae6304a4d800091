//! Shared utilities for the API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ridehail::config::AppConfig;
use ridehail::http::{build_router, AppState};
use ridehail::store::MemoryStore;

/// Full router over a fresh in-memory store, plus a handle to that store
/// for asserting on state the API does not expose.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState { store: store.clone() };
    let router = build_router(&AppConfig::default(), state);
    (router, store)
}

/// Send a JSON request through the router and decode the JSON reply.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    payload: &Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    dispatch(app, request).await
}

/// Send a bodyless request (GET, DELETE).
#[allow(dead_code)]
pub async fn send_empty(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}
