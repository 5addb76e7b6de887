//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup and HTTP request helpers.

#![allow(dead_code)]

use api::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, SecondsFormat, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Creates a test router with a fresh in-memory store.
///
/// # Returns
///
/// A tuple containing the configured router and the app state.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::with_in_memory_store();
    let router = create_router(state.clone());
    (router, state)
}

/// Serves a fresh app on an ephemeral local port.
///
/// # Returns
///
/// The bound address, a router sharing the served state, and the state itself.
pub async fn spawn_server() -> (SocketAddr, Router, AppState) {
    let (router, state) = test_app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let served = router.clone();
    tokio::spawn(async move {
        axum::serve(listener, served).await.unwrap();
    });

    (addr, router, state)
}

/// Helper to make a POST request with JSON body.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to POST to
/// * `body` - The JSON body to send
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &serde_json::to_string(&body).unwrap()).await
}

/// Helper to POST a raw (possibly malformed) body as JSON.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to GET from
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Formats an instant the way clients send it in query strings.
pub fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a query string parameter pair, URL-encoding the value.
pub fn param(name: &str, value: &str) -> String {
    format!("{name}={}", urlencoding::encode(value))
}

/// A valid ingestion payload.
pub fn log_payload(level: &str, message: &str, resource_id: &str, timestamp: DateTime<Utc>) -> Value {
    json!({
        "level": level,
        "message": message,
        "resourceId": resource_id,
        "timestamp": iso(timestamp),
        "traceId": format!("trace-{resource_id}"),
        "spanId": format!("span-{resource_id}"),
        "commit": "a1b2c3d4",
        "metadata": {"source": "integration-test"}
    })
}

/// Ingests one entry per `(level, resource)` pair and asserts each is created.
pub async fn ingest_all(app: &Router, entries: &[(&str, &str, DateTime<Utc>)]) {
    for (level, resource_id, timestamp) in entries {
        let (status, _) = post_json(
            app.clone(),
            "/logs",
            log_payload(level, &format!("{level} on {resource_id}"), resource_id, *timestamp),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}
