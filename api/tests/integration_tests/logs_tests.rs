//! Integration tests for log ingestion and querying.
//!
//! Tests cover:
//! - Ingestion of valid and invalid payloads
//! - Query filters (level, substring fields, time range)
//! - Result ordering

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use super::common::{
    get, ingest_all, iso, log_payload, param, post_json, post_raw, test_app,
};

fn messages(response: &Value) -> Vec<&str> {
    response
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["message"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_ingest_then_query_returns_entry() {
    let (app, _state) = test_app();
    let payload = log_payload("warn", "Disk almost full", "storage-01", Utc::now());

    let (status, created) = post_json(app.clone(), "/logs", payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, found) = get(app, "/logs?traceId=trace-storage-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([created]));
}

#[tokio::test]
async fn test_ingest_normalizes_timestamp_to_utc() {
    let (app, _state) = test_app();
    let mut payload = log_payload("info", "Offset", "web-01", Utc::now());
    payload["timestamp"] = json!("2024-01-15T12:30:00+02:00");

    let (status, created) = post_json(app, "/logs", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["timestamp"], "2024-01-15T10:30:00.000Z");
}

#[tokio::test]
async fn test_ingest_reports_first_violation() {
    let (app, state) = test_app();
    let mut payload = log_payload("fatal", "", "web-01", Utc::now());
    payload.as_object_mut().unwrap().remove("commit");

    let (status, response) = post_json(app, "/logs", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response,
        json!({"error": "\"level\" must be one of [error, warn, info, debug]"})
    );
    assert!(state.log_store().read_all().is_empty());
}

#[tokio::test]
async fn test_ingest_rejects_unknown_field_and_bad_metadata() {
    let (app, _state) = test_app();

    let mut payload = log_payload("info", "Extra", "web-01", Utc::now());
    payload["severity"] = json!("high");
    let (status, response) = post_json(app.clone(), "/logs", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "\"severity\" is not allowed");

    let mut payload = log_payload("info", "Bad metadata", "web-01", Utc::now());
    payload["metadata"] = json!([1, 2, 3]);
    let (status, response) = post_json(app, "/logs", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "\"metadata\" must be of type object");
}

#[tokio::test]
async fn test_ingest_malformed_json_is_bad_request() {
    let (app, _state) = test_app();

    let (status, response) = post_raw(app, "/logs", "{\"level\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn test_query_orders_most_recent_first() {
    let (app, _state) = test_app();
    let now = Utc::now();
    ingest_all(
        &app,
        &[
            ("info", "middle", now - Duration::minutes(10)),
            ("info", "newest", now - Duration::minutes(1)),
            ("info", "oldest", now - Duration::minutes(30)),
        ],
    )
    .await;

    let (status, response) = get(app, "/logs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        messages(&response),
        vec!["info on newest", "info on middle", "info on oldest"]
    );
}

#[tokio::test]
async fn test_query_by_level_across_resources() {
    let (app, _state) = test_app();
    let now = Utc::now();
    ingest_all(
        &app,
        &[
            ("error", "server-prod-01", now),
            ("warn", "server-prod-02", now),
            ("info", "auth-service-01", now),
            ("debug", "cache-service-01", now),
        ],
    )
    .await;

    let (status, response) = get(app.clone(), "/logs?level=error").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&response), vec!["error on server-prod-01"]);

    let (status, response) = get(app, "/logs?level=critical").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!([]));
}

#[tokio::test]
async fn test_query_substring_filters() {
    let (app, _state) = test_app();
    let now = Utc::now();
    ingest_all(
        &app,
        &[
            ("error", "server-prod-01", now),
            ("error", "server-staging-01", now),
        ],
    )
    .await;

    // resourceId is a substring match
    let (_, response) = get(app.clone(), "/logs?resourceId=prod").await;
    assert_eq!(messages(&response), vec!["error on server-prod-01"]);

    // message is case-insensitive
    let (_, response) = get(app.clone(), "/logs?message=ERROR%20ON").await;
    assert_eq!(response.as_array().unwrap().len(), 2);

    // traceId and spanId are case-sensitive substrings
    let (_, response) = get(app.clone(), "/logs?traceId=staging").await;
    assert_eq!(messages(&response), vec!["error on server-staging-01"]);
    let (_, response) = get(app.clone(), "/logs?spanId=STAGING").await;
    assert_eq!(response, json!([]));

    // all constraints must hold
    let (_, response) = get(app.clone(), "/logs?resourceId=prod&commit=zzz").await;
    assert_eq!(response, json!([]));

    // empty parameters are ignored
    let (_, response) = get(app, "/logs?level=&message=").await;
    assert_eq!(response.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_query_time_range_is_inclusive() {
    let (app, _state) = test_app();
    let now = Utc::now();
    let two_hours_ago = now - Duration::hours(2);
    ingest_all(&app, &[("info", "batch-01", two_hours_ago)]).await;

    let uri = format!(
        "/logs?{}",
        param("timestamp_start", &iso(now - Duration::hours(1)))
    );
    let (_, response) = get(app.clone(), &uri).await;
    assert_eq!(response, json!([]));

    let uri = format!(
        "/logs?{}",
        param("timestamp_start", &iso(now - Duration::hours(3)))
    );
    let (_, response) = get(app.clone(), &uri).await;
    assert_eq!(response.as_array().unwrap().len(), 1);

    // both bounds equal to the entry's own timestamp
    let exact = iso(two_hours_ago);
    let uri = format!(
        "/logs?{}&{}",
        param("timestamp_start", &exact),
        param("timestamp_end", &exact)
    );
    let (_, response) = get(app, &uri).await;
    assert_eq!(response.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_query_rejects_malformed_time_bound() {
    let (app, _state) = test_app();

    let (status, response) = get(app, "/logs?timestamp_end=not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["error"],
        "\"timestamp_end\" must be in ISO 8601 date format"
    );
}

#[tokio::test]
async fn test_query_accepts_minute_precision_bounds() {
    let (app, _state) = test_app();
    let mut early = log_payload("info", "Before window", "web-01", Utc::now());
    early["timestamp"] = json!("2024-01-15T10:29:59.999Z");
    let mut late = log_payload("info", "In window", "web-01", Utc::now());
    late["timestamp"] = json!("2024-01-15T10:45:00.000Z");
    for payload in [early, late] {
        let (status, _) = post_json(app.clone(), "/logs", payload).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, response) = get(app.clone(), "/logs?timestamp_start=2024-01-15T10:30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&response), vec!["In window"]);

    let (status, response) = get(app, "/logs?timestamp_end=2024-01-15T10:30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&response), vec!["Before window"]);
}

#[tokio::test]
async fn test_ingest_accepts_minute_precision_timestamp() {
    let (app, _state) = test_app();
    let mut payload = log_payload("info", "Minutes only", "web-01", Utc::now());
    payload["timestamp"] = json!("2024-01-15T10:30Z");

    let (status, created) = post_json(app, "/logs", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["timestamp"], "2024-01-15T10:30:00.000Z");
}

#[tokio::test]
async fn test_ingest_rejects_non_iso_timestamp() {
    let (app, _state) = test_app();
    let mut payload = log_payload("info", "Bad time", "web-01", Utc::now());
    payload["timestamp"] = json!("15/01/2024");

    let (status, response) = post_json(app, "/logs", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response, json!({"error": "\"timestamp\" must be in iso format"}));
}
