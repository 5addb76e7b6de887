//! Integration tests for log analytics.
//!
//! Tests cover:
//! - Level counts and totals
//! - Hourly histogram window
//! - Top resources ranking
//! - Analytics over a filtered set

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use super::common::{get, ingest_all, iso, param, test_app};

#[tokio::test]
async fn test_analytics_counts_every_level() {
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

    let (status, response) = get(app, "/logs/analytics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["totalLogs"], 4);
    assert_eq!(
        response["logsByLevel"],
        json!({"error": 1, "warn": 1, "info": 1, "debug": 1})
    );
}

#[tokio::test]
async fn test_analytics_histogram_covers_last_day() {
    let (app, _state) = test_app();
    let now = Utc::now();
    ingest_all(
        &app,
        &[
            ("info", "web-01", now - Duration::minutes(5)),
            ("info", "web-01", now - Duration::hours(30)),
        ],
    )
    .await;

    let (_, response) = get(app, "/logs/analytics").await;

    let hours = response["logsByHour"].as_array().unwrap();
    assert_eq!(hours.len(), 24);
    assert!(hours
        .iter()
        .all(|slot| slot["hour"].as_str().is_some_and(|h| h.ends_with(":00:00.000Z"))));
    let in_window: u64 = hours.iter().map(|slot| slot["count"].as_u64().unwrap()).sum();
    // The 30 hour old entry is counted in totals but not in the histogram.
    assert_eq!(in_window, 1);
    assert_eq!(response["totalLogs"], 2);
}

#[tokio::test]
async fn test_analytics_top_resources() {
    let (app, _state) = test_app();
    let now = Utc::now();
    let mut entries = Vec::new();
    let resources: Vec<String> = (0..12).map(|i| format!("service-{i:02}")).collect();
    for (i, resource) in resources.iter().enumerate() {
        for _ in 0..=i {
            entries.push(("info", resource.as_str(), now));
        }
    }
    ingest_all(&app, &entries).await;

    let (_, response) = get(app, "/logs/analytics").await;

    let top = response["topResources"].as_array().unwrap();
    assert_eq!(top.len(), 10);
    assert_eq!(top[0], json!({"resourceId": "service-11", "count": 12}));
    assert_eq!(top[9], json!({"resourceId": "service-02", "count": 3}));
    let counts: Vec<u64> = top.iter().map(|r| r["count"].as_u64().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_analytics_respects_filter() {
    let (app, _state) = test_app();
    let now = Utc::now();
    ingest_all(
        &app,
        &[
            ("error", "server-prod-01", now - Duration::hours(2)),
            ("error", "server-prod-01", now - Duration::minutes(10)),
            ("warn", "server-prod-02", now - Duration::minutes(5)),
        ],
    )
    .await;

    let uri = format!(
        "/logs/analytics?level=error&{}",
        param("timestamp_start", &iso(now - Duration::hours(1)))
    );
    let (status, response) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["totalLogs"], 1);
    assert_eq!(response["logsByLevel"], json!({"error": 1}));
    assert_eq!(
        response["topResources"],
        json!([{"resourceId": "server-prod-01", "count": 1}])
    );
}
