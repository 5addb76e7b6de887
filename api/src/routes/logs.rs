//! Log ingestion, query and analytics endpoints.
//!
//! The store is synchronous, so every handler hands its work to the blocking
//! thread pool.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use shared::ingest::ingest;
use shared::models::{LogAnalytics, LogEntry, LogFilter, LogFilterParams};
use shared::query::{analyze, execute_query};

/// Creates the log routes with application state.
pub fn logs_routes(state: AppState) -> Router {
    Router::new()
        .route("/logs", post(ingest_log).get(query_logs))
        .route("/logs/analytics", get(log_analytics))
        .with_state(state)
}

fn parse_filter(params: Result<Query<LogFilterParams>, QueryRejection>) -> ApiResult<LogFilter> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(LogFilter::try_from(params)?)
}

/// Handler for log ingestion.
///
/// Returns 201 Created with the stored entry, 400 Bad Request naming the
/// first violated rule.
async fn ingest_log(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LogEntry>)> {
    let Json(raw) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Malformed log payload");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;

    let store = state.log_store_handle();
    let notifier = state.notifier().clone();
    let stored =
        tokio::task::spawn_blocking(move || ingest(store.as_ref(), &notifier, &raw)).await??;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Handler for log queries.
///
/// Returns the matching entries, most recent first.
async fn query_logs(
    State(state): State<AppState>,
    params: Result<Query<LogFilterParams>, QueryRejection>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let filter = parse_filter(params)?;

    let store = state.log_store_handle();
    let logs = tokio::task::spawn_blocking(move || execute_query(store.as_ref(), &filter)).await?;

    tracing::debug!(returned = logs.len(), "Log query executed");
    Ok(Json(logs))
}

/// Handler for log analytics over the filtered entries.
async fn log_analytics(
    State(state): State<AppState>,
    params: Result<Query<LogFilterParams>, QueryRejection>,
) -> ApiResult<Json<LogAnalytics>> {
    let filter = parse_filter(params)?;

    let store = state.log_store_handle();
    let analytics = tokio::task::spawn_blocking(move || analyze(store.as_ref(), &filter)).await?;

    Ok(Json(analytics))
}
