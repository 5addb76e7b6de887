//! Ingestion path: validate, store, notify.

use serde_json::Value;
use thiserror::Error;

use crate::models::LogEntry;
use crate::notify::{LogEvent, LogNotifier};
use crate::storage::{LogStore, LogStoreError};
use crate::validation::{validate_log_entry, ValidationError};

/// Errors that can occur while ingesting a log entry.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload violated a validation rule. Nothing was stored.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The entry was valid but could not be stored. Nothing was published.
    #[error("Failed to store log entry: {0}")]
    Storage(#[from] LogStoreError),
}

/// Validates a raw payload, appends it to the store and notifies subscribers.
///
/// Subscribers hear about an entry only after it has been stored.
///
/// # Errors
///
/// Returns [`IngestError::Validation`] for an invalid payload and
/// [`IngestError::Storage`] when the store rejects the append.
pub fn ingest(
    store: &dyn LogStore,
    notifier: &LogNotifier,
    raw: &Value,
) -> Result<LogEntry, IngestError> {
    let entry = validate_log_entry(raw).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected log entry");
    })?;

    let stored = store.append(entry)?;
    let receivers = notifier.publish(LogEvent::NewLog(stored.clone()));

    tracing::info!(
        level = %stored.level,
        resource_id = %stored.resource_id,
        receivers,
        "Log entry ingested"
    );
    Ok(stored)
}
