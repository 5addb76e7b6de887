//! Ingestion payload validation.
//!
//! Turns an untrusted JSON document into a [`LogEntry`], checking fields in
//! wire order and stopping at the first violation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{LogEntry, LogLevel};

/// Fields accepted in an ingestion payload, in validation order.
pub const LOG_ENTRY_FIELDS: [&str; 8] = [
    "level",
    "message",
    "resourceId",
    "timestamp",
    "traceId",
    "spanId",
    "commit",
    "metadata",
];

/// The first rule an ingestion payload or filter parameter violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload is not a JSON object.
    #[error("\"value\" must be of type object")]
    NotAnObject,

    /// A required field is missing or null.
    #[error("\"{field}\" is required")]
    Required {
        /// Field name.
        field: &'static str,
    },

    /// A text field holds a non-string value.
    #[error("\"{field}\" must be a string")]
    NotAString {
        /// Field name.
        field: &'static str,
    },

    /// A text field is an empty string.
    #[error("\"{field}\" is not allowed to be empty")]
    Empty {
        /// Field name.
        field: &'static str,
    },

    /// The level is not one of the known levels.
    #[error("\"level\" must be one of [error, warn, info, debug]")]
    InvalidLevel,

    /// A filter bound could not be parsed as an ISO-8601 instant.
    #[error("\"{field}\" must be in ISO 8601 date format")]
    InvalidTimestamp {
        /// Parameter name.
        field: &'static str,
    },

    /// An ingested timestamp string is not an ISO-8601 date.
    #[error("\"{field}\" must be in iso format")]
    NotIsoDate {
        /// Field name.
        field: &'static str,
    },

    /// The metadata is not a JSON object.
    #[error("\"metadata\" must be of type object")]
    InvalidMetadata,

    /// The payload carries a field outside the log entry shape.
    #[error("\"{field}\" is not allowed")]
    UnknownField {
        /// Field name.
        field: String,
    },
}

/// Date-time layouts without an offset, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 instant.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00.000Z`, `2024-01-15T12:30:00+02:00`),
/// minute precision with or without an offset (`2024-01-15T10:30`,
/// `2024-01-15T10:30Z`, `2024-01-15T12:30+02:00`), a date-time without offset
/// (read as UTC), and a bare date (midnight UTC).
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Some(ts.with_timezone(&Utc));
    }
    let local = value.strip_suffix(['Z', 'z']).unwrap_or(value);
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Required { field }),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Empty { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}

/// Validates an ingestion payload and builds the entry it describes.
///
/// # Errors
///
/// Returns the first violation found, checking the fields in
/// [`LOG_ENTRY_FIELDS`] order and unknown fields last.
///
/// # Example
///
/// ```
/// use shared::validation::{validate_log_entry, ValidationError};
///
/// let payload = serde_json::json!({ "level": "info", "message": "" });
/// let err = validate_log_entry(&payload).unwrap_err();
/// assert_eq!(err, ValidationError::Empty { field: "message" });
/// assert_eq!(err.to_string(), "\"message\" is not allowed to be empty");
/// ```
pub fn validate_log_entry(raw: &Value) -> Result<LogEntry, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let level = required_str(object, "level")?
        .parse::<LogLevel>()
        .map_err(|_| ValidationError::InvalidLevel)?;
    let message = required_str(object, "message")?;
    let resource_id = required_str(object, "resourceId")?;
    let timestamp = parse_timestamp(required_str(object, "timestamp")?)
        .ok_or(ValidationError::NotIsoDate { field: "timestamp" })?
        .trunc_subsecs(3);
    let trace_id = required_str(object, "traceId")?;
    let span_id = required_str(object, "spanId")?;
    let commit = required_str(object, "commit")?;
    let metadata = match object.get("metadata") {
        None | Some(Value::Null) => return Err(ValidationError::Required { field: "metadata" }),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        Some(_) => return Err(ValidationError::InvalidMetadata),
    };

    if let Some(unknown) = object
        .keys()
        .find(|key| !LOG_ENTRY_FIELDS.contains(&key.as_str()))
    {
        return Err(ValidationError::UnknownField {
            field: unknown.clone(),
        });
    }

    Ok(LogEntry {
        level,
        message: message.to_string(),
        resource_id: resource_id.to_string(),
        timestamp,
        trace_id: trace_id.to_string(),
        span_id: span_id.to_string(),
        commit: commit.to_string(),
        metadata,
    })
}
