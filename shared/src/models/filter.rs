//! Log filter model.
//!
//! A [`LogFilter`] is the typed predicate set evaluated by the filter engine.
//! [`LogFilterParams`] is its wire form: the raw query-string parameters
//! accepted by `GET /logs` and `GET /logs/analytics`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{parse_timestamp, ValidationError};

/// Filter applied to log entries.
///
/// Every field is optional; `None` means "no constraint on this field".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    /// Exact level name. A name that is not a known level matches nothing.
    pub level: Option<String>,

    /// Case-insensitive substring of the message.
    pub message: Option<String>,

    /// Substring of the resource ID.
    pub resource_id: Option<String>,

    /// Inclusive lower bound on the entry timestamp.
    pub timestamp_start: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the entry timestamp.
    pub timestamp_end: Option<DateTime<Utc>>,

    /// Substring of the trace ID.
    pub trace_id: Option<String>,

    /// Substring of the span ID.
    pub span_id: Option<String>,

    /// Substring of the commit hash.
    pub commit: Option<String>,
}

impl LogFilter {
    /// Creates an empty filter (matches every entry).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level filter.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the message filter (case-insensitive substring match).
    #[must_use]
    pub fn with_message(mut self, pattern: impl Into<String>) -> Self {
        self.message = Some(pattern.into());
        self
    }

    /// Sets the resource ID filter (substring match).
    #[must_use]
    pub fn with_resource_id(mut self, pattern: impl Into<String>) -> Self {
        self.resource_id = Some(pattern.into());
        self
    }

    /// Sets the inclusive start of the time range.
    #[must_use]
    pub fn with_timestamp_start(mut self, start: DateTime<Utc>) -> Self {
        self.timestamp_start = Some(start);
        self
    }

    /// Sets the inclusive end of the time range.
    #[must_use]
    pub fn with_timestamp_end(mut self, end: DateTime<Utc>) -> Self {
        self.timestamp_end = Some(end);
        self
    }

    /// Sets the trace ID filter (substring match).
    #[must_use]
    pub fn with_trace_id(mut self, pattern: impl Into<String>) -> Self {
        self.trace_id = Some(pattern.into());
        self
    }

    /// Sets the span ID filter (substring match).
    #[must_use]
    pub fn with_span_id(mut self, pattern: impl Into<String>) -> Self {
        self.span_id = Some(pattern.into());
        self
    }

    /// Sets the commit filter (substring match).
    #[must_use]
    pub fn with_commit(mut self, pattern: impl Into<String>) -> Self {
        self.commit = Some(pattern.into());
        self
    }

    /// Returns `true` if no field is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw filter parameters as they appear in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilterParams {
    /// Level name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Message substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Resource ID substring.
    #[serde(
        default,
        rename = "resourceId",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_id: Option<String>,

    /// ISO-8601 lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_start: Option<String>,

    /// ISO-8601 upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_end: Option<String>,

    /// Trace ID substring.
    #[serde(default, rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Span ID substring.
    #[serde(default, rename = "spanId", skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,

    /// Commit substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Empty parameters carry no constraint.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bound(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    non_empty(value)
        .map(|raw| parse_timestamp(&raw).ok_or(ValidationError::InvalidTimestamp { field }))
        .transpose()
}

impl TryFrom<LogFilterParams> for LogFilter {
    type Error = ValidationError;

    /// Converts raw parameters into a typed filter.
    ///
    /// Timestamp bounds that are present but cannot be parsed are rejected.
    fn try_from(params: LogFilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            level: non_empty(params.level),
            message: non_empty(params.message),
            resource_id: non_empty(params.resource_id),
            timestamp_start: parse_bound("timestamp_start", params.timestamp_start)?,
            timestamp_end: parse_bound("timestamp_end", params.timestamp_end)?,
            trace_id: non_empty(params.trace_id),
            span_id: non_empty(params.span_id),
            commit: non_empty(params.commit),
        })
    }
}
