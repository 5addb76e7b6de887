//! Log data model.
//!
//! Defines the core `LogEntry` structure for storing and transmitting log data.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug information.
    Debug,
    /// Informational messages.
    Info,
    /// Warning conditions.
    Warn,
    /// Error conditions.
    Error,
}

impl LogLevel {
    /// All levels, in the order they are listed to clients.
    pub const ALL: [LogLevel; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Returns the wire name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a log level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// A log entry representing a single log event.
///
/// Entries are immutable once stored: the store only ever appends them, and
/// every query hands out clones.
///
/// # Example
///
/// ```
/// use shared::models::{LogEntry, LogLevel};
///
/// let log = LogEntry::new(LogLevel::Error, "Database connection failed", "server-prod-01")
///     .with_trace_id("trace-001")
///     .with_span_id("span-db-connect")
///     .with_commit("a1b2c3d4")
///     .with_metadata("retryAttempts", 3);
///
/// assert!(log.validate_entry().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Severity level of the log.
    pub level: LogLevel,

    /// The log message content.
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,

    /// Identifier of the resource (host, service instance) that emitted the log.
    #[validate(length(min = 1, message = "Resource ID cannot be empty"))]
    pub resource_id: String,

    /// Timestamp when the log event occurred, written with millisecond precision.
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,

    /// Trace ID for distributed tracing correlation.
    #[validate(length(min = 1, message = "Trace ID cannot be empty"))]
    pub trace_id: String,

    /// Span ID for distributed tracing correlation.
    #[validate(length(min = 1, message = "Span ID cannot be empty"))]
    pub span_id: String,

    /// Commit hash of the code that emitted the log.
    #[validate(length(min = 1, message = "Commit cannot be empty"))]
    pub commit: String,

    /// Free-form metadata attached to the entry.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Errors that can occur during log entry validation.
#[derive(Debug, Error)]
pub enum LogValidationError {
    /// A required text field is empty.
    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl LogEntry {
    /// Creates a new log entry with the current timestamp.
    ///
    /// The correlation fields (`trace_id`, `span_id`, `commit`) start out empty
    /// and must be set before the entry passes [`LogEntry::validate_entry`].
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            resource_id: resource_id.into(),
            timestamp: Utc::now(),
            trace_id: String::new(),
            span_id: String::new(),
            commit: String::new(),
            metadata: HashMap::new(),
        }
    }

    /// Sets the timestamp of the entry.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Sets the span ID.
    #[must_use]
    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = span_id.into();
        self
    }

    /// Sets the commit hash.
    #[must_use]
    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = commit.into();
        self
    }

    /// Adds a metadata value to the log entry.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::models::{LogEntry, LogLevel};
    ///
    /// let log = LogEntry::new(LogLevel::Info, "Request processed", "api")
    ///     .with_metadata("request_id", "abc-123")
    ///     .with_metadata("duration_ms", 150);
    ///
    /// assert!(log.metadata.contains_key("request_id"));
    /// ```
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.metadata.insert(
            key.into(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
        self
    }

    /// Validates the log entry.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first empty text field, in wire order.
    pub fn validate_entry(&self) -> Result<(), LogValidationError> {
        let fields = [
            ("message", &self.message),
            ("resourceId", &self.resource_id),
            ("traceId", &self.trace_id),
            ("spanId", &self.span_id),
            ("commit", &self.commit),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(LogValidationError::EmptyField(*name));
        }
        self.validate()?;
        Ok(())
    }
}
