//! Log storage trait and in-memory implementation.
//!
//! Provides the `LogStore` trait for abstracting log storage operations
//! and an `InMemoryLogStore` implementation for development and testing.

use crate::models::{LogEntry, LogValidationError};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during log store operations.
#[derive(Debug, Error)]
pub enum LogStoreError {
    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on log store")]
    LockError,

    /// The backing file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Backing file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not contain a JSON array of log entries.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Backing file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The backing file could not be rewritten.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Backing file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The entries could not be serialized.
    #[error("Failed to serialize log entries: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The entry does not satisfy the log entry invariants.
    #[error("Refusing to store invalid log entry: {0}")]
    InvalidEntry(#[from] LogValidationError),
}

impl LogStoreError {
    /// Returns `true` for failures that happen while loading stored entries.
    #[must_use]
    pub fn is_read_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

/// Trait for log storage implementations.
///
/// Stores are append-only: entries are never mutated or removed once stored.
/// Implementations must be thread-safe (Send + Sync).
pub trait LogStore: Send + Sync {
    /// Returns every stored entry in insertion order.
    ///
    /// Never fails: a store whose contents cannot be loaded reports no entries.
    fn read_all(&self) -> Vec<LogEntry>;

    /// Appends an entry and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is invalid or the storage operation fails.
    fn append(&self, entry: LogEntry) -> Result<LogEntry, LogStoreError>;
}

/// In-memory log store implementation.
///
/// This implementation stores logs in a `Vec` protected by a `RwLock`.
/// It is suitable for development and testing.
///
/// **Note:** Data is not persisted across restarts.
///
/// # Example
///
/// ```
/// use shared::storage::{InMemoryLogStore, LogStore};
/// use shared::models::{LogEntry, LogLevel};
///
/// let store = InMemoryLogStore::new();
///
/// let log = LogEntry::new(LogLevel::Info, "Test message", "server-01")
///     .with_trace_id("trace-1")
///     .with_span_id("span-1")
///     .with_commit("abc123");
/// store.append(log).unwrap();
///
/// assert_eq!(store.read_all().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogStore {
    logs: Arc<RwLock<Vec<LogEntry>>>,
}

impl InMemoryLogStore {
    /// Creates a new empty in-memory log store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory log store wrapped in an Arc.
    ///
    /// This is useful when sharing the store across multiple handlers.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            logs: Arc::new(RwLock::new(entries)),
        }
    }
}

impl LogStore for InMemoryLogStore {
    fn read_all(&self) -> Vec<LogEntry> {
        match self.logs.read() {
            Ok(logs) => logs.clone(),
            Err(_) => {
                tracing::warn!("Log store lock poisoned, reporting no entries");
                Vec::new()
            }
        }
    }

    fn append(&self, entry: LogEntry) -> Result<LogEntry, LogStoreError> {
        entry.validate_entry()?;
        let mut logs = self.logs.write().map_err(|_| LogStoreError::LockError)?;
        logs.push(entry.clone());
        Ok(entry)
    }
}
