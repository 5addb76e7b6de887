//! JSON file-backed log store.
//!
//! The whole entry sequence lives in one pretty-printed JSON array. Every
//! append rewrites the file: the new contents go to a temporary file in the
//! same directory which is then renamed over the target, so readers observe
//! either the previous or the next complete array.

use crate::models::LogEntry;
use crate::storage::{LogStore, LogStoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Log store persisting entries to a single JSON file.
///
/// Appends are serialized through an internal writer lock; reads never take
/// it.
///
/// # Example
///
/// ```
/// use shared::models::{LogEntry, LogLevel};
/// use shared::storage::{JsonFileLogStore, LogStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = JsonFileLogStore::new(dir.path().join("logs.json"));
///
/// let log = LogEntry::new(LogLevel::Warn, "Disk almost full", "server-01")
///     .with_trace_id("trace-1")
///     .with_span_id("span-1")
///     .with_commit("abc123");
/// store.append(log).unwrap();
///
/// assert_eq!(store.read_all().len(), 1);
/// ```
#[derive(Debug)]
pub struct JsonFileLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLogStore {
    /// Creates a store backed by `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store and makes sure the backing file exists.
    ///
    /// A file that cannot be created is logged and left for the first append
    /// to retry.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        if let Err(e) = store.ensure_file() {
            tracing::warn!(path = %store.path.display(), error = %e, "Could not initialize log file");
        }
        store
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty `[]` file if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn ensure_file(&self) -> Result<(), LogStoreError> {
        if self.path.exists() {
            return Ok(());
        }
        tracing::info!(path = %self.path.display(), "Creating empty log file");
        self.write_entries(&[])
    }

    fn load(&self) -> Result<Vec<LogEntry>, LogStoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LogStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| LogStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn write_entries(&self, entries: &[LogEntry]) -> Result<(), LogStoreError> {
        let write_error = |source: std::io::Error| LogStoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self.directory();
        fs::create_dir_all(dir).map_err(write_error)?;

        let json = serde_json::to_vec_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
        tmp.write_all(&json).map_err(write_error)?;
        tmp.as_file().sync_all().map_err(write_error)?;
        tmp.persist(&self.path).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}

impl LogStore for JsonFileLogStore {
    fn read_all(&self) -> Vec<LogEntry> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load log entries, reporting none");
            Vec::new()
        })
    }

    fn append(&self, entry: LogEntry) -> Result<LogEntry, LogStoreError> {
        entry.validate_entry()?;
        let _guard = self.write_lock.lock().map_err(|_| LogStoreError::LockError)?;

        let mut entries = self.read_all();
        entries.push(entry.clone());
        self.write_entries(&entries).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist log entry");
        })?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "Log file rewritten");
        Ok(entry)
    }
}
