//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::config::{Config, StorageKind};
use shared::notify::LogNotifier;
use shared::storage::{InMemoryLogStore, JsonFileLogStore, LogStore};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the log storage backend and the notification channel new entries
/// are published on.
#[derive(Clone)]
pub struct AppState {
    /// The log storage backend.
    log_store: Arc<dyn LogStore>,
    /// Publisher for real-time subscribers.
    notifier: LogNotifier,
}

impl AppState {
    /// Creates a new application state with the given store and notifier.
    pub fn new(log_store: Arc<dyn LogStore>, notifier: LogNotifier) -> Self {
        Self {
            log_store,
            notifier,
        }
    }

    /// Creates a new application state with an in-memory store.
    ///
    /// This is useful for development and testing.
    #[must_use]
    pub fn with_in_memory_store() -> Self {
        Self::new(Arc::new(InMemoryLogStore::new()), LogNotifier::default())
    }

    /// Creates the application state described by `config`.
    ///
    /// The file backend makes sure its backing file exists.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let log_store: Arc<dyn LogStore> = match config.storage {
            StorageKind::File => {
                tracing::info!(path = %config.data_path.display(), "Using JSON file log store");
                Arc::new(JsonFileLogStore::open(&config.data_path))
            }
            StorageKind::Memory => {
                tracing::info!("Using in-memory log store");
                Arc::new(InMemoryLogStore::new())
            }
        };
        Self::new(log_store, LogNotifier::default())
    }

    /// Returns a reference to the log store.
    #[must_use]
    pub fn log_store(&self) -> &dyn LogStore {
        self.log_store.as_ref()
    }

    /// Returns a shared handle to the log store, for use off the async runtime.
    #[must_use]
    pub fn log_store_handle(&self) -> Arc<dyn LogStore> {
        Arc::clone(&self.log_store)
    }

    /// Returns the notification channel.
    #[must_use]
    pub fn notifier(&self) -> &LogNotifier {
        &self.notifier
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_in_memory_store()
    }
}
