//! Storage traits and implementations.
//!
//! The `LogStore` trait defines the interface for log storage, allowing
//! different implementations (JSON file, in-memory) to be swapped without
//! touching the query and analytics logic.

pub mod file_store;
pub mod log_store;

pub use file_store::JsonFileLogStore;
pub use log_store::{InMemoryLogStore, LogStore, LogStoreError};
