//! Logview Shared Library
//!
//! This crate contains the log model and the engine behind the Logview
//! server: validation, storage, filtering, analytics and real-time
//! notification of new entries.
//!
//! # Modules
//!
//! - [`models`] - Log entries, filters and analytics reports
//! - [`validation`] - Ingestion payload validation
//! - [`storage`] - Storage trait with JSON file and in-memory backends
//! - [`query`] - Filter matching, querying and analytics
//! - [`notify`] - Publish/subscribe channel for new entries
//! - [`ingest`] - The validate, store, notify pipeline
//! - [`sample`] - Sample entries for seeding
//!
//! # Example
//!
//! ```
//! use shared::models::{LogEntry, LogFilter, LogLevel};
//! use shared::query::execute_query;
//! use shared::storage::{InMemoryLogStore, LogStore};
//!
//! let store = InMemoryLogStore::new();
//! let log = LogEntry::new(LogLevel::Info, "User logged in", "auth-service")
//!     .with_trace_id("trace-abc")
//!     .with_span_id("span-login")
//!     .with_commit("a1b2c3d4")
//!     .with_metadata("user_id", "12345");
//! store.append(log).unwrap();
//!
//! let found = execute_query(&store, &LogFilter::new().with_resource_id("auth"));
//! assert_eq!(found.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ingest;
pub mod models;
pub mod notify;
pub mod query;
pub mod sample;
pub mod storage;
pub mod validation;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
