//! Log query and analytics engine.
//!
//! - [`matches`] evaluates a [`LogFilter`](crate::models::LogFilter) against
//!   one entry.
//! - [`execute_query`] reads a store, keeps the matching entries, and orders
//!   them most recent first.
//! - [`analyze`] summarizes the result of a query.
//!
//! # Example
//!
//! ```
//! use shared::models::{LogEntry, LogFilter, LogLevel};
//! use shared::query::{analyze, execute_query};
//! use shared::storage::{InMemoryLogStore, LogStore};
//!
//! let store = InMemoryLogStore::new();
//! for (level, resource) in [(LogLevel::Error, "db-01"), (LogLevel::Info, "web-01")] {
//!     let log = LogEntry::new(level, "Something happened", resource)
//!         .with_trace_id("trace-1")
//!         .with_span_id("span-1")
//!         .with_commit("abc123");
//!     store.append(log).unwrap();
//! }
//!
//! let errors = execute_query(&store, &LogFilter::new().with_level("error"));
//! assert_eq!(errors.len(), 1);
//!
//! let analytics = analyze(&store, &LogFilter::new());
//! assert_eq!(analytics.total_logs, 2);
//! ```

mod analytics;
mod executor;
mod filter;

pub use analytics::{analyze, compute_analytics};
pub use executor::{execute_query, filter_entries};
pub use filter::matches;
