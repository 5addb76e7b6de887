//! Data models for the Logview log viewer.
//!
//! This module contains the log entry, the filter applied to it, and the
//! analytics derived from filtered entries.

pub mod analytics;
pub mod filter;
pub mod log;

pub use analytics::{HourlyCount, LogAnalytics, ResourceCount, HISTOGRAM_HOURS, TOP_RESOURCES_LIMIT};
pub use filter::{LogFilter, LogFilterParams};
pub use log::{LogEntry, LogLevel, LogValidationError, UnknownLevel};
