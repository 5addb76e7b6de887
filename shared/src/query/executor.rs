//! Query execution.

use super::filter::matches;
use crate::models::{LogEntry, LogFilter};
use crate::storage::LogStore;

/// Keeps the entries matching `filter`, ordered by timestamp, most recent first.
///
/// Entries with equal timestamps have no guaranteed relative order.
#[must_use]
pub fn filter_entries(entries: Vec<LogEntry>, filter: &LogFilter) -> Vec<LogEntry> {
    let mut filtered: Vec<LogEntry> = entries
        .into_iter()
        .filter(|entry| matches(entry, filter))
        .collect();
    filtered.sort_unstable_by(|a, b| b.timestamp.cmp(&a.timestamp));
    filtered
}

/// Reads every entry from `store` and returns those matching `filter`,
/// most recent first.
///
/// Never fails: an unreadable store or a filter that matches nothing yields
/// an empty result.
#[must_use]
pub fn execute_query(store: &dyn LogStore, filter: &LogFilter) -> Vec<LogEntry> {
    let entries = store.read_all();
    let scanned = entries.len();
    let result = filter_entries(entries, filter);

    tracing::debug!(scanned, matched = result.len(), "Log query executed");
    result
}
