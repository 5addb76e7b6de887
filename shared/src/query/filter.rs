//! Filter evaluation.

use crate::models::{LogEntry, LogFilter};

fn contains(value: &str, pattern: Option<&str>) -> bool {
    pattern.map_or(true, |p| value.contains(p))
}

/// Returns `true` if `entry` satisfies every constraint present in `filter`.
///
/// - `level` must equal the entry level name exactly.
/// - `message` is a case-insensitive substring match.
/// - `resource_id`, `trace_id`, `span_id` and `commit` are case-sensitive
///   substring matches.
/// - `timestamp_start` and `timestamp_end` are inclusive bounds.
#[must_use]
pub fn matches(entry: &LogEntry, filter: &LogFilter) -> bool {
    if let Some(ref level) = filter.level {
        if entry.level.as_str() != level {
            return false;
        }
    }

    if let Some(ref pattern) = filter.message {
        if !entry
            .message
            .to_lowercase()
            .contains(&pattern.to_lowercase())
        {
            return false;
        }
    }

    if let Some(start) = filter.timestamp_start {
        if entry.timestamp < start {
            return false;
        }
    }
    if let Some(end) = filter.timestamp_end {
        if entry.timestamp > end {
            return false;
        }
    }

    contains(&entry.resource_id, filter.resource_id.as_deref())
        && contains(&entry.trace_id, filter.trace_id.as_deref())
        && contains(&entry.span_id, filter.span_id.as_deref())
        && contains(&entry.commit, filter.commit.as_deref())
}
