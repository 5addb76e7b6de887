//! Aggregate analytics over a filtered entry set.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};

use super::executor::execute_query;
use crate::models::{
    HourlyCount, LogAnalytics, LogEntry, LogFilter, ResourceCount, HISTOGRAM_HOURS,
    TOP_RESOURCES_LIMIT,
};
use crate::storage::LogStore;

/// Runs `filter` against `store` and summarizes the matching entries.
#[must_use]
pub fn analyze(store: &dyn LogStore, filter: &LogFilter) -> LogAnalytics {
    compute_analytics(&execute_query(store, filter), Utc::now())
}

/// Summarizes an already-filtered entry set.
///
/// The histogram covers `[now - 24h, now)` in one-hour buckets anchored at
/// `now - 24h` itself (not at an hour boundary). Entries outside the window
/// still count toward the total, level, and resource tallies.
#[must_use]
pub fn compute_analytics(entries: &[LogEntry], now: DateTime<Utc>) -> LogAnalytics {
    let mut logs_by_level = BTreeMap::new();
    let mut resource_counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *logs_by_level.entry(entry.level).or_insert(0) += 1;
        *resource_counts.entry(entry.resource_id.as_str()).or_insert(0) += 1;
    }

    LogAnalytics {
        total_logs: entries.len(),
        logs_by_level,
        logs_by_hour: hourly_histogram(entries, now),
        top_resources: top_resources(resource_counts),
    }
}

fn hourly_histogram(entries: &[LogEntry], now: DateTime<Utc>) -> Vec<HourlyCount> {
    let hours = i64::try_from(HISTOGRAM_HOURS).unwrap_or(i64::MAX);
    let anchor = now - Duration::hours(hours);
    let window_end = anchor + Duration::hours(hours);

    let mut counts = [0usize; HISTOGRAM_HOURS];
    for entry in entries {
        if entry.timestamp < anchor || entry.timestamp >= window_end {
            continue;
        }
        let offset_hours = (entry.timestamp - anchor).num_seconds() / 3600;
        if let Some(slot) = usize::try_from(offset_hours)
            .ok()
            .and_then(|i| counts.get_mut(i))
        {
            *slot += 1;
        }
    }

    counts
        .iter()
        .zip(0i64..)
        .map(|(&count, i)| HourlyCount {
            hour: (anchor + Duration::hours(i))
                .format("%Y-%m-%dT%H:00:00.000Z")
                .to_string(),
            count,
        })
        .collect()
}

fn top_resources(counts: HashMap<&str, usize>) -> Vec<ResourceCount> {
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Ties are ordered by resource ID so the ranking is stable across calls.
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_RESOURCES_LIMIT);
    ranked
        .into_iter()
        .map(|(resource_id, count)| ResourceCount {
            resource_id: resource_id.to_string(),
            count,
        })
        .collect()
}
