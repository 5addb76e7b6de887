//! Log analytics model.
//!
//! [`LogAnalytics`] is derived data: it is recomputed from a filtered entry
//! set on every request and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::LogLevel;

/// Number of hourly buckets in the histogram.
pub const HISTOGRAM_HOURS: usize = 24;

/// Maximum number of entries in [`LogAnalytics::top_resources`].
pub const TOP_RESOURCES_LIMIT: usize = 10;

/// Aggregate statistics over a filtered set of log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAnalytics {
    /// Number of entries in the filtered set.
    pub total_logs: usize,

    /// Entry count per level. Levels with no entries are absent.
    pub logs_by_level: BTreeMap<LogLevel, usize>,

    /// Exactly [`HISTOGRAM_HOURS`] contiguous hourly buckets, oldest first.
    pub logs_by_hour: Vec<HourlyCount>,

    /// Most frequent resources, highest count first.
    pub top_resources: Vec<ResourceCount>,
}

/// One hour-wide histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    /// Bucket start truncated to the hour, e.g. `2024-01-15T10:00:00.000Z`.
    pub hour: String,
    /// Number of entries whose timestamp falls inside the bucket.
    pub count: usize,
}

/// Entry count for a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCount {
    /// The resource ID.
    pub resource_id: String,
    /// Number of entries emitted by the resource.
    pub count: usize,
}
