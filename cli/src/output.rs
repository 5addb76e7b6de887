//! Terminal rendering of entries and analytics.

use chrono::SecondsFormat;
use shared::models::{LogAnalytics, LogEntry, LogLevel};

const BAR_WIDTH: usize = 40;

/// Renders an entry as one line.
pub fn format_log_line(entry: &LogEntry) -> String {
    format!(
        "{} {:<5} [{}] {} (trace={} span={} commit={})",
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        entry.level.as_str().to_uppercase(),
        entry.resource_id,
        entry.message,
        entry.trace_id,
        entry.span_id,
        entry.commit,
    )
}

/// Renders an analytics report as a multi-line summary.
pub fn format_analytics(analytics: &LogAnalytics) -> String {
    let mut lines = vec![
        format!("Total logs: {}", analytics.total_logs),
        String::new(),
        "By level:".to_string(),
    ];
    lines.extend(LogLevel::ALL.iter().map(|level| {
        let count = analytics.logs_by_level.get(level).copied().unwrap_or(0);
        format!("  {:<5} {count}", level.as_str())
    }));

    lines.push(String::new());
    lines.push("Top resources:".to_string());
    if analytics.top_resources.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(
        analytics
            .top_resources
            .iter()
            .map(|resource| format!("  {:<30} {}", resource.resource_id, resource.count)),
    );

    lines.push(String::new());
    lines.push("Last 24 hours:".to_string());
    let peak = analytics
        .logs_by_hour
        .iter()
        .map(|h| h.count)
        .max()
        .unwrap_or(0);
    lines.extend(analytics.logs_by_hour.iter().map(|slot| {
        let bar = if peak == 0 {
            0
        } else {
            (slot.count * BAR_WIDTH).div_ceil(peak)
        };
        format!("  {} {:>5} {}", slot.hour, slot.count, "#".repeat(bar))
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
