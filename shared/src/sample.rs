//! Representative sample entries for seeding a fresh installation.

use chrono::{DateTime, Duration, Utc};

use crate::models::{LogEntry, LogLevel};

/// Builds the sample entries, timestamped relative to `now`.
///
/// The entries cover every level and five distinct resources, spread over the
/// last half hour, oldest first.
#[must_use]
pub fn sample_logs(now: DateTime<Utc>) -> Vec<LogEntry> {
    vec![
        LogEntry::new(
            LogLevel::Error,
            "Database connection failed: Connection timeout after 30 seconds",
            "server-prod-01",
        )
        .with_timestamp(now - Duration::minutes(30))
        .with_trace_id("trace-001-error")
        .with_span_id("span-db-connect")
        .with_commit("a1b2c3d4")
        .with_metadata("database", "postgresql")
        .with_metadata("host", "db.example.com")
        .with_metadata("port", 5432)
        .with_metadata("retryAttempts", 3),
        LogEntry::new(
            LogLevel::Warn,
            "High memory usage detected: 85% of available memory in use",
            "server-prod-02",
        )
        .with_timestamp(now - Duration::minutes(15))
        .with_trace_id("trace-002-warn")
        .with_span_id("span-memory-check")
        .with_commit("e5f6g7h8")
        .with_metadata("memoryUsage", "85%")
        .with_metadata("availableMemory", "16GB")
        .with_metadata("usedMemory", "13.6GB")
        .with_metadata("threshold", "80%"),
        LogEntry::new(LogLevel::Info, "User authentication successful", "auth-service-01")
            .with_timestamp(now - Duration::minutes(5))
            .with_trace_id("trace-003-info")
            .with_span_id("span-auth-login")
            .with_commit("i9j0k1l2")
            .with_metadata("userId", "user-12345")
            .with_metadata("email", "john.doe@example.com")
            .with_metadata("loginMethod", "oauth")
            .with_metadata("provider", "google"),
        LogEntry::new(LogLevel::Debug, "Cache hit for user profile data", "cache-service-01")
            .with_timestamp(now - Duration::minutes(2))
            .with_trace_id("trace-004-debug")
            .with_span_id("span-cache-get")
            .with_commit("m3n4o5p6")
            .with_metadata("cacheKey", "user:profile:12345")
            .with_metadata("ttl", 3600)
            .with_metadata("hitRate", "92%"),
        LogEntry::new(
            LogLevel::Error,
            "Payment processing failed: Invalid credit card number",
            "payment-service-01",
        )
        .with_timestamp(now - Duration::minutes(1))
        .with_trace_id("trace-005-error")
        .with_span_id("span-payment-process")
        .with_commit("q7r8s9t0")
        .with_metadata("orderId", "order-67890")
        .with_metadata("amount", 99.99)
        .with_metadata("currency", "USD")
        .with_metadata("errorCode", "INVALID_CARD"),
    ]
}
