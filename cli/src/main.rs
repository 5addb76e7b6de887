//! Logview CLI
//!
//! Command-line client for the Logview real-time log viewer.
//!
//! # Usage
//!
//! ```bash
//! logview --help
//! logview health
//! logview logs --resource-id prod --level error
//! logview analytics --timestamp-start 2024-01-15T00:00:00Z
//! logview ingest --level info --message "Deployed" --resource-id web-01 \
//!     --trace-id t-1 --span-id s-1 --commit a1b2c3d4 --metadata '{"version": "1.2.0"}'
//! logview seed
//! logview tail --level error
//! ```

#![deny(unsafe_code)]

mod client;
mod output;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use client::ApiClient;
use futures_util::StreamExt;
use serde_json::{json, Map, Value};
use shared::models::{LogFilter, LogFilterParams};
use shared::notify::LogEvent;
use shared::query::matches;
use shared::sample::sample_logs;
use tokio_tungstenite::tungstenite::Message;
use tracing_subscriber::EnvFilter;

/// Logview CLI - real-time log viewer command-line interface
#[derive(Parser)]
#[command(name = "logview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "LOGVIEW_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,
    /// List log entries, most recent first
    Logs(FilterArgs),
    /// Show analytics over the filtered entries
    Analytics(FilterArgs),
    /// Ingest a single log entry
    Ingest(IngestArgs),
    /// Ingest a set of sample entries
    Seed,
    /// Stream new entries as they are ingested
    Tail(FilterArgs),
}

/// Filter flags shared by the query commands.
#[derive(Args, Debug, Default, Clone)]
struct FilterArgs {
    /// Exact level (error, warn, info, debug)
    #[arg(long)]
    level: Option<String>,
    /// Case-insensitive message substring
    #[arg(long)]
    message: Option<String>,
    /// Resource ID substring
    #[arg(long)]
    resource_id: Option<String>,
    /// Earliest timestamp (ISO-8601, inclusive)
    #[arg(long)]
    timestamp_start: Option<String>,
    /// Latest timestamp (ISO-8601, inclusive)
    #[arg(long)]
    timestamp_end: Option<String>,
    /// Trace ID substring
    #[arg(long)]
    trace_id: Option<String>,
    /// Span ID substring
    #[arg(long)]
    span_id: Option<String>,
    /// Commit substring
    #[arg(long)]
    commit: Option<String>,
}

impl From<FilterArgs> for LogFilterParams {
    fn from(args: FilterArgs) -> Self {
        Self {
            level: args.level,
            message: args.message,
            resource_id: args.resource_id,
            timestamp_start: args.timestamp_start,
            timestamp_end: args.timestamp_end,
            trace_id: args.trace_id,
            span_id: args.span_id,
            commit: args.commit,
        }
    }
}

/// Fields of a log entry to ingest.
#[derive(Args, Debug)]
struct IngestArgs {
    /// Level (error, warn, info, debug)
    #[arg(long)]
    level: String,
    /// Message text
    #[arg(long)]
    message: String,
    /// Emitting resource
    #[arg(long)]
    resource_id: String,
    /// Trace ID
    #[arg(long)]
    trace_id: String,
    /// Span ID
    #[arg(long)]
    span_id: String,
    /// Commit hash
    #[arg(long)]
    commit: String,
    /// Event time (ISO-8601); defaults to now
    #[arg(long)]
    timestamp: Option<String>,
    /// Metadata as a JSON object
    #[arg(long, default_value = "{}")]
    metadata: String,
}

impl IngestArgs {
    /// Builds the wire payload. The server performs the full validation.
    fn into_payload(self) -> Result<Value> {
        let metadata: Map<String, Value> = serde_json::from_str(&self.metadata)
            .context("--metadata must be a JSON object")?;
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        Ok(json!({
            "level": self.level,
            "message": self.message,
            "resourceId": self.resource_id,
            "timestamp": timestamp,
            "traceId": self.trace_id,
            "spanId": self.span_id,
            "commit": self.commit,
            "metadata": metadata,
        }))
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn health(client: &ApiClient, json: bool) -> Result<()> {
    let health = client.health().await?;
    if json {
        return print_json(&json!({"status": health.status, "timestamp": health.timestamp}));
    }
    println!(
        "Logview API at {} is {} ({})",
        client.base_url(),
        health.status,
        health.timestamp
    );
    Ok(())
}

async fn logs(client: &ApiClient, filter: FilterArgs, json: bool) -> Result<()> {
    let logs = client.query_logs(&filter.into()).await?;
    if json {
        return print_json(&logs);
    }
    for entry in &logs {
        println!("{}", output::format_log_line(entry));
    }
    println!("{} entries", logs.len());
    Ok(())
}

async fn analytics(client: &ApiClient, filter: FilterArgs, json: bool) -> Result<()> {
    let analytics = client.analytics(&filter.into()).await?;
    if json {
        return print_json(&analytics);
    }
    print!("{}", output::format_analytics(&analytics));
    Ok(())
}

async fn ingest(client: &ApiClient, args: IngestArgs, json: bool) -> Result<()> {
    let stored = client.ingest(&args.into_payload()?).await?;
    if json {
        return print_json(&stored);
    }
    println!("Stored: {}", output::format_log_line(&stored));
    Ok(())
}

async fn seed(client: &ApiClient) -> Result<()> {
    println!("Seeding sample logs...");
    let mut failed = 0usize;

    for log in sample_logs(Utc::now()) {
        let summary: String = log.message.chars().take(50).collect();
        match client.ingest(&serde_json::to_value(&log)?).await {
            Ok(_) => println!("✓ Added {} log: {summary}...", log.level),
            Err(e) => {
                failed += 1;
                eprintln!("✗ Failed to add log: {e:#}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} sample logs could not be added");
    }
    println!("Seeding completed!");
    Ok(())
}

async fn tail(client: &ApiClient, filter: FilterArgs, json: bool) -> Result<()> {
    let filter = LogFilter::try_from(LogFilterParams::from(filter))?;
    let url = client.ws_url()?;
    let (mut socket, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;

    tracing::info!(%url, "Streaming new log entries");
    eprintln!("Streaming new log entries from {url} (Ctrl+C to stop)");

    loop {
        let message = tokio::select! {
            message = socket.next() => message,
            _ = tokio::signal::ctrl_c() => break,
        };

        let text = match message {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Close(_))) | None => {
                eprintln!("Server closed the connection");
                break;
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e).context("WebSocket stream failed"),
        };

        match serde_json::from_str::<LogEvent>(&text) {
            Ok(LogEvent::NewLog(entry)) if matches(&entry, &filter) => {
                if json {
                    println!("{}", serde_json::to_string(&entry)?);
                } else {
                    println!("{}", output::format_log_line(&entry));
                }
            }
            Ok(LogEvent::NewLog(_)) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring unrecognized event"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Some(Commands::Health) => health(&client, cli.json).await,
        Some(Commands::Logs(filter)) => logs(&client, filter, cli.json).await,
        Some(Commands::Analytics(filter)) => analytics(&client, filter, cli.json).await,
        Some(Commands::Ingest(args)) => ingest(&client, args, cli.json).await,
        Some(Commands::Seed) => seed(&client).await,
        Some(Commands::Tail(filter)) => tail(&client, filter, cli.json).await,
        None => {
            println!("Logview CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
