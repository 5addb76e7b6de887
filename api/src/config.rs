//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Default path of the JSON file holding the stored entries.
pub const DEFAULT_DATA_PATH: &str = "data/logs.json";

/// Default maximum request body size (10 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// Entries persisted to a JSON file.
    #[default]
    File,
    /// Entries kept in memory only.
    Memory,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown storage kind '{other}', expected 'file' or 'memory'"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `LOGVIEW_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `LOGVIEW_PORT`: The port to listen on (default: 8000)
/// - `LOGVIEW_DATA_PATH`: The JSON file holding the entries (default: "data/logs.json")
/// - `LOGVIEW_STORAGE`: `file` or `memory` (default: "file")
/// - `LOGVIEW_FRONTEND_URL`: Origin allowed by CORS (default: "http://localhost:3000")
/// - `LOGVIEW_BODY_LIMIT_BYTES`: Maximum request body size (default: 10 MiB)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Path of the JSON file backing the file store.
    pub data_path: PathBuf,
    /// Which storage backend to use.
    pub storage: StorageKind,
    /// Origin allowed to call the API from a browser.
    pub frontend_url: String,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LOGVIEW_PORT` is set but cannot be parsed as a valid port number
    /// - `LOGVIEW_BODY_LIMIT_BYTES` is set but is not a number
    /// - `LOGVIEW_STORAGE` names an unknown backend
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env_var("LOGVIEW_HOST").unwrap_or(defaults.host);

        let port = env_var("LOGVIEW_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("LOGVIEW_PORT must be a valid port number")?
            .unwrap_or(defaults.port);

        let data_path = env_var("LOGVIEW_DATA_PATH").map_or(defaults.data_path, PathBuf::from);

        let storage = env_var("LOGVIEW_STORAGE")
            .map(|s| s.parse::<StorageKind>())
            .transpose()?
            .unwrap_or(defaults.storage);

        let frontend_url = env_var("LOGVIEW_FRONTEND_URL").unwrap_or(defaults.frontend_url);

        let body_limit_bytes = env_var("LOGVIEW_BODY_LIMIT_BYTES")
            .map(|b| b.parse::<usize>())
            .transpose()
            .context("LOGVIEW_BODY_LIMIT_BYTES must be a number of bytes")?
            .unwrap_or(defaults.body_limit_bytes);

        Ok(Self {
            host,
            port,
            data_path,
            storage,
            frontend_url,
            body_limit_bytes,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            storage: StorageKind::File,
            frontend_url: "http://localhost:3000".to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}
