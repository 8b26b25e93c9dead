// Configuration types module
// Raw (deserialized) settings and their validated, typed counterparts

use hyper::header::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::rotation::Ttl;

/// Settings as read from the environment and the optional config file
///
/// The four asset keys stay optional strings so that a missing or malformed
/// value can be reported by name instead of as a generic deserialize error.
#[derive(Debug, Deserialize, Clone)]
pub struct RawConfig {
    pub extension: Option<String>,
    pub mimetype: Option<String>,
    pub ttl: Option<String>,
    pub allowed_names: Option<String>,
    pub host: String,
    pub port: u16,
    pub asset_root: String,
    pub workers: Option<usize>,
    pub log_level: String,
    pub access_log: bool,
    pub access_log_format: String,
    pub keep_alive: bool,
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Main configuration structure, validated
#[derive(Debug, Clone)]
pub struct Config {
    pub assets: AssetConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// What to serve and how
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// File suffix without the leading dot
    pub extension: String,
    pub mime_type: HeaderValue,
    pub ttl: Ttl,
    /// Route names, in configuration order
    pub names: Vec<String>,
    /// Directory the per-name subdirectories live under
    pub root: PathBuf,
}

impl AssetConfig {
    /// HTTP path for `name`, e.g. `/banner.png`
    pub fn route_path(&self, name: &str) -> String {
        format!("/{name}.{}", self.extension)
    }

    /// Directory the assets for `name` are read from
    pub fn source_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
}

/// Per-connection behaviour
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a single connection may stay open
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}
