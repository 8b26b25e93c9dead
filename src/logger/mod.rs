//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Subscriber setup (`tracing-subscriber` with an env filter)
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::error::StartupError;
use std::net::SocketAddr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Target used for access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over `default_level`. Should be called once at application startup.
pub fn init(default_level: &str) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Rotating asset server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!(
        "Extension: .{} ({}), rotation every {}",
        config.assets.extension,
        config.assets.mime_type.to_str().unwrap_or("<binary>"),
        config.assets.ttl
    );
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    tracing::info!("======================================");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::warn!("Failed to serve connection: {err:?}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown(reason: &str) {
    tracing::info!("Shutting down: {reason}");
}
