// Configuration module entry point
// Loads settings once at startup and validates them into typed values

mod state;
mod types;

use hyper::header::HeaderValue;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;

pub use state::AppState;
pub use types::{AssetConfig, Config, LoggingConfig, PerformanceConfig, RawConfig, ServerConfig};

use crate::error::ConfigError;
use crate::rotation::Ttl;

/// Optional config file, looked up without extension
pub const DEFAULT_CONFIG_FILE: &str = "rotator";

impl Config {
    /// Load configuration from `rotator.{toml,yaml,json}` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE, config::Environment::default())
    }

    /// Load configuration from the given file path (without extension) and environment source.
    ///
    /// Environment values take precedence over the file.
    pub fn load_from(config_path: &str, env: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("asset_root", ".")?
            .set_default("log_level", "info")?
            .set_default("access_log", true)?
            .set_default("access_log_format", "combined")?
            .set_default("keep_alive", true)?
            .set_default("connection_timeout", 30)?
            .build()?;

        let raw: RawConfig = settings.try_deserialize()?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let extension = required(raw.extension, "EXTENSION")?;
        let mime_type = parse_mime_type(required(raw.mimetype, "MIMETYPE")?)?;
        let ttl = parse_ttl(raw.ttl.as_deref())?;
        let names = parse_names(raw.allowed_names.as_deref().unwrap_or_default())?;

        let addr_str = format!("{}:{}", raw.host, raw.port);
        let addr = addr_str
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddress {
                addr: addr_str.clone(),
                source,
            })?;

        Ok(Self {
            assets: AssetConfig {
                extension,
                mime_type,
                ttl,
                names,
                root: PathBuf::from(raw.asset_root),
            },
            server: ServerConfig {
                addr,
                workers: raw.workers.filter(|&w| w > 0),
            },
            logging: LoggingConfig {
                level: raw.log_level,
                access_log: raw.access_log,
                access_log_format: raw.access_log_format,
            },
            performance: PerformanceConfig {
                keep_alive: raw.keep_alive,
                connection_timeout: raw.connection_timeout,
                max_connections: raw.max_connections,
            },
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { key })
}

fn parse_mime_type(value: String) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(&value).map_err(|_| ConfigError::InvalidMimeType { value })
}

fn parse_ttl(value: Option<&str>) -> Result<Ttl, ConfigError> {
    let value = value.unwrap_or_default();
    value
        .parse::<i64>()
        .ok()
        .and_then(Ttl::new)
        .ok_or_else(|| ConfigError::InvalidTtl {
            value: value.to_string(),
        })
}

/// Split a comma separated name list; every entry must be non-empty and unique.
fn parse_names(value: &str) -> Result<Vec<String>, ConfigError> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for name in value.split(',') {
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName {
                name: name.to_string(),
            });
        }
        names.push(name.to_string());
    }
    Ok(names)
}
