//! Startup error types
//!
//! Every error here is fatal: the process logs it and exits before the
//! listener is bound. Request handling has no domain errors of its own.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Missing or invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be specified")]
    Missing { key: &'static str },

    #[error("TTL must be specified, and a positive integer in seconds (got '{value}')")]
    InvalidTtl { value: String },

    #[error("ALLOWED_NAMES must be specified and be a comma separated list of strings")]
    EmptyName,

    #[error("ALLOWED_NAMES lists '{name}' more than once")]
    DuplicateName { name: String },

    #[error("MIMETYPE '{value}' is not a valid header value")]
    InvalidMimeType { value: String },

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Failure while building the asset set for one name
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read asset directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read asset '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to compress asset '{}': {source}", path.display())]
    Compress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no files found with extension '.{extension}' in '{}'", dir.display())]
    NoMatch { dir: PathBuf, extension: String },
}

/// Anything that stops the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("route '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Server(#[source] io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message() {
        let err = LoadError::NoMatch {
            dir: PathBuf::from("banners"),
            extension: "png".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no files found with extension '.png' in 'banners'"
        );
    }

    #[test]
    fn test_load_error_names_route() {
        let err = StartupError::Load {
            name: "banners".to_string(),
            source: LoadError::ReadDir {
                path: PathBuf::from("banners"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        };
        assert!(err.to_string().starts_with("route 'banners': failed to read asset directory"));
    }

    #[test]
    fn test_missing_key_message() {
        let err = ConfigError::Missing { key: "EXTENSION" };
        assert_eq!(err.to_string(), "EXTENSION must be specified");
    }
}
