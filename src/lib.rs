//! Rotating asset server
//!
//! Serves one gzip-compressed asset per configured name and rotates through the
//! files of that name's directory in fixed time windows. Every request inside a
//! window gets the same file, with a `Cache-Control` lifetime that runs out
//! exactly when the window ends.

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod rotation;
pub mod routing;
pub mod server;
