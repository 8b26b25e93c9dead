//! Asset loading module
//!
//! Reads the asset files for each configured name once at startup and keeps them
//! gzip-compressed in memory for the lifetime of the process.

pub mod compress;
pub mod loader;

pub use loader::{load_asset_set, Asset, AssetSet};
