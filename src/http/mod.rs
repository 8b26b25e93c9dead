//! HTTP protocol layer module
//!
//! Response builders and cache headers, decoupled from asset selection.

pub mod cache;
pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_405_response, build_asset_response};
