//! Request handler module
//!
//! Responsible for request dispatch and serving the currently selected asset.

pub mod rotating;
pub mod router;

// Re-export main entry point
pub use rotating::RotatingAsset;
pub use router::{dispatch, handle_request};
