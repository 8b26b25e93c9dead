// Application state module
// Everything a request handler needs, built once before the listener starts

use std::sync::Arc;

use super::types::Config;
use crate::routing::RouteTable;

/// Application state, shared read-only across connections
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config, routes: RouteTable) -> Arc<Self> {
        Arc::new(Self { config, routes })
    }
}
