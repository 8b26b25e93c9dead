// Startup sequence
// Assets are loaded before the runtime is built, and the listener binds last

use crate::config::{AppState, Config};
use crate::error::StartupError;
use crate::logger;
use crate::routing::RouteTable;

use super::{create_reusable_listener, server_loop, signal};

/// Load every route, then bind and serve until a shutdown signal arrives.
///
/// Any configuration or load failure is returned before a socket is opened.
pub fn serve(cfg: Config) -> Result<(), StartupError> {
    let routes = RouteTable::load(&cfg.assets)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(listen(cfg, routes))
}

async fn listen(cfg: Config, routes: RouteTable) -> Result<(), StartupError> {
    let addr = cfg.server.addr;
    let listener =
        create_reusable_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&addr, &cfg);

    let signals = signal::SignalHandler::new();
    signal::start_signal_handler(signals.clone());

    let state = AppState::new(cfg, routes);
    server_loop::run(listener, state, signals)
        .await
        .map_err(StartupError::Server)
}
