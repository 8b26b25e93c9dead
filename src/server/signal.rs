// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGHUP:  Logged and ignored; assets are immutable for the process lifetime

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Notify,
}

impl SignalHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            shutdown: Notify::new(),
        })
    }

    /// Ask the accept loop to stop.
    ///
    /// Uses `notify_one` so a request made while the loop is busy is not lost.
    pub fn request_shutdown(&self, reason: &str) {
        logger::log_shutdown(reason);
        self.shutdown.notify_one();
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that turns SIGTERM and SIGINT into a shutdown request.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let registered = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        );
        let (mut sigterm, mut sigint, mut sighup) = match registered {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                tracing::error!("Failed to register signal handlers: {e}");
                return;
            }
        };

        tracing::debug!(pid = std::process::id(), "signal handlers registered");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    handler.request_shutdown("SIGTERM received");
                    break;
                }
                _ = sigint.recv() => {
                    handler.request_shutdown("SIGINT received");
                    break;
                }
                _ = sighup.recv() => {
                    tracing::info!("SIGHUP received; assets are loaded once, restart the process to pick up changes");
                }
            }
        }
    });
}

/// Fallback for other platforms - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => handler.request_shutdown("Ctrl+C received"),
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {e}"),
        }
    });
}
