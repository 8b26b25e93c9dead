// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;

/// Accept connections on `listener` until `signals` requests shutdown.
///
/// Only the accept loop stops here. Connection tasks still in flight end when
/// the runtime driving them is shut down.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        tracing::error!("Failed to accept connection: {e}");
                    }
                }
            }

            _ = signals.shutdown.notified() => {
                tracing::info!(addr = %listener.local_addr()?, "listener closed");
                return Ok(());
            }
        }
    }
}
