// Server loop module
// Sequential accept loop: one connection is served to completion before the next accept

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until shutdown is requested.
///
/// Shutdown is only observed between connections; a connection being served
/// is never cut short by it.
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) {
    loop {
        tokio::select! {
            biased;

            () = shutdown.wait() => break,

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, Arc::clone(&state)).await;
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
        }
    }
}
