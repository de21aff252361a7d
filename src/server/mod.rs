// Server module entry
// Binds the listener, installs signal handling and drives the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

pub use listener::bind_listener;
pub use signal::ShutdownSignal;

/// Run the server until SIGINT/SIGTERM
pub async fn run(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = bind_listener(addr)?;
    let state = AppState::new(cfg);

    logger::log_server_start(&listener.local_addr()?, cfg);

    let shutdown = ShutdownSignal::new();
    signal::start_signal_handler(Arc::clone(&shutdown));

    server_loop::run_server_loop(listener, state, shutdown).await;

    logger::log_shutdown();
    Ok(())
}
