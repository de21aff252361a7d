// Connection handling module
// Serves a single accepted TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one connection and return once it is closed or timed out.
///
/// The caller awaits this before accepting the next connection, so requests
/// are handled strictly one after another.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 keep-alive from `performance.keep_alive`
/// 3. Serves the connection with the request handler
/// 4. Bounds the whole exchange by the connection timeout
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    logger::log_connection_accepted(&peer_addr);

    let io = TokioIo::new(stream);
    let timeout_duration = state.config.performance.connection_timeout();

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.config.performance.keep_alive);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, peer_addr, state).await }
        }),
    );

    match tokio::time::timeout(timeout_duration, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    }
}
