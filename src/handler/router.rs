//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: routes on (method, path) and
//! writes the access log line once the response is built.

use crate::config::AppState;
use crate::handler::process::{self, BoxError};
use crate::handler::status;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

pub const STATUS_PATH: &str = "/demo/status";
pub const PROCESS_PATH: &str = "/api/genai/process";

const NOT_FOUND: &str = "Not found";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let mut entry = AccessLogEntry::new(peer_addr, req.method().as_str(), req.uri().path());
    entry.http_version = version_label(req.version()).to_string();
    entry.origin = header_string(&req, hyper::header::ORIGIN);
    entry.user_agent = header_string(&req, hyper::header::USER_AGENT);

    let response = route_request(req, &state).await;

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let server_name = state.config.http.server_name.as_str();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => http::options_response(server_name),
        (&Method::GET, STATUS_PATH) => status::serve_status(server_name),
        // Unknown GET paths keep status 200; deployed extension builds only inspect the body
        (&Method::GET, _) => http::error_response(StatusCode::OK, NOT_FOUND, server_name),
        (&Method::POST, PROCESS_PATH) => process::handle_process(req, &state.config.http).await,
        (&Method::POST, _) => {
            logger::log_warning(&format!("No POST route for {path}"));
            http::error_response(StatusCode::NOT_FOUND, NOT_FOUND, server_name)
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::error_response(
                StatusCode::NOT_IMPLEMENTED,
                &format!("Unsupported method ('{method}')"),
                server_name,
            )
        }
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
