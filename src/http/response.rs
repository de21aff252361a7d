//! HTTP response building module
//!
//! Every response leaves here with `Access-Control-Allow-Origin: *` so the
//! browser extension can read it from any origin.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

const JSON_CONTENT_TYPE: &str = "application/json";
const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Build a compact JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_json(status, Bytes::from(json), server_name),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
                server_name,
            )
        }
    }
}

/// Build `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: &str, server_name: &str) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }), server_name)
}

/// Build OPTIONS response (preflight request)
pub fn options_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Server", server_name)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            let mut fallback = Response::new(Full::new(Bytes::new()));
            let headers = fallback.headers_mut();
            insert_cors(headers);
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            );
            headers.insert(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            );
            fallback
        })
}

fn build_json(status: StatusCode, body: Bytes, server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Server", server_name)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(Full::new(body));
            *fallback.status_mut() = status;
            let headers = fallback.headers_mut();
            insert_cors(headers);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            fallback
        })
}

/// Fallback responses drop only the `Server` header
fn insert_cors(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
