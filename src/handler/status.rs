//! Status endpoint
//!
//! The extension polls this to decide whether the local server is reachable.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http;

/// Mode string reported by `/demo/status`; extension builds match on it verbatim
pub const CURRENT_MODE: &str = "PYTHON_SERVER_WORKING";

#[derive(Debug, Serialize)]
struct StatusResponse {
    success: bool,
    data: StatusData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusData {
    current_mode: &'static str,
}

pub fn serve_status(server_name: &str) -> Response<Full<Bytes>> {
    let body = StatusResponse {
        success: true,
        data: StatusData {
            current_mode: CURRENT_MODE,
        },
    };
    http::json_response(StatusCode::OK, &body, server_name)
}
