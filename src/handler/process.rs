//! Process endpoint
//!
//! Decodes the posted JSON object and echoes `action` and the head of `text`
//! back inside a fixed template. No processing beyond that happens here.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::HttpConfig;
use crate::error::{json_type_name, ProcessError};
use crate::http;
use crate::logger;

/// Number of characters of `text` echoed back
pub const TEXT_PREVIEW_CHARS: usize = 50;

const DEFAULT_ACTION: &str = "unknown";

#[derive(Debug, Serialize)]
struct ProcessResponse {
    success: bool,
    result: String,
}

/// Body error bound shared with the router; `Limited` boxes the inner error
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub async fn handle_process<B>(req: Request<B>, http_config: &HttpConfig) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let server_name = http_config.server_name.as_str();

    if let Some(resp) = check_body_size(&req, http_config.max_body_size, server_name) {
        return resp;
    }

    let limit = usize::try_from(http_config.max_body_size).unwrap_or(usize::MAX);
    let outcome = match read_payload(req.into_body(), limit).await {
        Ok(payload) => {
            logger::log_process_received(&payload);
            render_result(&payload)
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => http::json_response(
            StatusCode::OK,
            &ProcessResponse {
                success: true,
                result,
            },
            server_name,
        ),
        Err(ProcessError::TooLarge) => {
            logger::log_warning(&format!(
                "Request body exceeded {limit} bytes without a matching Content-Length"
            ));
            too_large(server_name)
        }
        Err(e) => {
            logger::log_process_failed(&e);
            http::error_response(StatusCode::BAD_REQUEST, &e.to_string(), server_name)
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(
    req: &Request<B>,
    max_body_size: u64,
    server_name: &str,
) -> Option<Response<Full<Bytes>>> {
    let size = req
        .headers()
        .get(hyper::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(too_large(server_name));
    }
    None
}

fn too_large(server_name: &str) -> Response<Full<Bytes>> {
    http::error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &ProcessError::TooLarge.to_string(),
        server_name,
    )
}

/// Read at most `limit` bytes of body and decode them as UTF-8 JSON
///
/// The cap also covers chunked bodies, which carry no Content-Length.
async fn read_payload<B>(body: B, limit: usize) -> Result<Value, ProcessError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let bytes = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                ProcessError::TooLarge
            } else {
                ProcessError::Body(e.to_string())
            }
        })?
        .to_bytes();
    let text = std::str::from_utf8(&bytes)?;
    Ok(serde_json::from_str(text)?)
}

/// Fill the reply template from a decoded payload
pub fn render_result(payload: &Value) -> Result<String, ProcessError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| ProcessError::NotAnObject(json_type_name(payload)))?;

    let action = match fields.get("action") {
        None | Some(Value::Null) => DEFAULT_ACTION.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    // An explicit null is rejected like any other non-string value
    let text = match fields.get("text") {
        None => "",
        Some(Value::String(s)) => s.as_str(),
        Some(other) => return Err(ProcessError::TextNotString(json_type_name(other))),
    };
    let preview: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();

    Ok(format!(
        "🎉 PYTHON SERVER WORKS!\n\nAction: {action}\nText: {preview}...\n\n✅ Extension ↔ Python Server = OK!"
    ))
}
