//! Errors raised while decoding a process request
//!
//! The `Display` text of each variant is what the client sees in the
//! `error` field of the response: 413 for `TooLarge`, 400 for the rest.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("Payload too large")]
    TooLarge,

    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("'text' must be a string, got {0}")]
    TextNotString(&'static str),
}

/// Name of a JSON value's type, used in error messages
pub const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
