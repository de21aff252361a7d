//! HTTP protocol layer module
//!
//! Response builders shared by every route, decoupled from route logic.

pub mod response;

// Re-export commonly used types
pub use response::{error_response, json_response, options_response};
