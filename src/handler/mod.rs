//! Request handler module
//!
//! Responsible for request routing dispatch and the two application routes.

pub mod process;
pub mod router;
pub mod status;

// Re-export main entry point
pub use router::handle_request;
