// Application state module
// Read-only view of the loaded configuration shared with every connection

use std::sync::Arc;

use super::types::Config;

/// Application state
///
/// Nothing here changes after startup: requests never share mutable data.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Arc<Self> {
        Arc::new(Self {
            config: config.clone(),
        })
    }
}
