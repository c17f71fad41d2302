use std::sync::Arc;

use landcraft_config::AppConfig;
use landcraft_db::JobStore;

/// Shared application state accessible from all request handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<JobStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<JobStore>) -> Self {
        Self { config, store }
    }
}

pub type SharedState = Arc<AppState>;
