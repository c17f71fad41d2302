use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Landcraft server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub database: DatabaseConfig,
    pub worker: WorkerConfig,
    /// Token for the admin API. Read from config but not yet enforced by
    /// any route.
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Log individual statements at debug level.
    pub log: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("landcraft.db"),
            log: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Seconds to sleep between polls of the job table.
    pub interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}
