use std::env;
use std::path::Path;

use landcraft_common::{Error, Result};
use tracing::{debug, info};

use crate::model::AppConfig;

/// Loads `AppConfig` from a TOML file and applies environment overrides.
///
/// Precedence, lowest to highest: built-in defaults, config file,
/// `LANDCRAFT_*` environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p)?;
                let config: AppConfig = toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("failed to parse {}: {e}", p.display())))?;
                info!("loaded config from {}", p.display());
                config
            }
            Some(p) => {
                debug!("config file {} not found, using defaults", p.display());
                AppConfig::default()
            }
            None => AppConfig::default(),
        };

        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(host) = env::var("LANDCRAFT_HOST") {
        config.gateway.host = host;
    }
    if let Ok(port) = env::var("LANDCRAFT_PORT") {
        config.gateway.port = port
            .parse()
            .map_err(|_| Error::Config(format!("invalid LANDCRAFT_PORT: {port}")))?;
    }
    if let Ok(path) = env::var("LANDCRAFT_DB_PATH") {
        config.database.path = path.into();
    }
    if let Ok(log) = env::var("LANDCRAFT_DB_LOG") {
        config.database.log = matches!(log.as_str(), "1" | "true" | "yes");
    }
    if let Ok(interval) = env::var("LANDCRAFT_WORKER_INTERVAL") {
        config.worker.interval_secs = interval
            .parse()
            .map_err(|_| Error::Config(format!("invalid LANDCRAFT_WORKER_INTERVAL: {interval}")))?;
    }
    if let Ok(token) = env::var("LANDCRAFT_ADMIN_TOKEN") {
        config.admin_token = Some(token);
    }
    Ok(())
}
