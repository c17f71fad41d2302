use std::sync::Arc;

use landcraft_common::{Error, Result};
use landcraft_config::AppConfig;
use landcraft_db::JobStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// The main gateway server that binds to a port and serves the API.
pub struct GatewayServer {
    config: AppConfig,
}

impl GatewayServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.gateway.host, self.config.gateway.port);

        let store = JobStore::open(&self.config.database.path)?
            .with_statement_logging(self.config.database.log);

        let state = Arc::new(AppState::new(self.config, Arc::new(store)));
        let app = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        info!("landcraft gateway listening on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Gateway(format!("server error: {e}")))?;

        Ok(())
    }
}
