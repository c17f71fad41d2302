mod banner;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use landcraft_config::ConfigLoader;
use landcraft_db::JobStore;
use landcraft_gateway::GatewayServer;
use landcraft_worker::{JobWorker, LoggingJobHandler};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "landcraft", version, about = "Landcraft server")]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = "landcraft.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway
    Serve,
    /// Run the job worker loop
    Work,
    /// Run a migration command directly (up | down | status)
    Migrate {
        /// Command tokens, same as the body of POST /api/db
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::load(Some(&cli.config))?;

    match cli.command {
        Command::Serve => {
            banner::print_banner(&config);
            GatewayServer::new(config).run().await?;
        }
        Command::Work => {
            let store = JobStore::open(&config.database.path)?
                .with_statement_logging(config.database.log);
            let worker = JobWorker::new(
                Arc::new(store),
                Arc::new(LoggingJobHandler),
                Duration::from_secs(config.worker.interval_secs),
            );

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("ctrl-c received");
                let _ = shutdown_tx.send(true);
            });

            worker.run_until(shutdown_rx).await;
        }
        Command::Migrate { tokens } => {
            let store = JobStore::open(&config.database.path)?
                .with_statement_logging(config.database.log);
            let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
            for line in store.migrate(&tokens)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
