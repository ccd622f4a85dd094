//! Climate Observations Server - Main Entry Point

use climate_observations::{
    logging, HttpServer, ObservationQueryService, Result, ServerConfig, SqliteClient,
};

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Climate Observations Server Configuration
#[derive(Parser, Debug)]
#[command(name = "climate-observations-server")]
#[command(about = "Read-only JSON API over a daily climate observations dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite dataset with `station` and `measurement` tables
    #[arg(long, env = "CLIMATE_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Enable CORS (permissive mode)
    #[arg(long)]
    enable_cors: bool,
}

impl Cli {
    /// Apply command line overrides on top of the layered configuration
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if self.enable_cors {
            config.http.enable_cors = true;
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    logging::init_logging(&config.logging, cli.debug)?;

    info!(
        "Starting climate observations server v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(path) = &cli.config {
        info!("Loaded configuration from {}", path.display());
    }

    let client = SqliteClient::connect(&config.database).await?;
    let service = ObservationQueryService::new(client.clone());

    let server = HttpServer::new(service, config.http.clone());
    let result = server.start(shutdown_signal()).await;

    client.close().await;
    result
}
