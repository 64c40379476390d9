//! Dashboard daemon for the shielded wallet interface.

use anyhow::Result;
use dashboard::{serve, ApiState, DashboardConfig};
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the dashboard daemon.
#[derive(Debug, StructOpt)]
#[structopt(name = "dashboard", about = "Shielded wallet dashboard API")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Listen address for the API server
    #[structopt(short, long)]
    listen: Option<String>,

    /// Base URL of the chain indexer
    #[structopt(long, env = "INDEXER_URL")]
    indexer_url: Option<String>,

    /// URL of the transaction SDK service
    #[structopt(long, env = "SDK_URL")]
    sdk_url: Option<String>,

    /// Base URL of the token price feed
    #[structopt(long, env = "PRICE_FEED_URL")]
    price_feed_url: Option<String>,

    /// Chain registry file
    #[structopt(long, parse(from_os_str))]
    registry: Option<PathBuf>,

    /// Enable the separate metrics server
    #[structopt(long)]
    metrics: bool,

    /// Metrics server address
    #[structopt(long)]
    metrics_addr: Option<String>,

    /// Write the effective configuration to this file and exit
    #[structopt(long, parse(from_os_str))]
    dump_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();

    let mut config = match &opt.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    // Command line flags win over the file
    if let Some(listen) = opt.listen {
        config.api.listen_addr = listen;
    }
    if let Some(url) = opt.indexer_url {
        config.services.indexer_url = url;
    }
    if let Some(url) = opt.sdk_url {
        config.services.sdk_url = url;
    }
    if let Some(url) = opt.price_feed_url {
        config.services.price_feed_url = url;
    }
    if let Some(path) = opt.registry {
        config.registry_path = Some(path.to_string_lossy().to_string());
    }
    if opt.metrics {
        config.metrics.enabled = true;
    }
    if let Some(addr) = opt.metrics_addr {
        config.metrics.listen_addr = addr;
    }
    debug!("Effective configuration: {:?}", config);

    if let Some(path) = opt.dump_config {
        config.to_file(&path)?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let state = Arc::new(ApiState::from_config(&config)?);
    serve(&config, state).await?;
    Ok(())
}
