//! Dashboard daemon for the shielded wallet interface.
//!
//! Serves transfer classification, form validation, fee selection and
//! transfer submission over HTTP, next to prometheus metrics.

pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;

pub use api::{routes, ApiState};
pub use config::DashboardConfig;
pub use errors::DashboardError;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use wallet_core::chain::ChainRegistry;
use wallet_services::indexer::HttpIndexer;
use wallet_services::prices::HttpPriceFeed;
use wallet_services::sdk::RpcTransactionSdk;
use warp::Filter;

impl ApiState {
    /// Builds the handler state from the daemon configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let registry = match &config.registry_path {
            Some(path) => ChainRegistry::from_file(path)?,
            None => ChainRegistry::builtin()?,
        };
        info!("Chain registry holds {} chains", registry.chains().len());

        Ok(Self {
            registry,
            indexer: Arc::new(HttpIndexer::new(&config.services.indexer_url)),
            sdk: Arc::new(RpcTransactionSdk::new(&config.services.sdk_url)),
            prices: Arc::new(HttpPriceFeed::new(&config.services.price_feed_url)),
            native_token: config.services.native_token.clone(),
        })
    }
}

/// Parses a listen address from the configuration.
pub fn parse_addr(addr: &str) -> Result<SocketAddr, DashboardError> {
    addr.parse()
        .map_err(|e| DashboardError::ConfigError(format!("Invalid listen address {}: {}", addr, e)))
}

/// Runs the API server until the process stops.
pub async fn serve(config: &DashboardConfig, state: Arc<ApiState>) -> Result<(), DashboardError> {
    let addr = parse_addr(&config.api.listen_addr)?;

    if config.metrics.enabled {
        let metrics_addr = parse_addr(&config.metrics.listen_addr)?;
        metrics::start_metrics_server(metrics_addr).await?;
        info!("Metrics server listening on {}", metrics_addr);
    }

    let origins: Vec<&str> = config.api.cors_domains.iter().map(|s| s.as_str()).collect();
    let cors = if origins.iter().any(|origin| *origin == "*") {
        warp::cors().allow_any_origin()
    } else {
        warp::cors().allow_origins(origins)
    }
    .allow_methods(vec!["GET", "POST"])
    .allow_header("content-type");

    info!("Dashboard API listening on {}", addr);
    warp::serve(routes(state).with(cors)).run(addr).await;
    Ok(())
}
