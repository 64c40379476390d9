//! Configuration for the dashboard daemon.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the dashboard daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// HTTP API configuration
    pub api: ApiConfig,
    /// Metrics configuration
    pub metrics: MetricsConfig,
    /// External services the daemon relies on
    pub services: ServicesConfig,
    /// Chain registry file; the built-in registry is used when unset
    #[serde(default)]
    pub registry_path: Option<String>,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address for the API server
    pub listen_addr: String,
    /// CORS allowed origins
    pub cors_domains: Vec<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to serve metrics on a separate listener
    pub enabled: bool,
    /// Listen address for the metrics server
    pub listen_addr: String,
}

/// External service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the chain indexer
    pub indexer_url: String,
    /// URL of the transaction-building SDK service
    pub sdk_url: String,
    /// Base URL of the token price feed
    pub price_feed_url: String,
    /// Address of the native token, used when no fee token is affordable
    pub native_token: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                listen_addr: "127.0.0.1:8080".to_string(),
                cors_domains: vec!["*".to_string()],
            },
            metrics: MetricsConfig {
                enabled: false,
                listen_addr: "127.0.0.1:9090".to_string(),
            },
            services: ServicesConfig {
                indexer_url: "http://localhost:5001".to_string(),
                sdk_url: "http://localhost:8545".to_string(),
                price_feed_url: "http://localhost:5002".to_string(),
                native_token: "tnam1q9gr66cvu4hrzm0sd5kmlnjje82gs3xlfg3v6nu7".to_string(),
            },
            registry_path: None,
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
