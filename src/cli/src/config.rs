//! Configuration for the CLI wallet.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use wallet_core::types::{Asset, DenomUnit, NATIVE_BASE_DENOM, NATIVE_SYMBOL};

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Base URL of the chain indexer
    pub indexer_url: String,
    /// URL of the transaction-building SDK service
    pub sdk_url: String,
    /// Base URL of the token price feed
    pub price_feed_url: String,
    /// Chain transactions are built for
    pub chain_id: String,
    /// Address of the native token
    pub native_token: String,
    /// Faucet configuration file (TOML)
    #[serde(default)]
    pub faucet_config: Option<String>,
    /// Chain registry file; the built-in registry is used when unset
    #[serde(default)]
    pub registry_path: Option<String>,
    /// Assets the wallet knows how to display
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        let native_token = "tnam1q9gr66cvu4hrzm0sd5kmlnjje82gs3xlfg3v6nu7".to_string();
        Self {
            indexer_url: "http://localhost:5001".to_string(),
            sdk_url: "http://localhost:8545".to_string(),
            price_feed_url: "http://localhost:5002".to_string(),
            chain_id: "namada.5f5de2dd1b88cba30586420".to_string(),
            assets: vec![native_asset(&native_token)],
            native_token,
            faucet_config: None,
            registry_path: None,
        }
    }
}

/// The native token as an asset.
pub fn native_asset(address: &str) -> Asset {
    Asset {
        symbol: NATIVE_SYMBOL.to_string(),
        name: "Namada".to_string(),
        base: NATIVE_BASE_DENOM.to_string(),
        display: "nam".to_string(),
        address: Some(address.to_string()),
        denom_units: vec![
            DenomUnit {
                denom: NATIVE_BASE_DENOM.to_string(),
                exponent: 0,
            },
            DenomUnit {
                denom: "nam".to_string(),
                exponent: 6,
            },
        ],
        traces: Vec::new(),
        coingecko_id: Some("namada".to_string()),
    }
}

impl WalletConfig {
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

    /// Looks up a configured asset by symbol, ignoring case.
    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
    }
}
