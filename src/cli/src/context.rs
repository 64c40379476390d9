//! Services and state the commands run against.

use crate::config::WalletConfig;
use crate::errors::WalletError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use wallet_core::address::address_kind;
use wallet_core::balance::map_addresses_to_assets;
use wallet_core::chain::ChainRegistry;
use wallet_core::fees::gas_config_for;
use wallet_core::recent::RecentAddresses;
use wallet_core::types::{Address, AssetWithAmount, GasConfig, TxKind};
use wallet_services::faucet::{proxy_port_from_env, FaucetClient, FaucetConfig};
use wallet_services::indexer::{estimate_gas_or_default, HttpIndexer, IndexerApi};
use wallet_services::preferences::PreferenceStore;
use wallet_services::prices::{HttpPriceFeed, PriceFeed};
use wallet_services::sdk::{RpcTransactionSdk, TransactionSdk};

/// Everything a command needs.
pub struct WalletContext {
    pub config: WalletConfig,
    pub registry: ChainRegistry,
    pub indexer: Arc<dyn IndexerApi>,
    pub sdk: Arc<dyn TransactionSdk>,
    pub prices: Arc<dyn PriceFeed>,
    pub preferences: PreferenceStore,
}

impl WalletContext {
    /// Connects to the services named in `config`.
    pub fn from_config(config: WalletConfig, preferences_path: PathBuf) -> Result<Self, WalletError> {
        let registry = match &config.registry_path {
            Some(path) => ChainRegistry::from_file(path)?,
            None => ChainRegistry::builtin()?,
        };

        Ok(Self {
            indexer: Arc::new(HttpIndexer::new(&config.indexer_url)),
            sdk: Arc::new(RpcTransactionSdk::new(&config.sdk_url)),
            prices: Arc::new(HttpPriceFeed::new(&config.price_feed_url)),
            preferences: PreferenceStore::new(preferences_path),
            registry,
            config,
        })
    }

    /// Display balances of `address`, keyed by token address.
    pub async fn balances(
        &self,
        address: &str,
    ) -> Result<HashMap<Address, AssetWithAmount>, WalletError> {
        let balances = self.indexer.account_balances(address).await?;
        debug!("{} holds {} tokens", address, balances.len());
        Ok(map_addresses_to_assets(&balances, &self.config.assets)?)
    }

    /// Gas configuration for transactions of `kinds` sent from `source`.
    pub async fn gas_config(&self, source: &str, kinds: &[TxKind]) -> Result<GasConfig, WalletError> {
        let (table, balances, estimate) = tokio::join!(
            self.indexer.gas_price_table(),
            self.indexer.account_balances(source),
            estimate_gas_or_default(self.indexer.as_ref(), kinds),
        );
        let table = table?;
        let balances = balances?;

        let tokens: Vec<Address> = table.iter().map(|entry| entry.token.clone()).collect();
        let prices = self.prices.usd_prices(&tokens).await.unwrap_or_else(|e| {
            warn!("Token prices unavailable: {}", e);
            HashMap::new()
        });

        Ok(gas_config_for(
            &table,
            &balances,
            &estimate,
            &prices,
            &self.config.native_token,
        )?)
    }

    /// Recent destinations as persisted in the preferences.
    pub fn recent_addresses(&self) -> Result<RecentAddresses, WalletError> {
        let preferences = self.preferences.load()?;
        Ok(RecentAddresses::from_list(preferences.recent_addresses))
    }

    /// Records `address` as the most recent destination.
    pub fn remember_destination(&self, address: &str) -> Result<(), WalletError> {
        let kind = match address_kind(address) {
            Some(kind) => kind,
            None => return Ok(()),
        };
        let recent = self.recent_addresses()?;
        recent.add(address, kind, Some(self.registry.address_label(address, kind)));

        self.preferences.update(|preferences| {
            preferences.recent_addresses = recent.list();
        })?;
        Ok(())
    }

    /// Faucet client honouring the user's base URL and the proxy settings.
    pub fn faucet_client(&self) -> Result<FaucetClient, WalletError> {
        let config = match &self.config.faucet_config {
            Some(path) => FaucetConfig::from_file(path)?,
            None => FaucetConfig::default(),
        };
        let preferences = self.preferences.load()?;
        let faucet = config.resolve(preferences.faucet_base_url.as_deref(), proxy_port_from_env());
        debug!("Faucet endpoint is {}", faucet.url);
        Ok(FaucetClient::new(faucet))
    }
}
