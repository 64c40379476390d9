//! In-memory stand-ins for the external services.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use wallet_cli::config::native_asset;
use wallet_cli::{WalletConfig, WalletContext};
use wallet_core::chain::ChainRegistry;
use wallet_core::staking::StakingCommitment;
use wallet_core::types::{
    Address, Amount, ChainId, GasConfig, GasEstimate, GasPriceEntry, TokenBalance, TransferParams,
    TxKind,
};
use wallet_services::errors::ServiceError;
use wallet_services::indexer::{IndexerApi, Reward};
use wallet_services::preferences::PreferenceStore;
use wallet_services::prices::StaticPriceFeed;
use wallet_services::sdk::{BroadcastResult, TransactionSdk};

pub const TRANSPARENT: &str = "tnam1qxgfw7myv4dh0qna4hq0xdg6lx77fzl7dcem8h7e";
pub const OTHER_TRANSPARENT: &str = "tnam1qqshvryx9pngpk7mmzpzkjkm6klelgusuvmkc0uz";
pub const SHIELDED: &str = "znam1qzkyl5v7wsvy5e3uk4ya6qctqclm3s9e8y5h0zjp";
pub const OSMOSIS: &str = "osmo18st0wqx84av8y6xdlss9d6m2nepyqwj6n3q7js";
pub const COSMOS: &str = "cosmos1hsk6jryyqjfhp5dhc55tc9jtckygx0eph6dd02";
pub const NATIVE_TOKEN: &str = "tnam1native";
pub const VALIDATOR: &str = "tnam1validator";
pub const CHAIN_ID: &str = "namada.5f5de2dd1b88cba30586420";

/// Parses a decimal literal.
pub fn dec(value: &str) -> Amount {
    Decimal::from_str(value).unwrap()
}

/// Indexer answering from fixed data.
pub struct MockIndexer {
    pub table: Vec<GasPriceEntry>,
    pub balances: HashMap<Address, Vec<TokenBalance>>,
    pub rewards: Vec<Reward>,
    pub estimate: Option<GasEstimate>,
    pub estimated_kinds: Mutex<Vec<Vec<TxKind>>>,
}

impl MockIndexer {
    /// One fee token, the native one, priced at 1 per gas unit.
    pub fn new() -> Self {
        Self {
            table: vec![GasPriceEntry {
                token: NATIVE_TOKEN.to_string(),
                gas_price_in_min_denom: Decimal::ONE,
            }],
            balances: HashMap::new(),
            rewards: Vec::new(),
            estimate: Some(GasEstimate {
                min: 50_000,
                avg: 50_000,
                max: 50_000,
                total_estimates: 3,
            }),
            estimated_kinds: Mutex::new(Vec::new()),
        }
    }

    /// Gives `address` a balance in the token's smallest unit.
    pub fn with_balance(mut self, address: &str, token: &str, min_denom_amount: Amount) -> Self {
        self.balances
            .entry(address.to_string())
            .or_default()
            .push(TokenBalance {
                token: token.to_string(),
                min_denom_amount,
            });
        self
    }

    pub fn with_reward(mut self, validator: &str, min_denom_amount: Amount) -> Self {
        self.rewards.push(Reward {
            validator: validator.to_string(),
            min_denom_amount,
        });
        self
    }
}

impl Default for MockIndexer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexerApi for MockIndexer {
    async fn gas_estimate(&self, kinds: &[TxKind]) -> Result<GasEstimate, ServiceError> {
        self.estimated_kinds.lock().unwrap().push(kinds.to_vec());
        self.estimate
            .clone()
            .ok_or_else(|| ServiceError::RequestFailed {
                status: 503,
                body: "estimator offline".to_string(),
            })
    }

    async fn gas_price_table(&self) -> Result<Vec<GasPriceEntry>, ServiceError> {
        Ok(self.table.clone())
    }

    async fn account_balances(&self, address: &str) -> Result<Vec<TokenBalance>, ServiceError> {
        Ok(self.balances.get(address).cloned().unwrap_or_default())
    }

    async fn claimable_rewards(&self, _address: &str) -> Result<Vec<Reward>, ServiceError> {
        Ok(self.rewards.clone())
    }

    async fn block_timestamp(&self, height: u64) -> Result<DateTime<Utc>, ServiceError> {
        Utc.timestamp_opt(1_700_000_000 + height as i64, 0)
            .single()
            .ok_or_else(|| ServiceError::InvalidResponse(height.to_string()))
    }
}

/// SDK recording what it is asked to broadcast.
#[derive(Default)]
pub struct MockSdk {
    pub fail: bool,
    pub transfers: Mutex<Vec<TransferParams>>,
    pub stakes: Mutex<Vec<Vec<StakingCommitment>>>,
}

impl MockSdk {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl TransactionSdk for MockSdk {
    async fn transfer(&self, params: &TransferParams) -> Result<BroadcastResult, ServiceError> {
        if self.fail {
            return Err(ServiceError::RpcError("insufficient funds for gas".to_string()));
        }
        let mut transfers = self.transfers.lock().unwrap();
        transfers.push(params.clone());
        Ok(BroadcastResult {
            hash: format!("TX{}", transfers.len()),
        })
    }

    async fn stake(
        &self,
        _chain_id: &ChainId,
        _source: &Address,
        commitments: &[StakingCommitment],
        _gas_config: &GasConfig,
    ) -> Result<BroadcastResult, ServiceError> {
        if self.fail {
            return Err(ServiceError::RpcError("validator jailed".to_string()));
        }
        self.stakes.lock().unwrap().push(commitments.to_vec());
        Ok(BroadcastResult {
            hash: "STAKE1".to_string(),
        })
    }
}

/// Wallet configuration knowing only the native token.
pub fn test_config() -> WalletConfig {
    WalletConfig {
        native_token: NATIVE_TOKEN.to_string(),
        chain_id: CHAIN_ID.to_string(),
        assets: vec![native_asset(NATIVE_TOKEN)],
        ..WalletConfig::default()
    }
}

/// CLI context over the mocks, with preferences stored under `dir`.
pub fn test_context(indexer: MockIndexer, sdk: Arc<MockSdk>, dir: &Path) -> WalletContext {
    let mut prices = HashMap::new();
    prices.insert(NATIVE_TOKEN.to_string(), dec("0.05"));

    WalletContext {
        config: test_config(),
        registry: ChainRegistry::builtin().unwrap(),
        indexer: Arc::new(indexer),
        sdk,
        prices: Arc::new(StaticPriceFeed::new(prices)),
        preferences: PreferenceStore::new(dir.join("preferences.json")),
    }
}
