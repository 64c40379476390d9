//! Client for the chain indexer REST API.

use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wallet_core::fees::tx_kind_counts;
use wallet_core::types::{
    Address, Amount, GasEstimate, GasPriceEntry, TokenBalance, TransferTransactionData, TxKind,
};

/// Claimable rewards of one validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub validator: Address,
    pub min_denom_amount: Amount,
}

/// Read access to the indexer.
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// Gas estimate for a batch of transactions.
    async fn gas_estimate(&self, kinds: &[TxKind]) -> Result<GasEstimate, ServiceError>;

    /// Gas price of every token accepted for fees.
    async fn gas_price_table(&self) -> Result<Vec<GasPriceEntry>, ServiceError>;

    /// Balances of an account in each token's smallest unit.
    async fn account_balances(&self, address: &str) -> Result<Vec<TokenBalance>, ServiceError>;

    /// Rewards an account can claim, per validator.
    async fn claimable_rewards(&self, address: &str) -> Result<Vec<Reward>, ServiceError>;

    /// Time a block was produced.
    async fn block_timestamp(&self, height: u64) -> Result<DateTime<Utc>, ServiceError>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GasPriceResponse {
    token: Address,
    min_denom_amount: Amount,
}

#[derive(Deserialize)]
struct TokenRef {
    address: Address,
}

// Older indexers nest the token address, newer ones flatten it
#[derive(Deserialize)]
#[serde(untagged)]
enum BalanceResponse {
    #[serde(rename_all = "camelCase")]
    Flat {
        token_address: Address,
        min_denom_amount: Amount,
    },
    #[serde(rename_all = "camelCase")]
    Nested {
        token: TokenRef,
        min_denom_amount: Amount,
    },
}

impl From<BalanceResponse> for TokenBalance {
    fn from(response: BalanceResponse) -> Self {
        match response {
            BalanceResponse::Flat {
                token_address,
                min_denom_amount,
            } => TokenBalance {
                token: token_address,
                min_denom_amount,
            },
            BalanceResponse::Nested {
                token,
                min_denom_amount,
            } => TokenBalance {
                token: token.address,
                min_denom_amount,
            },
        }
    }
}

#[derive(Deserialize)]
struct ValidatorRef {
    address: Address,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardResponse {
    validator: ValidatorRef,
    min_denom_amount: Amount,
}

#[derive(Deserialize)]
struct BlockResponse {
    timestamp: serde_json::Value,
}

/// Parses a block timestamp given either as unix seconds or as RFC 3339.
pub fn parse_block_timestamp(value: &serde_json::Value) -> Result<DateTime<Utc>, ServiceError> {
    let invalid = || ServiceError::InvalidResponse(format!("Invalid block timestamp: {}", value));

    let seconds = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => match s.parse::<i64>() {
            Ok(seconds) => Some(seconds),
            Err(_) => {
                return DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| invalid())
            }
        },
        _ => None,
    };

    seconds
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
        .ok_or_else(invalid)
}

/// Indexer reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpIndexer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIndexer {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl IndexerApi for HttpIndexer {
    async fn gas_estimate(&self, kinds: &[TxKind]) -> Result<GasEstimate, ServiceError> {
        let query: Vec<(&str, String)> = tx_kind_counts(kinds)
            .into_iter()
            .filter_map(|(kind, count)| count.map(|c| (kind.query_name(), c.to_string())))
            .collect();
        self.get_json("/api/v1/gas/estimate", &query).await
    }

    async fn gas_price_table(&self) -> Result<Vec<GasPriceEntry>, ServiceError> {
        let rows: Vec<GasPriceResponse> = self.get_json("/api/v1/gas-price", &[]).await?;
        Ok(rows
            .into_iter()
            .map(|row| GasPriceEntry {
                token: row.token,
                gas_price_in_min_denom: row.min_denom_amount,
            })
            .collect())
    }

    async fn account_balances(&self, address: &str) -> Result<Vec<TokenBalance>, ServiceError> {
        let rows: Vec<BalanceResponse> = self
            .get_json(&format!("/api/v1/account/{}", address), &[])
            .await?;
        Ok(rows.into_iter().map(TokenBalance::from).collect())
    }

    async fn claimable_rewards(&self, address: &str) -> Result<Vec<Reward>, ServiceError> {
        let rows: Vec<RewardResponse> = self
            .get_json(&format!("/api/v1/pos/reward/{}", address), &[])
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| Reward {
                validator: row.validator.address,
                min_denom_amount: row.min_denom_amount,
            })
            .collect())
    }

    async fn block_timestamp(&self, height: u64) -> Result<DateTime<Utc>, ServiceError> {
        let block: BlockResponse = self
            .get_json(&format!("/api/v1/block/height/{}", height), &[])
            .await?;
        parse_block_timestamp(&block.timestamp)
    }
}

/// Gas estimate for `kinds`, or the default estimate when the indexer fails.
pub async fn estimate_gas_or_default<I>(indexer: &I, kinds: &[TxKind]) -> GasEstimate
where
    I: IndexerApi + ?Sized,
{
    match indexer.gas_estimate(kinds).await {
        Ok(estimate) => estimate,
        Err(e) => {
            warn!("Failed to fetch gas estimate from indexer: {}", e);
            GasEstimate::default()
        }
    }
}

/// Fills in block timestamps of recorded transfers.
///
/// Lookups run concurrently. Entries without a block height, or whose
/// lookup fails, come back unchanged.
pub async fn add_timestamps<I>(
    indexer: &I,
    history: Vec<TransferTransactionData>,
) -> Vec<TransferTransactionData>
where
    I: IndexerApi + ?Sized,
{
    join_all(history.into_iter().map(|mut tx| async move {
        if let Some(height) = tx.block_height {
            match indexer.block_timestamp(height).await {
                Ok(timestamp) => tx.timestamp = Some(timestamp),
                Err(e) => warn!("No timestamp for block {}: {}", height, e),
            }
        }
        tx
    }))
    .await
}
