//! Token price feed.

use crate::errors::ServiceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use wallet_core::types::{Address, Amount};

/// USD prices of tokens.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Price of each requested token address. Unknown tokens are left out.
    async fn usd_prices(&self, tokens: &[Address]) -> Result<HashMap<Address, Amount>, ServiceError>;
}

#[derive(Deserialize)]
struct PriceRow {
    token: Address,
    #[serde(default)]
    price: Option<Amount>,
}

/// Price feed served over HTTP at `GET {base_url}/api/v1/prices?tokens=a,b`.
#[derive(Clone, Debug)]
pub struct HttpPriceFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPriceFeed {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn usd_prices(&self, tokens: &[Address]) -> Result<HashMap<Address, Amount>, ServiceError> {
        if tokens.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/api/v1/prices", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("tokens", tokens.join(","))])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let rows: Vec<PriceRow> = response.json().await?;
        let prices: HashMap<Address, Amount> = rows
            .into_iter()
            .filter_map(|row| row.price.map(|price| (row.token, price)))
            .collect();
        debug!("Fetched {} of {} token prices", prices.len(), tokens.len());
        Ok(prices)
    }
}

/// Fixed prices, for offline use.
#[derive(Clone, Debug, Default)]
pub struct StaticPriceFeed {
    prices: HashMap<Address, Amount>,
}

impl StaticPriceFeed {
    pub fn new(prices: HashMap<Address, Amount>) -> Self {
        Self { prices }
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn usd_prices(&self, tokens: &[Address]) -> Result<HashMap<Address, Amount>, ServiceError> {
        Ok(tokens
            .iter()
            .filter_map(|token| self.prices.get(token).map(|p| (token.clone(), *p)))
            .collect())
    }
}
