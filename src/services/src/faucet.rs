//! Faucet configuration and client.

use crate::errors::ServiceError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use wallet_core::types::{Address, Amount};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ENDPOINT: &str = "/api/v1/faucet";
pub const DEFAULT_LIMIT: u64 = 1_000_000_000;
pub const DEFAULT_PROXY_PORT: u16 = 9000;

/// Environment variable that routes faucet calls through the local proxy.
pub const PROXY_ENV: &str = "NAMADA_INTERFACE_PROXY";
/// Environment variable holding the local proxy port.
pub const PROXY_PORT_ENV: &str = "NAMADA_INTERFACE_PROXY_PORT";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Contents of the faucet's `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetConfig {
    /// Base URL of the faucet API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the faucet endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Largest amount a single request may ask for
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Site key of the captcha widget
    #[serde(default)]
    pub turnstile_sitekey: Option<String>,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            limit: DEFAULT_LIMIT,
            turnstile_sitekey: None,
        }
    }
}

impl FaucetConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ServiceError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads the configuration, falling back to defaults when the file is missing.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No faucet config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Resolves the URL requests are sent to.
    ///
    /// `base_url_override` replaces the configured base URL. With `proxy_port`
    /// set, everything goes through the local proxy instead.
    pub fn resolve(&self, base_url_override: Option<&str>, proxy_port: Option<u16>) -> ResolvedFaucet {
        let base_url = base_url_override
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.base_url)
            .to_string();
        let url = match proxy_port {
            Some(port) => format!("http://localhost:{}/proxy", port),
            None => format!("{}{}", base_url, self.endpoint),
        };

        ResolvedFaucet {
            base_url,
            endpoint: self.endpoint.clone(),
            url,
            limit: self.limit,
            turnstile_sitekey: self.turnstile_sitekey.clone(),
        }
    }
}

/// Proxy port taken from the environment, when proxying is enabled.
pub fn proxy_port_from_env() -> Option<u16> {
    let enabled = env::var(PROXY_ENV)
        .map(|value| !value.is_empty() && value != "false" && value != "0")
        .unwrap_or(false);
    if !enabled {
        return None;
    }

    let port = env::var(PROXY_PORT_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PROXY_PORT);
    info!("Routing faucet requests through the local proxy on port {}", port);
    Some(port)
}

/// Faucet settings after overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFaucet {
    pub base_url: String,
    pub endpoint: String,
    pub url: String,
    pub limit: u64,
    pub turnstile_sitekey: Option<String>,
}

/// Cleans up a faucet base URL typed in by the user.
///
/// The endpoint path and a trailing slash are stripped.
pub fn normalize_faucet_url(input: &str, endpoint: &str) -> Result<String, ServiceError> {
    let input = input.trim();
    Url::parse(input).map_err(|_| ServiceError::InvalidUrl(input.to_string()))?;

    let stripped = if endpoint.is_empty() {
        input.to_string()
    } else {
        input.replacen(endpoint, "", 1)
    };
    Ok(stripped.strip_suffix('/').unwrap_or(&stripped).to_string())
}

/// Settings published by the faucet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetSettings {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub withdraw_limit: Option<u64>,
    #[serde(default)]
    pub tokens_alias_to_address: std::collections::BTreeMap<String, Address>,
}

/// A withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetRequest {
    pub target: Address,
    pub token: Address,
    pub amount: Amount,
}

/// Faucet response to a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetResponse {
    #[serde(default)]
    pub sent: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the faucet API.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    client: reqwest::Client,
    faucet: ResolvedFaucet,
}

impl FaucetClient {
    pub fn new(faucet: ResolvedFaucet) -> Self {
        Self {
            client: reqwest::Client::new(),
            faucet,
        }
    }

    pub fn faucet(&self) -> &ResolvedFaucet {
        &self.faucet
    }

    /// Fetches the faucet's published settings.
    pub async fn settings(&self) -> Result<FaucetSettings, ServiceError> {
        let url = format!("{}/setting", self.faucet.url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    /// Asks the faucet to send `amount` of `token` to `target`.
    pub async fn request(&self, request: &FaucetRequest) -> Result<FaucetResponse, ServiceError> {
        let limit = Amount::from(self.faucet.limit);
        if request.amount > limit {
            return Err(ServiceError::AmountAboveLimit {
                requested: request.amount,
                limit,
            });
        }
        if request.amount <= Amount::ZERO {
            return Err(ServiceError::Core(
                wallet_core::errors::CoreError::InvalidAmount(request.amount.to_string()),
            ));
        }

        info!("Requesting {} of {} for {}", request.amount, request.token, request.target);
        let response = self
            .client
            .post(&self.faucet.url)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}
