//! Faucet URL command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use tracing::info;
use wallet_services::faucet::{normalize_faucet_url, FaucetConfig};

/// Stores a new faucet base URL and returns it normalized.
pub fn set(ctx: &WalletContext, url: &str) -> Result<String, WalletError> {
    let config = faucet_config(ctx)?;
    let normalized = normalize_faucet_url(url, &config.endpoint)?;

    ctx.preferences.update(|preferences| {
        preferences.faucet_base_url = Some(normalized.clone());
    })?;
    info!("Faucet base URL set to {}", normalized);
    Ok(normalized)
}

/// Drops the stored faucet base URL.
pub fn reset(ctx: &WalletContext) -> Result<(), WalletError> {
    ctx.preferences.update(|preferences| {
        preferences.faucet_base_url = None;
    })?;
    Ok(())
}

/// The faucet endpoint requests currently go to.
pub fn show(ctx: &WalletContext) -> Result<String, WalletError> {
    Ok(ctx.faucet_client()?.faucet().url.clone())
}

fn faucet_config(ctx: &WalletContext) -> Result<FaucetConfig, WalletError> {
    Ok(match &ctx.config.faucet_config {
        Some(path) => FaucetConfig::from_file(path)?,
        None => FaucetConfig::default(),
    })
}
