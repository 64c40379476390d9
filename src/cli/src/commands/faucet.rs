//! Faucet command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use tracing::info;
use wallet_core::address::is_namada_address;
use wallet_core::amount::to_base_amount;
use wallet_core::types::Amount;
use wallet_services::faucet::{FaucetRequest, FaucetResponse};

/// Runs the faucet command.
///
/// `amount` is in display units of the configured asset `symbol`.
pub async fn run(
    ctx: &WalletContext,
    target: &str,
    symbol: &str,
    amount: Amount,
) -> Result<FaucetResponse, WalletError> {
    let target = target.trim();
    if !is_namada_address(target) {
        return Err(WalletError::InvalidAddress(target.to_string()));
    }

    let asset = ctx
        .config
        .asset_by_symbol(symbol)
        .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;
    let token = asset
        .address
        .clone()
        .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;

    let client = ctx.faucet_client()?;
    let request = FaucetRequest {
        target: target.to_string(),
        token,
        amount: to_base_amount(asset, amount)?,
    };
    info!("Asking {} for {} {}", client.faucet().url, amount, asset.symbol);

    Ok(client.request(&request).await?)
}
