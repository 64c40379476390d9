//! Balance command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use serde::Serialize;
use tracing::{debug, warn};
use wallet_core::balance::{
    filter_available_assets_with_balance, map_assets_to_token_balances, total_dollar,
    total_native, TokenHolding,
};
use wallet_core::types::{Address, Amount};

/// Holdings of one account.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub address: Address,
    pub holdings: Vec<TokenHolding>,
    /// USD value of the priced holdings
    pub total_dollar: Amount,
    /// Native token held
    pub total_native: Amount,
}

/// Runs the balance command.
pub async fn run(ctx: &WalletContext, address: &str) -> Result<BalanceReport, WalletError> {
    let assets = filter_available_assets_with_balance(&ctx.balances(address).await?);
    debug!("{} holds {} known assets", address, assets.len());

    let tokens: Vec<Address> = assets.keys().cloned().collect();
    let prices = match ctx.prices.usd_prices(&tokens).await {
        Ok(prices) => prices,
        Err(e) => {
            warn!("Token prices unavailable: {}", e);
            Default::default()
        }
    };

    let holdings = map_assets_to_token_balances(&assets, &prices);
    Ok(BalanceReport {
        address: address.to_string(),
        total_dollar: total_dollar(&holdings),
        total_native: total_native(&holdings),
        holdings,
    })
}
