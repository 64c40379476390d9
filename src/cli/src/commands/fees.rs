//! Fees command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use wallet_core::address::is_ibc_address;
use wallet_core::amount::display_gas_fee;
use wallet_core::chain::default_ibc_gas_config;
use wallet_core::classifier::tx_kind_for;
use wallet_core::errors::CoreError;
use wallet_core::types::{Address, Amount, Asset, GasConfig};

/// Fee a transfer would pay.
#[derive(Debug, Clone, Serialize)]
pub struct FeeQuote {
    pub gas_config: GasConfig,
    pub total_display_amount: Amount,
    /// Symbol of the fee token, when it is a configured asset
    pub symbol: Option<String>,
}

/// Runs the fees command.
pub async fn run(
    ctx: &WalletContext,
    source: &str,
    destination: &str,
) -> Result<FeeQuote, WalletError> {
    let gas_config = if is_ibc_address(source) {
        ctx.registry
            .chain_from_address(source)
            .and_then(default_ibc_gas_config)
            .ok_or_else(|| CoreError::ChainNotFound(source.to_string()))?
    } else {
        let kinds = [tx_kind_for(source, destination)];
        ctx.gas_config(source, &kinds).await?
    };

    let assets: HashMap<Address, Asset> = ctx
        .config
        .assets
        .iter()
        .filter_map(|asset| Some((asset.address.clone()?, asset.clone())))
        .collect();
    let fee = display_gas_fee(&gas_config, &assets)?;
    info!(
        "Fee for {} -> {}: {} of {}",
        source, destination, fee.total_display_amount, fee.token
    );

    Ok(FeeQuote {
        total_display_amount: fee.total_display_amount,
        symbol: fee.asset.map(|asset| asset.symbol),
        gas_config,
    })
}
