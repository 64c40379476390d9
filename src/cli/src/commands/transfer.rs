//! Transfer command for the CLI wallet.

use crate::commands::validate::{self, TransferForm};
use crate::context::WalletContext;
use crate::errors::WalletError;
use tracing::{info, warn};
use wallet_core::amount::to_base_amount;
use wallet_core::types::TransferParams;
use wallet_services::sdk::submit_transfer;

/// Runs the transfer command and returns the transaction hash.
///
/// The form must validate first; nothing is sent otherwise.
pub async fn run(
    ctx: &WalletContext,
    form: &TransferForm,
    memo: Option<String>,
) -> Result<String, WalletError> {
    let check = validate::run(ctx, form).await?;
    if !check.result.is_ok() {
        return Err(WalletError::ValidationFailed(check.result));
    }

    let symbol = form.symbol.clone().unwrap_or_default();
    let asset = check
        .asset
        .ok_or_else(|| WalletError::UnknownAsset(symbol.clone()))?;
    let token = asset
        .address
        .clone()
        .ok_or_else(|| WalletError::UnknownAsset(symbol.clone()))?;
    let gas_config = check
        .gas_config
        .ok_or_else(|| WalletError::TransactionError("No transaction fee is set".to_string()))?;
    let amount = form
        .amount
        .ok_or_else(|| WalletError::InvalidAmount("missing".to_string()))?;

    let params = TransferParams {
        transfer_type: check.transfer_type,
        chain_id: ctx.config.chain_id.clone(),
        source: form.source.clone().unwrap_or_default(),
        destination: form.destination.clone().unwrap_or_default(),
        token,
        amount_in_base_denom: to_base_amount(&asset, amount)?,
        memo: memo.filter(|memo| !memo.is_empty()),
        fee_payer: None,
        gas_config,
    };
    info!(
        "Sending {} {} as {} to {}",
        amount, asset.symbol, params.transfer_type, params.destination
    );

    let hash = submit_transfer(ctx.sdk.as_ref(), &params)
        .await
        .map_err(|e| WalletError::TransactionError(e.to_string()))?;

    // Best effort, the transfer is already broadcast
    if let Err(e) = ctx.remember_destination(&params.destination) {
        warn!("Could not record recent address: {}", e);
    }
    Ok(hash)
}
