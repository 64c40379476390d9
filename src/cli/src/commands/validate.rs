//! Validate command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};
use wallet_core::address::{is_ibc_address, is_shielded_address};
use wallet_core::amount::{available_amount_minus_fees, balance_of, display_gas_fee};
use wallet_core::chain::default_ibc_gas_config;
use wallet_core::classifier::tx_kind_for;
use wallet_core::determine_transfer_type;
use wallet_core::types::{Address, Amount, Asset, GasConfig, LedgerAccountInfo, TransferType};
use wallet_core::validation::{
    button_text, shield_button_overrides, unshield_button_overrides, validate_transfer_form,
    TransferDestination, TransferSource, ValidationContext, ValidationResult,
};

/// A transfer as entered on the command line.
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    pub source: Option<Address>,
    pub destination: Option<Address>,
    pub symbol: Option<String>,
    pub amount: Option<Amount>,
    /// Version reported by the browser keychain, if any
    pub keychain_version: Option<String>,
    /// Set for hardware wallet accounts
    pub ledger_connected: Option<bool>,
    /// Balance on the source chain, for sources the indexer cannot see
    pub available: Option<Amount>,
}

/// Outcome of checking a form against live wallet data.
#[derive(Debug, Clone, Serialize)]
pub struct FormCheck {
    pub result: ValidationResult,
    pub button_text: String,
    pub transfer_type: TransferType,
    pub gas_config: Option<GasConfig>,
    pub display_fee: Option<Amount>,
    pub available_amount_minus_fees: Option<Amount>,
    #[serde(skip)]
    pub asset: Option<Asset>,
}

/// Runs the validate command.
pub async fn run(ctx: &WalletContext, form: &TransferForm) -> Result<FormCheck, WalletError> {
    let source_address = form.source.clone().unwrap_or_default();
    let destination_address = form.destination.clone().unwrap_or_default();
    let transfer_type = determine_transfer_type(&source_address, &destination_address);
    let asset = form
        .symbol
        .as_deref()
        .and_then(|symbol| ctx.config.asset_by_symbol(symbol))
        .cloned();

    let (available_assets, gas_config) = if is_ibc_address(&source_address) {
        let gas_config = ctx
            .registry
            .chain_from_address(&source_address)
            .and_then(default_ibc_gas_config);
        (None, gas_config)
    } else if source_address.is_empty() {
        (None, None)
    } else {
        let kinds = [tx_kind_for(&source_address, &destination_address)];
        let assets = ctx.balances(&source_address).await?;
        let gas_config = match ctx.gas_config(&source_address, &kinds).await {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("No gas configuration for {}: {}", source_address, e);
                None
            }
        };
        (Some(assets), gas_config)
    };

    let known_assets: HashMap<Address, Asset> = ctx
        .config
        .assets
        .iter()
        .filter_map(|asset| Some((asset.address.clone()?, asset.clone())))
        .collect();
    let display_fee = gas_config
        .as_ref()
        .and_then(|config| display_gas_fee(config, &known_assets).ok())
        .map(|fee| fee.total_display_amount);

    let selected_token = asset.as_ref().and_then(|asset| asset.address.as_deref());
    let balance = form.available.or_else(|| {
        available_assets
            .as_ref()
            .zip(selected_token)
            .and_then(|(assets, token)| balance_of(assets, token))
    });
    let available =
        available_amount_minus_fees(balance, selected_token, gas_config.as_ref(), display_fee);
    debug!("Available after fees: {:?}", available);

    let source = TransferSource {
        address: form.source.clone(),
        asset: asset.clone(),
        selected_asset_symbol: form.symbol.clone(),
        is_shielded_address: is_shielded_address(&source_address),
        amount: form.amount,
        ledger_account_info: form
            .ledger_connected
            .map(|device_connected| LedgerAccountInfo { device_connected }),
    };
    let destination = TransferDestination {
        address: form.destination.clone(),
        is_shielded_address: is_shielded_address(&destination_address),
    };
    let validation = ValidationContext {
        registry: &ctx.registry,
        gas_config: gas_config.as_ref(),
        available_amount_minus_fees: available,
        keychain_version: form.keychain_version.as_deref(),
        available_assets: available_assets.as_ref(),
        display_gas_fee_amount: display_fee,
    };
    let result = validate_transfer_form(&source, &destination, &validation);

    let overrides: HashMap<ValidationResult, String> = match transfer_type {
        TransferType::Shield => shield_button_overrides(),
        TransferType::Unshield => unshield_button_overrides(),
        _ => HashMap::new(),
    };

    Ok(FormCheck {
        result,
        button_text: button_text(false, result, available, &overrides),
        transfer_type,
        gas_config,
        display_fee,
        available_amount_minus_fees: available,
        asset,
    })
}

