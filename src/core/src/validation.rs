//! Transfer form validation.
//!
//! Checks run in a fixed priority order and stop at the first failure, so a
//! form always maps to exactly one [`ValidationResult`].

use crate::address::{is_ibc_address, is_namada_address};
use crate::chain::ChainRegistry;
use crate::fees::has_enough_balance_for_fees;
use crate::keychain::is_keychain_compatible_with_masp;
use crate::types::{Address, Amount, Asset, AssetWithAmount, GasConfig, LedgerAccountInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Outcome of validating a transfer form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationResult {
    NoSourceWallet,
    NoSelectedAsset,
    TheSameAddress,
    NoDestinationWallet,
    NoAmount,
    NoTransactionFee,
    CustomAddressNotMatchingChain,
    NotEnoughBalance,
    NotEnoughBalanceForFees,
    KeychainNotCompatibleWithMasp,
    NoLedgerConnected,
    Ok,
}

impl ValidationResult {
    /// User-facing message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationResult::NoSourceWallet => "Select Wallet",
            ValidationResult::NoSelectedAsset => "Select Source Asset",
            ValidationResult::TheSameAddress => "Source and destination addresses are the same",
            ValidationResult::NoDestinationWallet => "Select Destination Wallet",
            ValidationResult::NoAmount => "Define an amount to transfer",
            ValidationResult::NoTransactionFee => "No transaction fee is set",
            ValidationResult::CustomAddressNotMatchingChain => {
                "Custom address does not match chain"
            }
            ValidationResult::NotEnoughBalance => "Not enough balance",
            ValidationResult::NotEnoughBalanceForFees => {
                "Not enough balance to pay for transaction fees"
            }
            ValidationResult::KeychainNotCompatibleWithMasp => {
                "Keychain is not compatible with MASP"
            }
            ValidationResult::NoLedgerConnected => "Connect your ledger and open the Namada App",
            ValidationResult::Ok => "Submit",
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == ValidationResult::Ok
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Source side of a transfer form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSource {
    /// Sending address, if chosen
    #[serde(default)]
    pub address: Option<Address>,
    /// Selected asset
    #[serde(default)]
    pub asset: Option<Asset>,
    /// Symbol of the selected asset
    #[serde(default)]
    pub selected_asset_symbol: Option<String>,
    /// Whether the source is a shielded account
    #[serde(default)]
    pub is_shielded_address: bool,
    /// Display amount typed in by the user
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Present when the source is a hardware wallet account
    #[serde(default)]
    pub ledger_account_info: Option<LedgerAccountInfo>,
}

/// Destination side of a transfer form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDestination {
    /// Receiving address, if chosen
    #[serde(default)]
    pub address: Option<Address>,
    /// Whether the destination is a shielded account
    #[serde(default)]
    pub is_shielded_address: bool,
}

/// Wallet state the form is validated against.
#[derive(Clone, Debug)]
pub struct ValidationContext<'a> {
    pub registry: &'a ChainRegistry,
    pub gas_config: Option<&'a GasConfig>,
    pub available_amount_minus_fees: Option<Amount>,
    pub keychain_version: Option<&'a str>,
    pub available_assets: Option<&'a HashMap<Address, AssetWithAmount>>,
    pub display_gas_fee_amount: Option<Amount>,
}

impl<'a> ValidationContext<'a> {
    /// A context with nothing known besides the chain registry.
    pub fn new(registry: &'a ChainRegistry) -> Self {
        Self {
            registry,
            gas_config: None,
            available_amount_minus_fees: None,
            keychain_version: None,
            available_assets: None,
            display_gas_fee_amount: None,
        }
    }
}

/// Whether `destination` may receive the source asset.
///
/// Namada destinations always pass and NAM may go to an Osmosis address.
/// Other destinations must carry the bech32 prefix of the asset's chain.
pub fn is_valid_destination_address(
    registry: &ChainRegistry,
    asset: Option<&Asset>,
    destination: &str,
) -> bool {
    if is_namada_address(destination) {
        return true;
    }

    let is_nam = asset.map(|a| a.symbol == "NAM").unwrap_or(false);
    if is_nam && destination.starts_with("osmo") {
        return true;
    }

    let chain = match asset.and_then(|a| registry.chain_from_asset(a)) {
        Some(chain) => chain,
        None => return false,
    };
    if destination.is_empty() {
        return false;
    }

    destination.starts_with(chain.bech32_prefix.as_deref().unwrap_or_default())
}

/// Validates a transfer form and returns the first failing check.
pub fn validate_transfer_form(
    source: &TransferSource,
    destination: &TransferDestination,
    ctx: &ValidationContext<'_>,
) -> ValidationResult {
    let result = run_checks(source, destination, ctx);
    debug!("Transfer form validated as {:?}", result);
    result
}

fn run_checks(
    source: &TransferSource,
    destination: &TransferDestination,
    ctx: &ValidationContext<'_>,
) -> ValidationResult {
    let shielded_operation = source.is_shielded_address || destination.is_shielded_address;
    let destination_address = destination.address.as_deref().unwrap_or_default();

    if source.address == destination.address {
        return ValidationResult::TheSameAddress;
    }

    if source.selected_asset_symbol.as_deref().unwrap_or_default().is_empty() {
        return ValidationResult::NoSelectedAsset;
    }

    // An empty destination is reported further down as NoDestinationWallet
    if !destination_address.is_empty()
        && !is_valid_destination_address(ctx.registry, source.asset.as_ref(), destination_address)
    {
        return ValidationResult::CustomAddressNotMatchingChain;
    }

    if shielded_operation {
        if let Some(version) = ctx.keychain_version.filter(|v| !v.is_empty()) {
            if !is_keychain_compatible_with_masp(version) {
                return ValidationResult::KeychainNotCompatibleWithMasp;
            }
        }
    }

    let fees_paid_externally = is_ibc_address(source.address.as_deref().unwrap_or_default());
    if !has_enough_balance_for_fees(
        fees_paid_externally,
        ctx.available_assets,
        ctx.gas_config,
        ctx.display_gas_fee_amount,
    ) {
        return ValidationResult::NotEnoughBalanceForFees;
    }

    let amount = match source.amount {
        Some(amount) if !amount.is_zero() => amount,
        _ => return ValidationResult::NoAmount,
    };

    match ctx.available_amount_minus_fees {
        Some(available) if amount <= available => {}
        _ => return ValidationResult::NotEnoughBalance,
    }

    if destination_address.is_empty() {
        return ValidationResult::NoDestinationWallet;
    }

    if shielded_operation {
        if let Some(ledger) = &source.ledger_account_info {
            if !ledger.device_connected {
                return ValidationResult::NoLedgerConnected;
            }
        }
    }

    ValidationResult::Ok
}

/// Text for the submit button.
///
/// `overrides` replaces the default message of specific outcomes.
pub fn button_text(
    is_submitting: bool,
    result: ValidationResult,
    available_amount_minus_fees: Option<Amount>,
    overrides: &HashMap<ValidationResult, String>,
) -> String {
    if is_submitting {
        return "Submitting...".to_string();
    }

    let text = |default: &str| -> String {
        overrides
            .get(&result)
            .filter(|text| !text.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    if !result.is_ok() {
        return text(result.message());
    }
    if available_amount_minus_fees.is_none() {
        return text("Wallet amount not available");
    }
    "Submit".to_string()
}

/// Button overrides used by the shield form.
pub fn shield_button_overrides() -> HashMap<ValidationResult, String> {
    let mut overrides = HashMap::new();
    overrides.insert(
        ValidationResult::NoAmount,
        "Define an amount to shield".to_string(),
    );
    overrides
}

/// Button overrides used by the unshield form.
pub fn unshield_button_overrides() -> HashMap<ValidationResult, String> {
    let mut overrides = HashMap::new();
    overrides.insert(
        ValidationResult::NoAmount,
        "Define an amount to unshield".to_string(),
    );
    overrides
}
