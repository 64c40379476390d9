//! Conversions between display and base denominations.

use crate::errors::CoreError;
use crate::types::{Address, Amount, Asset, AssetWithAmount, GasConfig};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Decimal places kept when fees are subtracted from a balance.
pub const DISPLAY_DECIMAL_PLACES: u32 = 6;

fn pow10(exponent: u32) -> Result<Decimal, CoreError> {
    10i128
        .checked_pow(exponent)
        .and_then(|value| Decimal::try_from_i128_with_scale(value, 0).ok())
        .ok_or_else(|| CoreError::InvalidAmount(format!("exponent {} out of range", exponent)))
}

/// Converts a display amount to the asset's smallest unit, truncating dust.
pub fn to_base_amount(asset: &Asset, display_amount: Amount) -> Result<Amount, CoreError> {
    let factor = pow10(asset.decimals())?;
    display_amount
        .checked_mul(factor)
        .map(|base| base.round_dp_with_strategy(0, RoundingStrategy::ToZero))
        .ok_or_else(|| {
            CoreError::InvalidAmount(format!(
                "{} {} overflows the base denomination",
                display_amount, asset.symbol
            ))
        })
}

/// Converts an amount in the asset's smallest unit to its display form.
pub fn to_display_amount(asset: &Asset, base_amount: Amount) -> Result<Amount, CoreError> {
    let factor = pow10(asset.decimals())?;
    base_amount
        .checked_div(factor)
        .map(|amount| amount.normalize())
        .ok_or_else(|| CoreError::InvalidAmount(base_amount.to_string()))
}

/// A gas fee expressed in its token's display denomination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayGasFee {
    /// Fee amount in display denomination
    pub total_display_amount: Amount,
    /// Token paying the fee
    pub token: Address,
    /// Asset of the fee token, when known
    pub asset: Option<Asset>,
}

/// Expresses the fee of a gas configuration in display units.
///
/// A fee token missing from `assets` is shown in its smallest unit.
pub fn display_gas_fee(
    gas_config: &GasConfig,
    assets: &HashMap<Address, Asset>,
) -> Result<DisplayGasFee, CoreError> {
    let total = gas_config.total_fee_in_min_denom()?;
    let asset = assets.get(&gas_config.gas_token).cloned();
    let total_display_amount = match &asset {
        Some(asset) => to_display_amount(asset, total)?,
        None => total,
    };

    Ok(DisplayGasFee {
        total_display_amount,
        token: gas_config.gas_token.clone(),
        asset,
    })
}

/// Amount the user can still send once fees are reserved.
///
/// Fees are only reserved when they are paid in the selected asset. The
/// result is rounded to six decimal places and never negative.
pub fn available_amount_minus_fees(
    available: Option<Amount>,
    selected_token: Option<&str>,
    gas_config: Option<&GasConfig>,
    display_fee: Option<Amount>,
) -> Option<Amount> {
    let available = available?;

    let fee = match (display_fee, gas_config) {
        (Some(fee), Some(config)) if Some(config.gas_token.as_str()) == selected_token => fee,
        _ => return Some(available),
    };
    if fee.is_zero() {
        return Some(available);
    }

    let remaining = available
        .saturating_sub(fee)
        .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    Some(remaining.max(Decimal::ZERO))
}

/// Looks up the display balance of an asset by token address.
pub fn balance_of(assets: &HashMap<Address, AssetWithAmount>, token: &str) -> Option<Amount> {
    assets.get(token).map(|entry| entry.amount)
}
