//! Fee token selection and fee sufficiency checks.

use crate::errors::CoreError;
use crate::types::{
    Address, Amount, AssetWithAmount, GasConfig, GasEstimate, GasPriceEntry, TokenBalance, TxKind,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Picks the fee token that costs the least in USD.
///
/// A token is a candidate only when it has a USD price and the user holds at
/// least `gas_limit * gas_price_in_min_denom` of it. Among candidates the one
/// minimising `gas_limit * gas_price_in_min_denom * usd_price` wins; on a tie
/// the entry listed first in `gas_price_table` is kept. A fee too large to
/// represent is never affordable.
pub fn find_cheapest_token(
    gas_price_table: &[GasPriceEntry],
    balances: &[TokenBalance],
    gas_limit: Amount,
    usd_prices: &HashMap<Address, Amount>,
) -> Option<Address> {
    // An overflowed USD cost ranks behind every representable one
    let mut cheapest: Option<(&GasPriceEntry, Option<Amount>)> = None;

    for entry in gas_price_table {
        let usd_price = match usd_prices.get(&entry.token) {
            Some(price) => *price,
            None => continue,
        };

        // A fee that cannot be represented cannot be covered either
        let required = match gas_limit.checked_mul(entry.gas_price_in_min_denom) {
            Some(required) => required,
            None => continue,
        };
        let balance = balances.iter().find(|balance| balance.token == entry.token);
        match balance {
            Some(balance) if balance.min_denom_amount >= required => {}
            _ => continue,
        }

        let cost = required.checked_mul(usd_price);
        let is_cheaper = match (&cheapest, cost) {
            (None, _) => true,
            (Some((_, Some(best))), Some(cost)) => cost < *best,
            (Some((_, None)), Some(_)) => true,
            (Some(_), None) => false,
        };
        if is_cheaper {
            cheapest = Some((entry, cost));
        }
    }

    cheapest.map(|(entry, cost)| {
        debug!("Cheapest fee token is {} at {:?} USD-weighted units", entry.token, cost);
        entry.token.clone()
    })
}

/// Whether the selected fee token covers the displayed fee.
///
/// Always passes when the fee is paid by an external wallet. Otherwise the
/// fee token must be among `available_assets` with a balance strictly
/// greater than the fee.
pub fn has_enough_balance_for_fees(
    fees_paid_externally: bool,
    available_assets: Option<&HashMap<Address, AssetWithAmount>>,
    gas_config: Option<&GasConfig>,
    display_gas_fee: Option<Amount>,
) -> bool {
    if fees_paid_externally {
        return true;
    }

    let (assets, config, fee) = match (available_assets, gas_config, display_gas_fee) {
        (Some(assets), Some(config), Some(fee)) => (assets, config, fee),
        _ => return false,
    };

    match assets.get(&config.gas_token) {
        Some(fee_asset) => fee_asset.amount > fee,
        None => false,
    }
}

/// Builds the gas configuration for a transaction.
///
/// The gas limit comes from the estimate's average; the fee token is the
/// cheapest affordable one, falling back to the native token.
pub fn gas_config_for(
    gas_price_table: &[GasPriceEntry],
    balances: &[TokenBalance],
    estimate: &GasEstimate,
    usd_prices: &HashMap<Address, Amount>,
    native_token: &str,
) -> Result<GasConfig, CoreError> {
    let gas_limit = Decimal::from(estimate.avg);
    let token = find_cheapest_token(gas_price_table, balances, gas_limit, usd_prices)
        .unwrap_or_else(|| native_token.to_string());

    let entry = gas_price_table
        .iter()
        .find(|entry| entry.token == token)
        .ok_or_else(|| CoreError::MissingGasPrice(token.clone()))?;

    Ok(GasConfig {
        gas_price_in_min_denom: entry.gas_price_in_min_denom,
        gas_limit,
        gas_token: token,
    })
}

/// Counts how many transactions of each kind are being estimated.
///
/// The result follows [`TxKind::ALL`] order; kinds that do not appear are
/// `None` so they can be left out of the query.
pub fn tx_kind_counts(kinds: &[TxKind]) -> Vec<(TxKind, Option<u32>)> {
    TxKind::ALL
        .iter()
        .map(|kind| {
            let count = kinds.iter().filter(|k| *k == kind).count() as u32;
            (*kind, if count == 0 { None } else { Some(count) })
        })
        .collect()
}
