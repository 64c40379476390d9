//! Balance aggregation and fiat totals.

use crate::amount::to_display_amount;
use crate::errors::CoreError;
use crate::types::{Address, Amount, Asset, AssetWithAmount, TokenBalance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A held token with its display amount and, when priced, its USD value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub address: Address,
    pub asset: Asset,
    pub amount: Amount,
    #[serde(default)]
    pub dollar: Option<Amount>,
}

/// Bonded, unbonding and withdrawable totals of an account, in NAM.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingTotals {
    pub total_bonded: Amount,
    pub total_unbonded: Amount,
    pub total_withdrawable: Amount,
}

impl StakingTotals {
    pub fn total(&self) -> Amount {
        self.total_bonded
            .saturating_add(self.total_unbonded)
            .saturating_add(self.total_withdrawable)
    }
}

/// Account value in USD, split by where the funds sit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountsInFiat {
    pub shielded: Amount,
    pub unshielded: Amount,
    pub staking: Amount,
    pub total: Amount,
}

/// Sum of the USD values of the priced holdings.
pub fn total_dollar(list: &[TokenHolding]) -> Amount {
    list.iter()
        .filter_map(|holding| holding.dollar)
        .fold(Decimal::ZERO, |total, dollar| total.saturating_add(dollar))
}

/// Amount of the native token among the holdings, zero when absent.
pub fn total_native(list: &[TokenHolding]) -> Amount {
    list.iter()
        .find(|holding| holding.asset.is_native())
        .map(|holding| holding.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Joins raw balances with the registry assets they refer to.
///
/// Balances of tokens without a known asset are dropped.
pub fn map_addresses_to_assets(
    balances: &[TokenBalance],
    assets: &[Asset],
) -> Result<HashMap<Address, AssetWithAmount>, CoreError> {
    let mut map = HashMap::new();
    for balance in balances {
        let asset = assets
            .iter()
            .find(|asset| asset.address.as_deref() == Some(balance.token.as_str()));
        if let Some(asset) = asset {
            let amount = to_display_amount(asset, balance.min_denom_amount)?;
            map.insert(
                balance.token.clone(),
                AssetWithAmount {
                    asset: asset.clone(),
                    amount,
                },
            );
        }
    }
    Ok(map)
}

/// Attaches USD values to held assets, when a price is known.
///
/// The result is sorted by token address.
pub fn map_assets_to_token_balances(
    assets: &HashMap<Address, AssetWithAmount>,
    prices: &HashMap<Address, Amount>,
) -> Vec<TokenHolding> {
    let mut holdings: Vec<TokenHolding> = assets
        .iter()
        .map(|(address, entry)| TokenHolding {
            address: address.clone(),
            asset: entry.asset.clone(),
            amount: entry.amount,
            dollar: prices
                .get(address)
                .and_then(|price| entry.amount.checked_mul(*price)),
        })
        .collect();
    holdings.sort_by(|a, b| a.address.cmp(&b.address));
    holdings
}

/// Keeps only the assets the user actually holds.
pub fn filter_available_assets_with_balance(
    assets: &HashMap<Address, AssetWithAmount>,
) -> HashMap<Address, AssetWithAmount> {
    assets
        .iter()
        .filter(|(_, entry)| entry.amount > Decimal::ZERO)
        .map(|(address, entry)| (address.clone(), entry.clone()))
        .collect()
}

/// Values shielded, transparent and staked funds in USD.
///
/// Staked funds are valued at the native token price, zero when unknown.
pub fn amounts_in_fiat(
    shielded: &[TokenHolding],
    unshielded: &[TokenHolding],
    staking: Option<&StakingTotals>,
    native_price: Option<Amount>,
) -> AmountsInFiat {
    let shielded = total_dollar(shielded);
    let unshielded = total_dollar(unshielded);
    let staking = match (staking, native_price) {
        (Some(totals), Some(price)) => totals.total().saturating_mul(price),
        _ => Decimal::ZERO,
    };

    AmountsInFiat {
        shielded,
        unshielded,
        staking,
        total: shielded.saturating_add(unshielded).saturating_add(staking),
    }
}
