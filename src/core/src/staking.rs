//! Staking commitments.

use crate::types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Claim the rewards an account earned with one validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardsProps {
    pub source: Address,
    pub validator: Address,
}

/// Bond an amount of NAM to a validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondProps {
    pub source: Address,
    pub validator: Address,
    pub amount: Amount,
}

/// One commitment of a staking transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StakingCommitment {
    ClaimRewards(ClaimRewardsProps),
    Bond(BondProps),
}

/// Commitments that claim rewards and re-stake them.
///
/// Every claim comes first. Bonds follow in claim order, one for each claim
/// whose validator has claimable rewards; they must not be reordered before
/// the claims they spend.
pub fn claim_and_stake_commitments(
    claims: &[ClaimRewardsProps],
    rewards_by_validator: &HashMap<Address, Amount>,
) -> Vec<StakingCommitment> {
    let bonds = claims.iter().filter_map(|claim| {
        rewards_by_validator
            .get(&claim.validator)
            .map(|amount| BondProps {
                source: claim.source.clone(),
                validator: claim.validator.clone(),
                amount: *amount,
            })
    });

    claims
        .iter()
        .cloned()
        .map(StakingCommitment::ClaimRewards)
        .chain(bonds.map(StakingCommitment::Bond))
        .collect()
}
