//! Claim-and-stake command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use std::collections::HashMap;
use tracing::{error, info};
use wallet_core::staking::{claim_and_stake_commitments, ClaimRewardsProps};
use wallet_core::types::{Address, Amount, TxKind};
use wallet_services::sdk::TRANSACTION_FAILED;

/// Claims rewards from `validators` and bonds them back.
///
/// Every validator in the list is claimed; only those with claimable
/// rewards get a bond.
pub async fn run(
    ctx: &WalletContext,
    source: &str,
    validators: &[Address],
) -> Result<String, WalletError> {
    let rewards = ctx.indexer.claimable_rewards(source).await?;
    let rewards_by_validator: HashMap<Address, Amount> = rewards
        .into_iter()
        .filter(|reward| !reward.min_denom_amount.is_zero())
        .map(|reward| (reward.validator, reward.min_denom_amount))
        .collect();

    let claims: Vec<ClaimRewardsProps> = validators
        .iter()
        .map(|validator| ClaimRewardsProps {
            source: source.to_string(),
            validator: validator.clone(),
        })
        .collect();
    let commitments = claim_and_stake_commitments(&claims, &rewards_by_validator);

    let mut kinds = vec![TxKind::ClaimRewards; claims.len()];
    kinds.extend(std::iter::repeat(TxKind::Bond).take(commitments.len() - claims.len()));
    let gas_config = ctx.gas_config(source, &kinds).await?;

    info!("Submitting {} staking commitments for {}", commitments.len(), source);
    let result = ctx
        .sdk
        .stake(&ctx.config.chain_id, &source.to_string(), &commitments, &gas_config)
        .await
        .map_err(|e| {
            error!("Claim and stake failed: {}", e);
            WalletError::TransactionError(TRANSACTION_FAILED.to_string())
        })?;
    Ok(result.hash)
}
