//! Transaction building and broadcasting.
//!
//! Signing, proof generation and broadcasting happen in an external SDK
//! service. This module only hands it [`TransferParams`] and staking
//! commitments over JSON-RPC.

use crate::errors::ServiceError;
use crate::rpc::RpcClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;
use tracing::{error, info};
use wallet_core::address::is_shielded_address;
use wallet_core::staking::StakingCommitment;
use wallet_core::types::{Address, ChainId, GasConfig, TransferParams, TransferType};

/// Message shown for any failed submission.
pub const TRANSACTION_FAILED: &str = "Transaction failed";

/// Outcome of a broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub hash: String,
}

/// The transaction-building SDK.
#[async_trait]
pub trait TransactionSdk: Send + Sync {
    /// Builds, signs and broadcasts a transfer.
    async fn transfer(&self, params: &TransferParams) -> Result<BroadcastResult, ServiceError>;

    /// Builds, signs and broadcasts staking commitments as one transaction.
    async fn stake(
        &self,
        chain_id: &ChainId,
        source: &Address,
        commitments: &[StakingCommitment],
        gas_config: &GasConfig,
    ) -> Result<BroadcastResult, ServiceError>;
}

/// SDK method building a given transfer.
pub fn transfer_method(transfer_type: TransferType, source: &str) -> &'static str {
    match transfer_type {
        TransferType::IbcDeposit => "ibcDeposit",
        TransferType::IbcWithdraw => "buildIbcTransfer",
        TransferType::Shield => "buildShieldingTransfer",
        TransferType::Unshield => "buildUnshieldingTransfer",
        TransferType::NamadaTransfer if is_shielded_address(source) => "buildShieldedTransfer",
        TransferType::NamadaTransfer => "buildTransparentTransfer",
    }
}

/// SDK service reached over JSON-RPC.
#[derive(Debug)]
pub struct RpcTransactionSdk {
    rpc: RpcClient,
}

impl RpcTransactionSdk {
    pub fn new(node_url: &str) -> Self {
        Self {
            rpc: RpcClient::new(node_url),
        }
    }

    fn broadcast_result(result: serde_json::Value) -> Result<BroadcastResult, ServiceError> {
        // Older SDK builds answer with the bare hash
        if let Some(hash) = result.as_str() {
            return Ok(BroadcastResult {
                hash: hash.to_string(),
            });
        }
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl TransactionSdk for RpcTransactionSdk {
    async fn transfer(&self, params: &TransferParams) -> Result<BroadcastResult, ServiceError> {
        let method = transfer_method(params.transfer_type, &params.source);
        let result = self.rpc.call(method, json!([params])).await?;
        Self::broadcast_result(result)
    }

    async fn stake(
        &self,
        chain_id: &ChainId,
        source: &Address,
        commitments: &[StakingCommitment],
        gas_config: &GasConfig,
    ) -> Result<BroadcastResult, ServiceError> {
        let params = json!([{
            "chain_id": chain_id,
            "source": source,
            "commitments": commitments,
            "gas_config": gas_config,
        }]);
        let result = self.rpc.call("buildStakingTx", params).await?;
        Self::broadcast_result(result)
    }
}

/// A submission that failed; the cause is only logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionFailed;

impl fmt::Display for TransactionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TRANSACTION_FAILED)
    }
}

impl StdError for TransactionFailed {}

/// Submits a transfer and returns its hash.
///
/// Whatever goes wrong in the SDK reaches the caller as [`TransactionFailed`].
pub async fn submit_transfer<S>(
    sdk: &S,
    params: &TransferParams,
) -> Result<String, TransactionFailed>
where
    S: TransactionSdk + ?Sized,
{
    match sdk.transfer(params).await {
        Ok(result) => {
            info!(
                "Submitted {} from {} to {}: {}",
                params.transfer_type, params.source, params.destination, result.hash
            );
            Ok(result.hash)
        }
        Err(e) => {
            error!("{} transfer failed: {}", params.transfer_type, e);
            Err(TransactionFailed)
        }
    }
}
