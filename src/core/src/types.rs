//! Core types for the shielded wallet interface.

use crate::errors::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bech32 address string (transparent, shielded or foreign chain).
pub type Address = String;

/// Chain identifier as registered in the chain registry.
pub type ChainId = String;

/// Amounts and prices, kept as arbitrary precision decimals.
pub type Amount = Decimal;

/// Base denomination of the native token.
pub const NATIVE_BASE_DENOM: &str = "unam";

/// Symbol of the native token.
pub const NATIVE_SYMBOL: &str = "NAM";

/// One denomination unit of an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    /// Denomination name
    pub denom: String,
    /// Power of ten relative to the base denomination
    pub exponent: u32,
}

/// Counterparty information of an IBC trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Name of the chain the asset originates from
    pub chain_name: String,
    /// Denomination on that chain
    #[serde(default)]
    pub base_denom: String,
    /// Channel on that chain, if known
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// IBC trace of an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Trace kind, e.g. "ibc"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Where the asset came from
    pub counterparty: Counterparty,
}

/// An asset as described by the chain registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol
    pub symbol: String,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Base (smallest) denomination
    pub base: String,
    /// Display denomination
    pub display: String,
    /// On-chain token address, for assets held on Namada
    #[serde(default)]
    pub address: Option<Address>,
    /// Known denomination units
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
    /// IBC traces, first one is the direct counterparty
    #[serde(default)]
    pub traces: Vec<Trace>,
    /// Price feed identifier
    #[serde(default)]
    pub coingecko_id: Option<String>,
}

impl Asset {
    /// Number of decimals between the base and the display denomination.
    pub fn decimals(&self) -> u32 {
        self.denom_units
            .iter()
            .find(|unit| unit.denom == self.display)
            .map(|unit| unit.exponent)
            .unwrap_or(0)
    }

    /// Whether this is the native token.
    pub fn is_native(&self) -> bool {
        self.base == NATIVE_BASE_DENOM
    }

    /// Chain name of the first IBC trace, if any.
    pub fn origin_chain_name(&self) -> Option<&str> {
        self.traces
            .first()
            .map(|trace| trace.counterparty.chain_name.as_str())
    }
}

/// An asset together with a display amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWithAmount {
    /// The asset
    pub asset: Asset,
    /// Amount in display denomination
    pub amount: Amount,
}

/// An asset together with a display amount and the chain holding it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWithAmountAndChain {
    /// The asset
    pub asset: Asset,
    /// Amount in display denomination
    pub amount: Amount,
    /// Chain the balance lives on
    pub chain_name: String,
}

/// Gas parameters attached to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// Gas price expressed in the fee token's smallest unit
    pub gas_price_in_min_denom: Amount,
    /// Gas units the transaction may consume
    pub gas_limit: Amount,
    /// Token paying the fee
    pub gas_token: Address,
}

impl GasConfig {
    /// Total fee in the fee token's smallest unit.
    pub fn total_fee_in_min_denom(&self) -> Result<Amount, CoreError> {
        self.gas_limit
            .checked_mul(self.gas_price_in_min_denom)
            .ok_or_else(|| {
                CoreError::InvalidAmount(format!(
                    "fee of {} gas at {} overflows",
                    self.gas_limit, self.gas_price_in_min_denom
                ))
            })
    }
}

/// One row of the gas price table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPriceEntry {
    /// Token address
    pub token: Address,
    /// Gas price in the token's smallest unit
    pub gas_price_in_min_denom: Amount,
}

/// Balance of one token in its smallest unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Token address
    pub token: Address,
    /// Amount in the smallest unit
    pub min_denom_amount: Amount,
}

/// Gas estimate returned by the indexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    /// Lowest observed gas usage
    pub min: u64,
    /// Average observed gas usage
    pub avg: u64,
    /// Highest observed gas usage
    pub max: u64,
    /// Number of samples the estimate is built on
    pub total_estimates: u64,
}

impl Default for GasEstimate {
    fn default() -> Self {
        Self {
            min: 50_000,
            avg: 50_000,
            max: 50_000,
            total_estimates: 0,
        }
    }
}

/// Transaction kinds known to the indexer gas estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    Bond,
    ClaimRewards,
    Unbond,
    TransparentTransfer,
    ShieldedTransfer,
    ShieldingTransfer,
    UnshieldingTransfer,
    VoteProposal,
    IbcTransfer,
    Withdraw,
    RevealPk,
    Redelegate,
}

impl TxKind {
    /// All kinds, in the order the indexer expects its parameters.
    pub const ALL: [TxKind; 12] = [
        TxKind::Bond,
        TxKind::ClaimRewards,
        TxKind::Unbond,
        TxKind::TransparentTransfer,
        TxKind::ShieldedTransfer,
        TxKind::ShieldingTransfer,
        TxKind::UnshieldingTransfer,
        TxKind::VoteProposal,
        TxKind::IbcTransfer,
        TxKind::Withdraw,
        TxKind::RevealPk,
        TxKind::Redelegate,
    ];

    /// Query parameter name used by the indexer.
    pub fn query_name(&self) -> &'static str {
        match self {
            TxKind::Bond => "bond",
            TxKind::ClaimRewards => "claimRewards",
            TxKind::Unbond => "unbond",
            TxKind::TransparentTransfer => "transparentTransfer",
            TxKind::ShieldedTransfer => "shieldedTransfer",
            TxKind::ShieldingTransfer => "shieldingTransfer",
            TxKind::UnshieldingTransfer => "unshieldingTransfer",
            TxKind::VoteProposal => "voteProposal",
            TxKind::IbcTransfer => "ibcTransfer",
            TxKind::Withdraw => "withdraw",
            TxKind::RevealPk => "revealPk",
            TxKind::Redelegate => "redelegate",
        }
    }
}

/// The five mutually exclusive transfer flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferType {
    /// Assets arrive from another chain
    IbcDeposit,
    /// Assets leave for another chain
    IbcWithdraw,
    /// Transparent balance moves into the shielded pool
    Shield,
    /// Shielded balance moves out of the shielded pool
    Unshield,
    /// Transfer that stays on Namada
    NamadaTransfer,
}

impl TransferType {
    /// Stable tag, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::IbcDeposit => "ibc-deposit",
            TransferType::IbcWithdraw => "ibc-withdraw",
            TransferType::Shield => "shield",
            TransferType::Unshield => "unshield",
            TransferType::NamadaTransfer => "namada-transfer",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter object handed to the transaction-building SDK.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Flow this transfer follows
    pub transfer_type: TransferType,
    /// Chain the transaction is built for
    pub chain_id: ChainId,
    /// Sending address
    pub source: Address,
    /// Receiving address
    pub destination: Address,
    /// Token being moved
    pub token: Address,
    /// Amount in the token's smallest unit
    pub amount_in_base_denom: Amount,
    /// Optional memo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Account paying the fee when it differs from the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_payer: Option<Address>,
    /// Gas parameters
    pub gas_config: GasConfig,
}

/// Hardware wallet account details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccountInfo {
    /// Whether the signing device is connected and the app is open
    pub device_connected: bool,
}

/// Lifecycle of a submitted transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Broadcasted,
    Success,
    Error,
}

impl TransactionStatus {
    /// Whether the transaction reached a final state.
    pub fn is_complete(&self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Error)
    }
}

/// A transfer as recorded in the local history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTransactionData {
    /// Transaction hash
    pub hash: String,
    /// Flow the transfer followed
    pub transfer_type: TransferType,
    /// Current status
    pub status: TransactionStatus,
    /// Sending address
    pub source: Address,
    /// Receiving address
    pub destination: Address,
    /// Symbol of the transferred asset
    pub asset_symbol: String,
    /// Display amount
    pub amount: Amount,
    /// Memo, if any
    #[serde(default)]
    pub memo: Option<String>,
    /// Height the transaction was included at
    #[serde(default)]
    pub block_height: Option<u64>,
    /// Block time, once resolved
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl fmt::Display for TransferTransactionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer {{ hash: {}, type: {}, status: {:?}, amount: {} {} }}",
            self.hash, self.transfer_type, self.status, self.amount, self.asset_symbol
        )
    }
}
