//! Classify command for the CLI wallet.

use serde::Serialize;
use wallet_core::chain::{label_for, ChainRegistry};
use wallet_core::classifier::{requires_ibc_channels, tx_kind_for};
use wallet_core::determine_transfer_type;
use wallet_core::types::{TransferType, TxKind};

/// How a source/destination pair would be transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub transfer_type: TransferType,
    pub tx_kind: TxKind,
    pub requires_ibc_channels: bool,
    pub source_label: Option<String>,
    pub destination_label: Option<String>,
}

/// Runs the classify command.
pub fn run(registry: &ChainRegistry, source: &str, destination: &str) -> Classification {
    let (source, destination) = (source.trim(), destination.trim());

    Classification {
        transfer_type: determine_transfer_type(source, destination),
        tx_kind: tx_kind_for(source, destination),
        requires_ibc_channels: requires_ibc_channels(source, destination),
        source_label: label_for(registry, &source.to_string()),
        destination_label: label_for(registry, &destination.to_string()),
    }
}
