//! Transfer type resolution.
//!
//! The flow a transfer follows is decided only from the shapes of its two
//! addresses. Rules are checked in order and the first match wins:
//!
//! 1. IBC source: `ibc-deposit`
//! 2. IBC destination: `ibc-withdraw`
//! 3. shielded destination from a non-shielded source: `shield`
//! 4. shielded source to a transparent (or IBC) destination: `unshield`
//! 5. anything else: `namada-transfer`
//!
//! A shielded to shielded transfer matches neither 3 nor 4 and lands on
//! `namada-transfer`.

use crate::address::{is_ibc_address, is_shielded_address, is_transparent_address};
use crate::types::{TransferType, TxKind};
use tracing::trace;

/// Decides which flow a source/destination pair implies.
///
/// Unset addresses are passed as empty strings.
pub fn determine_transfer_type(source: &str, destination: &str) -> TransferType {
    let source_is_ibc = is_ibc_address(source);
    let destination_is_ibc = is_ibc_address(destination);

    let shielding = is_shielded_address(destination) && !is_shielded_address(source);
    let unshielding =
        (is_shielded_address(source) && is_transparent_address(destination)) || destination_is_ibc;

    let transfer_type = if source_is_ibc {
        TransferType::IbcDeposit
    } else if destination_is_ibc {
        TransferType::IbcWithdraw
    } else if shielding {
        TransferType::Shield
    } else if unshielding {
        TransferType::Unshield
    } else {
        TransferType::NamadaTransfer
    };

    trace!("{} -> {} resolved to {}", source, destination, transfer_type);
    transfer_type
}

/// Whether either side of the transfer touches the shielded pool.
pub fn involves_shielded_pool(source: &str, destination: &str) -> bool {
    is_shielded_address(source) || is_shielded_address(destination)
}

/// Funds enter the shielded pool.
pub fn is_shielding(source: &str, destination: &str) -> bool {
    is_shielded_address(destination) && !is_shielded_address(source)
}

/// Funds leave the shielded pool.
pub fn is_unshielding(source: &str, destination: &str) -> bool {
    is_shielded_address(source) && !is_shielded_address(destination)
}

/// Whether an IBC channel has to be picked for this pair.
pub fn requires_ibc_channels(source: &str, destination: &str) -> bool {
    is_ibc_address(source) || is_ibc_address(destination)
}

/// Transaction kind used to ask the indexer for a gas estimate.
pub fn tx_kind_for(source: &str, destination: &str) -> TxKind {
    match determine_transfer_type(source, destination) {
        TransferType::IbcDeposit | TransferType::IbcWithdraw => TxKind::IbcTransfer,
        TransferType::Shield => TxKind::ShieldingTransfer,
        TransferType::Unshield => TxKind::UnshieldingTransfer,
        TransferType::NamadaTransfer if is_shielded_address(source) => TxKind::ShieldedTransfer,
        TransferType::NamadaTransfer => TxKind::TransparentTransfer,
    }
}
