//! Tests for transfer type resolution.

use crate::mocks::{COSMOS, OSMOSIS, OTHER_TRANSPARENT, SHIELDED, TRANSPARENT};
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use wallet_core::classifier::{is_shielding, is_unshielding, requires_ibc_channels, tx_kind_for};
use wallet_core::determine_transfer_type;
use wallet_core::types::{TransferType, TxKind};

const IBC_PREFIXES: [&str; 6] = ["osmo", "cosmos", "celestia", "noble", "stride", "axelar"];

fn random_data(rng: &mut impl Rng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect()
}

fn random_ibc_address(rng: &mut impl Rng) -> String {
    let prefix = IBC_PREFIXES.choose(rng).unwrap();
    let len = rng.gen_range(20..50);
    format!("{}1{}", prefix, random_data(rng, len))
}

fn random_destination(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..6) {
        0 => TRANSPARENT.to_string(),
        1 => SHIELDED.to_string(),
        2 => random_ibc_address(rng),
        3 => String::new(),
        4 => format!("tnam1{}", random_data(rng, 40)),
        _ => {
            let len = rng.gen_range(1..30);
            random_data(rng, len)
        }
    }
}

/// An IBC source is a deposit whatever the destination looks like.
#[test]
fn test_ibc_source_always_deposits() {
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let source = random_ibc_address(&mut rng);
        let destination = random_destination(&mut rng);
        assert_eq!(
            determine_transfer_type(&source, &destination),
            TransferType::IbcDeposit,
            "{} -> {}",
            source,
            destination
        );
        assert!(requires_ibc_channels(&source, &destination));
    }
}

/// Tests the shield and unshield directions.
#[test]
fn test_shield_and_unshield() {
    assert_eq!(determine_transfer_type(TRANSPARENT, SHIELDED), TransferType::Shield);
    assert_eq!(determine_transfer_type(SHIELDED, TRANSPARENT), TransferType::Unshield);
    assert!(is_shielding(TRANSPARENT, SHIELDED));
    assert!(is_unshielding(SHIELDED, TRANSPARENT));
    assert_eq!(tx_kind_for(TRANSPARENT, SHIELDED), TxKind::ShieldingTransfer);
    assert_eq!(tx_kind_for(SHIELDED, TRANSPARENT), TxKind::UnshieldingTransfer);
}

/// Tests transfers that leave for another chain.
#[test]
fn test_ibc_withdraw() {
    assert_eq!(determine_transfer_type(TRANSPARENT, OSMOSIS), TransferType::IbcWithdraw);
    assert_eq!(determine_transfer_type(SHIELDED, COSMOS), TransferType::IbcWithdraw);
    assert_eq!(tx_kind_for(SHIELDED, COSMOS), TxKind::IbcTransfer);
}

/// Tests transfers that stay on Namada.
#[test]
fn test_namada_transfers() {
    assert_eq!(
        determine_transfer_type(TRANSPARENT, OTHER_TRANSPARENT),
        TransferType::NamadaTransfer
    );
    assert_eq!(tx_kind_for(TRANSPARENT, OTHER_TRANSPARENT), TxKind::TransparentTransfer);

    // Shielded to shielded is neither shielding nor unshielding
    assert_eq!(determine_transfer_type(SHIELDED, SHIELDED), TransferType::NamadaTransfer);
    assert_eq!(tx_kind_for(SHIELDED, SHIELDED), TxKind::ShieldedTransfer);
}

/// Unset or malformed addresses fall through to a Namada transfer.
#[test]
fn test_unset_addresses() {
    assert_eq!(determine_transfer_type("", ""), TransferType::NamadaTransfer);
    assert_eq!(determine_transfer_type(TRANSPARENT, ""), TransferType::NamadaTransfer);
    assert_eq!(determine_transfer_type("", SHIELDED), TransferType::Shield);
    assert_eq!(determine_transfer_type("not an address", TRANSPARENT), TransferType::NamadaTransfer);
    assert!(!requires_ibc_channels("", ""));
}
