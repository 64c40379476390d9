//! Tests for the shared state containers.

use crate::mocks::{dec, MockIndexer, OSMOSIS, SHIELDED, TRANSPARENT};
use chrono::{Duration, TimeZone, Utc};
use rand::Rng;
use std::collections::HashSet;
use tokio::runtime::Runtime;
use wallet_core::address::AddressKind;
use wallet_core::recent::{RecentAddresses, MAX_RECENT_ADDRESSES};
use wallet_core::session::WalletSession;
use wallet_core::transactions::{filter_complete, filter_pending};
use wallet_core::types::{TransactionStatus, TransferTransactionData, TransferType};
use wallet_core::url_state::{UrlState, PARAM_ASSET, PARAM_CHAIN, PARAM_SHIELDED};
use wallet_services::indexer::add_timestamps;

fn transfer(hash: &str, status: TransactionStatus, height: Option<u64>) -> TransferTransactionData {
    TransferTransactionData {
        hash: hash.to_string(),
        transfer_type: TransferType::Shield,
        status,
        source: TRANSPARENT.to_string(),
        destination: SHIELDED.to_string(),
        asset_symbol: "NAM".to_string(),
        amount: dec("1.5"),
        memo: None,
        block_height: height,
        timestamp: None,
    }
}

/// Recent addresses stay capped and unique under random use.
#[test]
fn test_recent_addresses_capped_and_unique() {
    let mut rng = rand::thread_rng();
    let recent = RecentAddresses::default();
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    for i in 0..500 {
        let address = format!("tnam1q{:03}", rng.gen_range(0..25));
        recent.add_at(&address, AddressKind::Transparent, None, start + Duration::seconds(i));

        let list = recent.list();
        assert!(list.len() <= MAX_RECENT_ADDRESSES);
        let unique: HashSet<&str> = list.iter().map(|entry| entry.address.as_str()).collect();
        assert_eq!(unique.len(), list.len());
        assert_eq!(list[0].address, address);
    }
}

/// A persisted list is restored newest first.
#[test]
fn test_recent_addresses_restored() {
    let older = RecentAddresses::default();
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    older.add_at(OSMOSIS, AddressKind::Ibc, Some("Osmosis".to_string()), start);
    older.add_at(SHIELDED, AddressKind::Shielded, None, start + Duration::minutes(5));

    let mut persisted = older.list();
    persisted.reverse();
    let session = WalletSession::with_recent_addresses(persisted);

    let list = session.recent_addresses.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].address, SHIELDED);
    assert_eq!(list[1].label.as_deref(), Some("Osmosis"));
}

/// Batched URL updates are seen as one change.
#[test]
fn test_url_state_batch() {
    let rt = Runtime::new().unwrap();

    rt.block_on(async {
        let url = UrlState::from_query("?asset=NAM&shielded=1");
        let mut rx = url.subscribe();

        url.set_many(&[
            (PARAM_ASSET, Some("OSMO")),
            (PARAM_CHAIN, Some("osmosis")),
            (PARAM_SHIELDED, None),
        ]);

        rx.changed().await.unwrap();
        assert_eq!(url.to_query(), "asset=OSMO&chain=osmosis");
        assert!(!rx.has_changed().unwrap());
    });
}

/// Tests connection bookkeeping in a session.
#[test]
fn test_session_connections() {
    let session = WalletSession::new();
    session.connect("osmosis-1", OSMOSIS);
    session.set_keychain_version(Some("0.2.0".to_string()));

    assert_eq!(session.connected_address("osmosis-1").as_deref(), Some(OSMOSIS));
    assert!(!session.supports_masp());

    session.disconnect("osmosis-1");
    session.set_keychain_version(Some("0.4.0".to_string()));
    assert_eq!(session.connected_address("osmosis-1"), None);
    assert!(session.supports_masp());
}

/// History entries get block times and can be found by hash.
#[test]
fn test_history_with_timestamps() {
    let rt = Runtime::new().unwrap();

    rt.block_on(async {
        let indexer = MockIndexer::new();
        let history = vec![
            transfer("A", TransactionStatus::Success, Some(10)),
            transfer("B", TransactionStatus::Pending, None),
            transfer("C", TransactionStatus::Error, Some(12)),
        ];
        let history = add_timestamps(&indexer, history).await;

        assert!(history[0].timestamp.is_some());
        assert!(history[1].timestamp.is_none());
        assert_eq!(filter_pending(&history).len(), 1);
        assert_eq!(filter_complete(&history).len(), 2);

        let session = WalletSession::new();
        session.history.update(|log| {
            for tx in history {
                log.record(TRANSPARENT, tx);
            }
        });
        session.history.with(|log| {
            assert_eq!(log.len(), 3);
            assert_eq!(
                log.find_by_hash("C").map(|tx| tx.status),
                Some(TransactionStatus::Error)
            );
        });
    });
}
