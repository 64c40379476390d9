//! Wallet session state.

use crate::keychain::is_keychain_compatible_with_masp;
use crate::recent::{RecentAddress, RecentAddresses};
use crate::store::Store;
use crate::transactions::TransactionHistory;
use crate::types::{Address, ChainId};
use crate::url_state::UrlState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// What the session knows about the connected wallets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    /// Version reported by the keychain extension
    pub keychain_version: Option<String>,
    /// Account connected per chain
    pub connected_wallets: BTreeMap<ChainId, Address>,
    /// Whether the active account lives on a hardware device
    pub is_ledger_account: bool,
    /// Whether that device is connected
    pub ledger_connected: bool,
}

/// All state of one wallet session, passed explicitly to whoever needs it.
#[derive(Debug, Default)]
pub struct WalletSession {
    pub connection: Store<ConnectionState>,
    pub recent_addresses: RecentAddresses,
    pub url_state: UrlState,
    pub history: Store<TransactionHistory>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session restored with a persisted list of recent addresses.
    pub fn with_recent_addresses(recent: Vec<RecentAddress>) -> Self {
        Self {
            recent_addresses: RecentAddresses::from_list(recent),
            ..Self::default()
        }
    }

    pub fn connect(&self, chain_id: &str, address: &str) {
        info!("Connected {} on {}", address, chain_id);
        self.connection.update(|state| {
            state
                .connected_wallets
                .insert(chain_id.to_string(), address.to_string());
        });
    }

    pub fn disconnect(&self, chain_id: &str) {
        self.connection.update(|state| {
            state.connected_wallets.remove(chain_id);
        });
    }

    pub fn set_keychain_version(&self, version: Option<String>) {
        self.connection.update(|state| state.keychain_version = version);
    }

    pub fn set_ledger(&self, is_ledger_account: bool, connected: bool) {
        self.connection.update(|state| {
            state.is_ledger_account = is_ledger_account;
            state.ledger_connected = connected;
        });
    }

    pub fn connected_address(&self, chain_id: &str) -> Option<Address> {
        self.connection
            .with(|state| state.connected_wallets.get(chain_id).cloned())
    }

    /// Whether the connected keychain can sign shielded transfers.
    ///
    /// An unknown version is assumed capable.
    pub fn supports_masp(&self) -> bool {
        self.connection.with(|state| match &state.keychain_version {
            Some(version) => is_keychain_compatible_with_masp(version),
            None => true,
        })
    }
}
