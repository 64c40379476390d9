//! Recently used destination addresses.

use crate::address::AddressKind;
use crate::store::Store;
use crate::types::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Most addresses kept in the list.
pub const MAX_RECENT_ADDRESSES: usize = 10;

/// A destination the user sent to before.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentAddress {
    pub address: Address,
    #[serde(rename = "type")]
    pub kind: AddressKind,
    #[serde(default)]
    pub label: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Puts an address at the front of `list`, dropping older copies of it and
/// anything past [`MAX_RECENT_ADDRESSES`].
pub fn push_recent_address(list: &mut Vec<RecentAddress>, entry: RecentAddress) {
    list.retain(|recent| recent.address != entry.address);
    list.insert(0, entry);
    list.truncate(MAX_RECENT_ADDRESSES);
}

/// Newest-first list of recent destinations.
#[derive(Debug, Default)]
pub struct RecentAddresses {
    store: Store<Vec<RecentAddress>>,
}

impl RecentAddresses {
    /// Starts from a previously persisted list.
    pub fn from_list(mut list: Vec<RecentAddress>) -> Self {
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut deduped = Vec::with_capacity(list.len());
        for entry in list.into_iter().rev() {
            push_recent_address(&mut deduped, entry);
        }
        Self {
            store: Store::new(deduped),
        }
    }

    /// Records a use of `address` now.
    pub fn add(&self, address: &str, kind: AddressKind, label: Option<String>) {
        self.add_at(address, kind, label, Utc::now());
    }

    pub fn add_at(
        &self,
        address: &str,
        kind: AddressKind,
        label: Option<String>,
        timestamp: DateTime<Utc>,
    ) {
        let entry = RecentAddress {
            address: address.to_string(),
            kind,
            label,
            timestamp,
        };
        self.store.update(|list| push_recent_address(list, entry));
    }

    pub fn list(&self) -> Vec<RecentAddress> {
        self.store.get()
    }

    pub fn clear(&self) {
        self.store.set(Vec::new());
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<RecentAddress>> {
        self.store.subscribe()
    }
}
