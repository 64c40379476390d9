//! Local transfer history.

use crate::types::{Address, TransferTransactionData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transfers still waiting for a final status.
pub fn filter_pending(txs: &[TransferTransactionData]) -> Vec<&TransferTransactionData> {
    txs.iter().filter(|tx| !tx.status.is_complete()).collect()
}

/// Transfers that succeeded or failed.
pub fn filter_complete(txs: &[TransferTransactionData]) -> Vec<&TransferTransactionData> {
    txs.iter().filter(|tx| tx.status.is_complete()).collect()
}

/// Transfers recorded per account address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHistory {
    accounts: BTreeMap<Address, Vec<TransferTransactionData>>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a transfer for an account, replacing an entry with the same hash.
    pub fn record(&mut self, account: &str, tx: TransferTransactionData) {
        let txs = self.accounts.entry(account.to_string()).or_default();
        match txs.iter_mut().find(|existing| existing.hash == tx.hash) {
            Some(existing) => *existing = tx,
            None => txs.push(tx),
        }
    }

    /// Transfers of one account, oldest first.
    pub fn for_account(&self, account: &str) -> &[TransferTransactionData] {
        self.accounts
            .get(account)
            .map(|txs| txs.as_slice())
            .unwrap_or(&[])
    }

    /// Searches every account for a transfer hash.
    pub fn find_by_hash(&self, hash: &str) -> Option<&TransferTransactionData> {
        self.accounts
            .values()
            .flat_map(|txs| txs.iter())
            .find(|tx| tx.hash == hash)
    }

    pub fn len(&self) -> usize {
        self.accounts.values().map(|txs| txs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
