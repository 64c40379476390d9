//! Service layer for the shielded wallet interface.
//!
//! This crate talks to everything outside the decision layer: the chain
//! indexer, the transaction-building SDK, the token price feed and the
//! faucet. It also persists user preferences.

pub mod errors;
pub mod faucet;
pub mod indexer;
pub mod preferences;
pub mod prices;
pub mod rpc;
pub mod sdk;

// Re-export commonly used types and functions
pub use errors::ServiceError;
pub use faucet::{normalize_faucet_url, FaucetClient, FaucetConfig};
pub use indexer::{add_timestamps, estimate_gas_or_default, HttpIndexer, IndexerApi};
pub use preferences::{PreferenceStore, Preferences};
pub use prices::{HttpPriceFeed, PriceFeed};
pub use sdk::{submit_transfer, RpcTransactionSdk, TransactionSdk};
