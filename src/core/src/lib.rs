//! Decision layer of the shielded wallet interface.
//!
//! This crate decides which flow a transfer follows, whether a transfer form
//! may be submitted and which token pays the fee. It also carries the chain
//! registry, amount and balance helpers, and the observable state containers
//! that the services, the dashboard and the CLI share.

pub mod address;
pub mod amount;
pub mod balance;
pub mod chain;
pub mod classifier;
pub mod errors;
pub mod fees;
pub mod keychain;
pub mod recent;
pub mod session;
pub mod staking;
pub mod store;
pub mod transactions;
pub mod types;
pub mod url_state;
pub mod validation;

// Re-export commonly used types
pub use address::AddressKind;
pub use chain::{Chain, ChainRegistry};
pub use classifier::determine_transfer_type;
pub use errors::{AddressError, CoreError};
pub use fees::find_cheapest_token;
pub use store::Store;
pub use types::{Address, Amount, Asset, AssetWithAmount, GasConfig, TransferParams, TransferType};
pub use validation::{validate_transfer_form, ValidationContext, ValidationResult};
