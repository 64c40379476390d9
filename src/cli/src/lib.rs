//! Command line wallet for the shielded wallet interface.

pub mod commands;
pub mod config;
pub mod context;
pub mod errors;

// Re-export commonly used types and functions
pub use commands::validate::{FormCheck, TransferForm};
pub use config::WalletConfig;
pub use context::WalletContext;
pub use errors::WalletError;
