//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when an amount cannot be represented or converted.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when an asset is not known to the caller.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Error when a chain is not present in the registry.
    #[error("Chain not found: {0}")]
    ChainNotFound(String),

    /// Error when a fee token has no entry in the gas price table.
    #[error("No gas price for token {0}")]
    MissingGasPrice(String),

    /// Error when a keychain version string cannot be parsed.
    #[error("Invalid keychain version: {0}")]
    InvalidVersion(String),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::SerializationError(error.to_string())
    }
}

/// Reasons a custom destination address is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Nothing was entered.
    #[error("Address cannot be empty")]
    Empty,

    /// The address belongs to a chain the interface does not support.
    #[error("Chain {0} is not supported")]
    UnsupportedChain(String),

    /// The address is neither a Namada address nor a known IBC address.
    #[error("Invalid address format. Please enter a valid Namada or IBC address")]
    InvalidFormat,
}
