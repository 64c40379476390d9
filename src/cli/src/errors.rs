//! Error types for the CLI wallet.

use std::error::Error as StdError;
use std::fmt;
use wallet_core::errors::CoreError;
use wallet_core::validation::ValidationResult;
use wallet_services::errors::ServiceError;

/// Errors that can occur in the CLI wallet.
#[derive(Debug)]
pub enum WalletError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when an external service call fails.
    ServiceError(ServiceError),

    /// Error when a core operation fails.
    CoreError(CoreError),

    /// Error when an address is invalid.
    InvalidAddress(String),

    /// Error when an amount is invalid.
    InvalidAmount(String),

    /// Error when an asset is not configured.
    UnknownAsset(String),

    /// Error when the transfer form does not pass validation.
    ValidationFailed(ValidationResult),

    /// Error when a transaction cannot be submitted.
    TransactionError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::FileError(e) => write!(f, "File error: {}", e),
            WalletError::JsonError(e) => write!(f, "JSON error: {}", e),
            WalletError::ServiceError(e) => write!(f, "Service error: {}", e),
            WalletError::CoreError(e) => write!(f, "{}", e),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            WalletError::UnknownAsset(symbol) => write!(f, "Unknown asset: {}", symbol),
            WalletError::ValidationFailed(result) => write!(f, "{}", result),
            WalletError::TransactionError(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for WalletError {}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::FileError(error)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::JsonError(error)
    }
}

impl From<ServiceError> for WalletError {
    fn from(error: ServiceError) -> Self {
        WalletError::ServiceError(error)
    }
}

impl From<CoreError> for WalletError {
    fn from(error: CoreError) -> Self {
        WalletError::CoreError(error)
    }
}
