/// Error types for the services crate.
use std::error::Error as StdError;
use std::fmt;
use wallet_core::errors::CoreError;
use wallet_core::types::Amount;

/// Errors that can occur while talking to external services.
#[derive(Debug)]
pub enum ServiceError {
    /// Error when an HTTP request cannot be sent or read.
    HttpError(String),

    /// Error when a service answers with a non-success status.
    RequestFailed { status: u16, body: String },

    /// Error when a JSON-RPC call returns an error object.
    RpcError(String),

    /// Error when a response does not have the expected shape.
    InvalidResponse(String),

    /// Error when serialization or deserialization fails.
    SerializationError(String),

    /// Error when a URL cannot be parsed.
    InvalidUrl(String),

    /// Error when a configuration file is malformed.
    ConfigError(String),

    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when a faucet request exceeds the withdrawal limit.
    AmountAboveLimit { requested: Amount, limit: Amount },

    /// Error raised by the core decision layer.
    Core(CoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ServiceError::RequestFailed { status, body } => {
                write!(f, "Request failed with status {}: {}", status, body)
            }
            ServiceError::RpcError(msg) => write!(f, "RPC error: {}", msg),
            ServiceError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ServiceError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            ServiceError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            ServiceError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::FileError(e) => write!(f, "File error: {}", e),
            ServiceError::AmountAboveLimit { requested, limit } => write!(
                f,
                "Requested amount {} is above the faucet limit of {}",
                requested, limit
            ),
            ServiceError::Core(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        ServiceError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::SerializationError(error.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        ServiceError::FileError(error)
    }
}

impl From<toml::de::Error> for ServiceError {
    fn from(error: toml::de::Error) -> Self {
        ServiceError::ConfigError(error.to_string())
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        ServiceError::Core(error)
    }
}
