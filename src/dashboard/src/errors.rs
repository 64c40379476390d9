//! Error types for the dashboard daemon.

use std::error::Error as StdError;
use std::fmt;
use wallet_core::errors::CoreError;
use wallet_services::errors::ServiceError;

/// Errors that can occur in the dashboard daemon.
#[derive(Debug)]
pub enum DashboardError {
    /// Error when a core operation fails.
    CoreError(CoreError),

    /// Error when an external service call fails.
    ServiceError(ServiceError),

    /// Error when a metrics operation fails.
    MetricsError(String),

    /// Error when a configuration value is unusable.
    ConfigError(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::CoreError(e) => write!(f, "Core error: {}", e),
            DashboardError::ServiceError(e) => write!(f, "Service error: {}", e),
            DashboardError::MetricsError(msg) => write!(f, "Metrics error: {}", msg),
            DashboardError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl StdError for DashboardError {}

impl From<CoreError> for DashboardError {
    fn from(error: CoreError) -> Self {
        DashboardError::CoreError(error)
    }
}

impl From<ServiceError> for DashboardError {
    fn from(error: ServiceError) -> Self {
        DashboardError::ServiceError(error)
    }
}
