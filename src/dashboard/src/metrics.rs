//! Metrics for the dashboard daemon.

use crate::errors::DashboardError;
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, HistogramOpts, Opts, TextEncoder,
};
use std::net::SocketAddr;
use tracing::error;
use warp::Filter;

lazy_static! {
    /// Counter for API requests, by route.
    pub static ref REQUEST_COUNTER: CounterVec = register_counter_vec!(
        Opts::new("api_requests_total", "Total number of API requests served"),
        &["route"]
    )
    .unwrap();

    /// Counter for validation outcomes, by outcome.
    pub static ref VALIDATION_OUTCOMES: CounterVec = register_counter_vec!(
        Opts::new("validation_outcomes_total", "Transfer form validation outcomes"),
        &["outcome"]
    )
    .unwrap();

    /// Counter for resolved transfer types, by type.
    pub static ref TRANSFER_TYPES: CounterVec = register_counter_vec!(
        Opts::new("transfer_types_total", "Resolved transfer types"),
        &["transfer_type"]
    )
    .unwrap();

    /// Counter for transfers handed to the SDK.
    pub static ref TRANSFERS_SUBMITTED: Counter = register_counter!(
        Opts::new("transfers_submitted_total", "Total number of transfers submitted")
    )
    .unwrap();

    /// Counter for transfers the SDK failed to build or broadcast.
    pub static ref TRANSFERS_FAILED: Counter = register_counter!(
        Opts::new("transfers_failed_total", "Total number of failed transfer submissions")
    )
    .unwrap();

    /// Histogram for fee configuration lookups.
    pub static ref FEE_LOOKUP_TIME: Histogram = register_histogram!(
        HistogramOpts::new(
            "fee_lookup_time_seconds",
            "Time to build a gas configuration from the indexer"
        )
        .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])
    )
    .unwrap();
}

/// Renders all registered metrics in the text exposition format.
pub fn render_metrics() -> Result<String, DashboardError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| DashboardError::MetricsError(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| DashboardError::MetricsError(e.to_string()))
}

/// The `/metrics` route.
pub fn metrics_route() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::path("metrics").and(warp::path::end()).map(|| {
        render_metrics().unwrap_or_else(|e| {
            error!("{}", e);
            String::new()
        })
    })
}

/// Starts a separate metrics server.
pub async fn start_metrics_server(addr: SocketAddr) -> Result<(), DashboardError> {
    tokio::spawn(async move {
        warp::serve(metrics_route()).run(addr).await;
    });

    Ok(())
}
