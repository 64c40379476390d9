//! Minimal JSON-RPC 2.0 client.

use crate::errors::ServiceError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Appends `/rpc` to a node URL unless it is already there.
pub fn rpc_url(node_url: &str) -> String {
    let trimmed = node_url.trim_end_matches('/');
    if trimmed.ends_with("/rpc") {
        trimmed.to_string()
    } else {
        format!("{}/rpc", trimmed)
    }
}

/// A JSON-RPC endpoint reached over HTTP.
#[derive(Debug)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(node_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), node_url)
    }

    pub fn with_client(client: reqwest::Client, node_url: &str) -> Self {
        Self {
            client,
            url: rpc_url(node_url),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls `method` and returns its `result` member.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });
        debug!("RPC {} -> {}", method, self.url);

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                body: response_text,
            });
        }
        if response_text.is_empty() {
            return Err(ServiceError::InvalidResponse(
                "Empty response from node".to_string(),
            ));
        }

        let response: Value = serde_json::from_str(&response_text)?;

        // Only a non-null error member counts as a failure
        if let Some(error) = response.get("error") {
            if !error.is_null() {
                return Err(ServiceError::RpcError(error.to_string()));
            }
        }

        response.get("result").cloned().ok_or_else(|| {
            ServiceError::InvalidResponse(format!("No result in response: {}", response_text))
        })
    }
}
