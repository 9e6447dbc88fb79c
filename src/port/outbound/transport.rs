//! Raw request transport under the JSON-RPC client.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RpcError;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Sends one request body to one endpoint.
///
/// Connection failures and timeouts surface as [`RpcError::Transport`];
/// any HTTP status, successful or not, is returned as a response.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn post(&self, endpoint: &str, body: &Value) -> Result<TransportResponse, RpcError>;
}
