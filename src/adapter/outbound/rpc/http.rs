//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::warn;

use crate::error::RpcError;
use crate::infrastructure::config::RpcConfig;
use crate::port::outbound::transport::{RpcTransport, TransportResponse};

/// HTTPS POST transport with per-request and connect timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    #[must_use]
    pub fn from_config(config: &RpcConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self { http }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, endpoint: &str, body: &Value) -> Result<TransportResponse, RpcError> {
        let response = self
            .http
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(transport_reason(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(transport_reason(&e)))?;

        Ok(TransportResponse { status, body })
    }
}

fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}
