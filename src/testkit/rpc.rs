//! Scripted [`RpcTransport`] for client tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::RpcError;
use crate::port::outbound::transport::{RpcTransport, TransportResponse};

/// Replays queued responses in order and records every request.
///
/// Once the queue is exhausted each further request fails with a transport
/// error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse, RpcError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: TransportResponse) {
        self.script.lock().push_back(Ok(response));
    }

    pub fn push_error(&self, error: RpcError) {
        self.script.lock().push_back(Err(error));
    }

    /// Number of requests sent so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// `(endpoint, body)` of every request, oldest first.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn post(&self, endpoint: &str, body: &Value) -> Result<TransportResponse, RpcError> {
        self.requests
            .lock()
            .push((endpoint.to_string(), body.clone()));
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Transport("script exhausted".into())))
    }
}
