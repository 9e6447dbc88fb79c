//! Retrying JSON-RPC client over a pool of equivalent endpoints.
//!
//! Each logical call is sent as a one-element batch. Failures are handled
//! per attempt:
//! - transport error or timeout: wait `retry_delay`, retry the same endpoint
//! - HTTP 429: wait `rate_limit_backoff × attempt`, retry the same endpoint
//!   (or the next one when `rotate_on_rate_limit` is set)
//! - any other non-success status: rotate to the next endpoint, wait
//!   `retry_delay`, retry
//! - malformed payload or JSON-RPC error object: fail immediately
//!
//! Calls are spaced by a randomized pacing delay.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::dto::{extract_result, RpcRequest};
use super::pacer::Pacer;
use crate::error::RpcError;
use crate::infrastructure::config::RpcConfig;
use crate::port::outbound::transport::RpcTransport;

/// Retry and failover policy, taken from [`RpcConfig`].
#[derive(Debug, Clone)]
struct RetryPolicy {
    max_attempts: u32,
    rate_limit_backoff_ms: u64,
    retry_delay: Duration,
    rotate_on_rate_limit: bool,
}

impl RetryPolicy {
    fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// JSON-RPC client with retry, backoff, endpoint rotation and pacing.
///
/// The rotation cursor is owned by the instance: it persists across calls
/// within a run and starts at the first endpoint for each new client.
pub struct RemoteCallClient<T: RpcTransport> {
    transport: T,
    endpoints: Vec<String>,
    current: AtomicUsize,
    next_id: AtomicU64,
    policy: RetryPolicy,
    pacer: Pacer,
}

impl<T: RpcTransport> RemoteCallClient<T> {
    /// Create a client over `transport` using the endpoint pool and retry
    /// settings from `config`.
    ///
    /// `config.endpoints` must be non-empty; [`Config::validate`] enforces it.
    ///
    /// [`Config::validate`]: crate::infrastructure::config::Config::validate
    pub fn new(transport: T, config: &RpcConfig) -> Self {
        Self {
            transport,
            endpoints: config.endpoints.clone(),
            current: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            policy: RetryPolicy {
                max_attempts: config.max_attempts.max(1),
                rate_limit_backoff_ms: config.rate_limit_backoff_ms,
                retry_delay: config.retry_delay(),
                rotate_on_rate_limit: config.rotate_on_rate_limit,
            },
            pacer: Pacer::new(
                Duration::from_millis(config.pacing_min_ms),
                Duration::from_millis(config.pacing_max_ms),
            ),
        }
    }

    /// Endpoint the next attempt will use.
    #[must_use]
    pub fn current_endpoint(&self) -> &str {
        let idx = self.current.load(Ordering::Acquire) % self.endpoints.len().max(1);
        self.endpoints.get(idx).map_or("", String::as_str)
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one logical call, returning its `result` value.
    ///
    /// # Errors
    ///
    /// [`RpcError::Exhausted`] once every attempt failed, or the first
    /// non-retryable error.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.pacer.wait().await;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_value([RpcRequest::new(id, method, &params)])
            .map_err(|e| RpcError::Malformed(e.to_string()))?;

        let max_attempts = self.policy.max_attempts;
        let mut last = RpcError::Transport("no attempt made".into());

        for attempt in 1..=max_attempts {
            let slot = self.current.load(Ordering::Acquire) % self.endpoints.len();
            let endpoint = &self.endpoints[slot];

            let err = match self.transport.post(endpoint, &body).await {
                Err(err) => {
                    warn!(method, endpoint = %endpoint, attempt, error = %err, "Request failed");
                    err
                }
                Ok(response) if response.is_rate_limited() => {
                    if self.policy.rotate_on_rate_limit {
                        self.rotate(slot);
                    }
                    RpcError::RateLimited {
                        endpoint: endpoint.clone(),
                    }
                }
                Ok(response) if !response.is_success() => {
                    self.rotate(slot);
                    warn!(
                        method,
                        status = response.status,
                        next_endpoint = %self.current_endpoint(),
                        attempt,
                        "Unexpected status, switching endpoint"
                    );
                    RpcError::Status {
                        status: response.status,
                        endpoint: endpoint.clone(),
                    }
                }
                Ok(response) => match extract_result(&response.body, id) {
                    Ok(result) => {
                        debug!(method, endpoint = %endpoint, attempt, "Call succeeded");
                        return Ok(result);
                    }
                    Err(err) => err,
                },
            };

            if !err.is_retryable() {
                return Err(err);
            }

            let delay = match &err {
                RpcError::RateLimited { .. } => {
                    let delay = self.policy.rate_limit_backoff(attempt);
                    warn!(
                        method,
                        endpoint = %endpoint,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off"
                    );
                    delay
                }
                _ => self.policy.retry_delay,
            };
            last = err;
            if attempt < max_attempts {
                sleep(delay).await;
            }
        }

        Err(RpcError::Exhausted {
            method: method.to_string(),
            attempts: max_attempts,
            last: Box::new(last),
        })
    }

    /// Advance past `from`, unless a concurrent caller already did.
    fn rotate(&self, from: usize) {
        let next = (from + 1) % self.endpoints.len();
        let _ = self
            .current
            .compare_exchange(from, next, Ordering::AcqRel, Ordering::Acquire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::transport::TransportResponse;
    use crate::testkit::config;
    use crate::testkit::rpc::ScriptedTransport;
    use serde_json::json;

    fn ok(result: Value) -> TransportResponse {
        TransportResponse::new(
            200,
            json!([{"jsonrpc": "2.0", "id": 1, "result": result}]).to_string(),
        )
    }

    fn rpc(endpoints: &[&str], max_attempts: u32) -> RpcConfig {
        RpcConfig {
            max_attempts,
            ..config::rpc(endpoints)
        }
    }

    #[tokio::test]
    async fn success_returns_result() {
        let transport = ScriptedTransport::new();
        transport.push_response(ok(json!({"value": 5})));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a"], 3));

        let result = client.call("getBalance", json!(["x"])).await.unwrap();
        assert_eq!(result, json!({"value": 5}));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn request_is_a_single_element_batch() {
        let transport = ScriptedTransport::new();
        transport.push_response(ok(json!(1)));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a"], 1));
        client.call("getBalance", json!(["addr"])).await.unwrap();

        let sent = client.transport().requests();
        let body = &sent[0].1;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["jsonrpc"], "2.0");
        assert_eq!(body[0]["method"], "getBalance");
        assert_eq!(body[0]["params"], json!(["addr"]));
    }

    #[tokio::test]
    async fn rate_limit_retries_same_endpoint() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(429, ""));
        transport.push_response(ok(json!(1)));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a", "https://b"], 3));

        client.call("getBalance", json!([])).await.unwrap();
        let endpoints: Vec<_> = client
            .transport()
            .requests()
            .into_iter()
            .map(|(endpoint, _)| endpoint)
            .collect();
        assert_eq!(endpoints, vec!["https://a", "https://a"]);
    }

    #[tokio::test]
    async fn rate_limit_rotates_when_configured() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(429, ""));
        transport.push_response(ok(json!(1)));
        let mut cfg = rpc(&["https://a", "https://b"], 3);
        cfg.rotate_on_rate_limit = true;
        let client = RemoteCallClient::new(transport, &cfg);

        client.call("getBalance", json!([])).await.unwrap();
        assert_eq!(client.current_endpoint(), "https://b");
    }

    #[tokio::test]
    async fn server_error_rotates_round_robin() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(503, ""));
        transport.push_response(TransportResponse::new(502, ""));
        transport.push_response(ok(json!(1)));
        let client = RemoteCallClient::new(
            transport,
            &rpc(&["https://a", "https://b", "https://c"], 5),
        );

        client.call("getBalance", json!([])).await.unwrap();
        let endpoints: Vec<_> = client
            .transport()
            .requests()
            .into_iter()
            .map(|(endpoint, _)| endpoint)
            .collect();
        assert_eq!(endpoints, vec!["https://a", "https://b", "https://c"]);
        // Rotation state persists for the next call.
        assert_eq!(client.current_endpoint(), "https://c");
    }

    #[tokio::test]
    async fn transport_errors_exhaust_attempts() {
        let transport = ScriptedTransport::new();
        for _ in 0..3 {
            transport.push_error(RpcError::Transport("timed out".into()));
        }
        let client = RemoteCallClient::new(transport, &rpc(&["https://a"], 3));

        let err = client.call("getBalance", json!([])).await.unwrap_err();
        match err {
            RpcError::Exhausted { attempts, last, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(*last, RpcError::Transport("timed out".into()));
            }
            other => panic!("expected exhaustion, got {other}"),
        }
        assert_eq!(client.transport().calls(), 3);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_retried() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(200, "[{\"id\":1}]"));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a"], 5));

        let err = client.call("getBalance", json!([])).await.unwrap_err();
        assert!(matches!(err, RpcError::Malformed(_)));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn retryable_failures_share_the_attempt_budget() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(429, ""));
        transport.push_error(RpcError::Transport("reset".into()));
        transport.push_response(TransportResponse::new(503, ""));
        transport.push_response(ok(json!(7)));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a", "https://b"], 4));

        assert_eq!(client.call("getBalance", json!([])).await, Ok(json!(7)));
        let endpoints: Vec<_> = client
            .transport()
            .requests()
            .into_iter()
            .map(|(endpoint, _)| endpoint)
            .collect();
        assert_eq!(
            endpoints,
            vec!["https://a", "https://a", "https://a", "https://b"]
        );
    }

    #[tokio::test]
    async fn remote_error_after_failover_stops_retrying() {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(502, ""));
        transport.push_response(TransportResponse::new(
            200,
            json!([{
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32005, "message": "node behind"}
            }])
            .to_string(),
        ));
        let client = RemoteCallClient::new(transport, &rpc(&["https://a", "https://b"], 5));

        let err = client.call("getBalance", json!([])).await.unwrap_err();
        assert!(!err.is_retryable());
        assert!(matches!(err, RpcError::Remote { code: -32005, .. }));
        assert_eq!(client.transport().calls(), 2);
    }

    #[test]
    fn rate_limit_backoff_grows_linearly() {
        let policy = RetryPolicy {
            max_attempts: 5,
            rate_limit_backoff_ms: 2_000,
            retry_delay: Duration::ZERO,
            rotate_on_rate_limit: false,
        };
        assert_eq!(policy.rate_limit_backoff(1), Duration::from_secs(2));
        assert_eq!(policy.rate_limit_backoff(3), Duration::from_secs(6));
    }
}
