//! Remote call settings: endpoint pool, retry policy and pacing.

use std::time::Duration;

use serde::Deserialize;

/// Endpoint pool and retry behavior for JSON-RPC calls.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    /// Ordered pool of equivalent JSON-RPC endpoints.
    ///
    /// The first entry is used until a failure rotates to the next.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Per-request timeout in milliseconds. Defaults to 30000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TCP connect timeout in milliseconds. Defaults to 10000.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Attempts per logical call before giving up. Defaults to 5.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base of the linear rate-limit backoff (base × attempt), in
    /// milliseconds. Defaults to 2000.
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,

    /// Delay before retrying after a transport error or an endpoint
    /// rotation, in milliseconds. Defaults to 1000.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Also rotate to the next endpoint when rate limited.
    ///
    /// Defaults to false: back off and retry the same endpoint.
    #[serde(default)]
    pub rotate_on_rate_limit: bool,

    /// Lower bound of the randomized delay between calls, in milliseconds.
    /// Defaults to 1000.
    #[serde(default = "default_pacing_min_ms")]
    pub pacing_min_ms: u64,

    /// Upper bound of the randomized delay between calls, in milliseconds.
    /// Defaults to 2000.
    #[serde(default = "default_pacing_max_ms")]
    pub pacing_max_ms: u64,

    /// Transaction-detail calls allowed in flight at once.
    ///
    /// 1 gives fully sequential execution. Defaults to 1.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Signatures requested per address. Defaults to 100.
    #[serde(default = "default_signature_limit")]
    pub signature_limit: usize,
}

impl RpcConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_attempts: default_max_attempts(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            rotate_on_rate_limit: false,
            pacing_min_ms: default_pacing_min_ms(),
            pacing_max_ms: default_pacing_max_ms(),
            max_in_flight: default_max_in_flight(),
            signature_limit: default_signature_limit(),
        }
    }
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://api.mainnet-beta.solana.com".into(),
        "https://solana-api.projectserum.com".into(),
        "https://rpc.ankr.com/solana".into(),
    ]
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_rate_limit_backoff_ms() -> u64 {
    2_000
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_pacing_min_ms() -> u64 {
    1_000
}

fn default_pacing_max_ms() -> u64 {
    2_000
}

fn default_max_in_flight() -> usize {
    1
}

fn default_signature_limit() -> usize {
    100
}
