use thiserror::Error;

use crate::application::stage::AddressStage;
use crate::domain::id::Address;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Remote call failures.
///
/// Every variant is absorbed by the pipeline and recorded as missing data;
/// none of them halts a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rate limited by {endpoint}")]
    RateLimited { endpoint: String },

    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("{method} failed after {attempts} attempts: {last}")]
    Exhausted {
        method: String,
        attempts: u32,
        last: Box<RpcError>,
    },
}

impl RpcError {
    /// Whether another attempt may succeed.
    ///
    /// Malformed payloads and JSON-RPC error objects describe the request,
    /// not the connection, so they are not retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::RateLimited { .. } | Self::Status { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("interrupted")]
    Interrupted,

    #[error("failed while processing {address} at {stage}: {source}")]
    Pipeline {
        address: Address,
        stage: AddressStage,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
