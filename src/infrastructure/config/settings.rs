//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the endpoint pool can be
//! overridden with the comma-separated `ADDRLINK_RPC_ENDPOINTS` variable.
//!
//! # Example
//!
//! ```no_run
//! use addrlink::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("addrlink.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::analysis::AnalysisConfig;
use super::logging::LoggingConfig;
use super::rpc::RpcConfig;
use super::storage::StorageConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `rpc.endpoints`.
pub const ENDPOINTS_ENV: &str = "ADDRLINK_RPC_ENDPOINTS";

/// Main application configuration.
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Remote call settings.
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Clustering and scoring parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Cache and checkpoint locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        let config = config.with_endpoint_override(std::env::var(ENDPOINTS_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file; the defaults are still
    /// validated against the environment override.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Replace the endpoint pool with a comma-separated list, if given.
    #[must_use]
    pub fn with_endpoint_override(mut self, raw: Option<String>) -> Self {
        if let Some(raw) = raw {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if !endpoints.is_empty() {
                self.rpc.endpoints = endpoints;
            }
        }
        self
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let rpc = &self.rpc;
        if rpc.endpoints.is_empty() {
            return Err(ConfigError::MissingField { field: "endpoints" }.into());
        }
        for endpoint in &rpc.endpoints {
            Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
                field: "endpoints",
                reason: format!("{endpoint}: {e}"),
            })?;
        }
        if rpc.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if rpc.pacing_max_ms < rpc.pacing_min_ms {
            return Err(ConfigError::InvalidValue {
                field: "pacing_max_ms",
                reason: "must be >= pacing_min_ms".to_string(),
            }
            .into());
        }
        if rpc.max_in_flight == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_in_flight",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if rpc.signature_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "signature_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let analysis = &self.analysis;
        if analysis.interaction_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interaction_threshold",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analysis.checkpoint_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "checkpoint_interval",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analysis.balance_threshold < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "balance_threshold",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.rpc.endpoints.len(), 3);
        assert_eq!(config.rpc.max_attempts, 5);
        assert_eq!(config.analysis.balance_threshold, dec!(0.5));
        assert_eq!(config.analysis.interaction_threshold, 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
[rpc]
endpoints = ["https://rpc.example.com"]
max_in_flight = 4
rotate_on_rate_limit = true

[analysis]
balance_threshold = 0.2
checkpoint_interval = 3
"#,
        )
        .unwrap();

        assert_eq!(config.rpc.endpoints, vec!["https://rpc.example.com"]);
        assert_eq!(config.rpc.max_in_flight, 4);
        assert!(config.rpc.rotate_on_rate_limit);
        assert_eq!(config.analysis.balance_threshold, dec!(0.2));
        assert_eq!(config.analysis.checkpoint_interval, 3);
    }

    #[test]
    fn rejects_inverted_pacing_range() {
        let result = parse("[rpc]\npacing_min_ms = 500\npacing_max_ms = 100\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "pacing_max_ms",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_bad_endpoint_url() {
        let result = parse("[rpc]\nendpoints = [\"not a url\"]\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "endpoints",
                ..
            }))
        ));
    }

    #[test]
    fn endpoint_override_replaces_pool() {
        let config = Config::default()
            .with_endpoint_override(Some(" https://a.example , https://b.example,".into()));
        assert_eq!(
            config.rpc.endpoints,
            vec!["https://a.example", "https://b.example"]
        );

        let untouched = Config::default().with_endpoint_override(Some(" , ".into()));
        assert_eq!(untouched.rpc.endpoints.len(), 3);
    }
}
