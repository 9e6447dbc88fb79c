//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use rust_decimal::Decimal;

use crate::application::PipelineSettings;
use crate::infrastructure::config::RpcConfig;

/// RPC config over `endpoints` with every delay set to zero.
pub fn rpc(endpoints: &[&str]) -> RpcConfig {
    RpcConfig {
        endpoints: endpoints.iter().map(|e| (*e).to_string()).collect(),
        rate_limit_backoff_ms: 0,
        retry_delay_ms: 0,
        pacing_min_ms: 0,
        pacing_max_ms: 0,
        ..RpcConfig::default()
    }
}

/// Pipeline settings with the default thresholds and the given checkpoint
/// interval.
pub fn pipeline(checkpoint_interval: usize) -> PipelineSettings {
    PipelineSettings {
        signature_limit: 100,
        max_in_flight: 1,
        checkpoint_interval,
        interaction_threshold: 2,
        balance_threshold: Decimal::new(5, 1),
        high_risk_score: 2,
        clear_cache_on_success: false,
    }
}
