//! Knobs the pipeline reads from configuration.

use rust_decimal::Decimal;

use crate::infrastructure::config::Config;

/// Ingestion, clustering and scoring parameters for one run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Signatures requested per address.
    pub signature_limit: usize,
    /// Transaction-detail reads allowed in flight at once.
    pub max_in_flight: usize,
    /// Addresses processed between checkpoint saves.
    pub checkpoint_interval: usize,
    pub interaction_threshold: u32,
    /// Minimum balance, in native units, for a `Yes` recommendation.
    pub balance_threshold: Decimal,
    pub high_risk_score: usize,
    pub clear_cache_on_success: bool,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            signature_limit: config.rpc.signature_limit,
            max_in_flight: config.rpc.max_in_flight.max(1),
            checkpoint_interval: config.analysis.checkpoint_interval.max(1),
            interaction_threshold: config.analysis.interaction_threshold,
            balance_threshold: config.analysis.balance_threshold,
            high_risk_score: config.analysis.high_risk_score,
            clear_cache_on_success: config.storage.clear_cache_on_success,
        }
    }
}
