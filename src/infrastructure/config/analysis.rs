//! Clustering and scoring parameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Parameters of the graph analysis and the whitelist decision.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum balance, in native units, for a "Yes" recommendation.
    ///
    /// Defaults to 0.5.
    #[serde(default = "default_balance_threshold")]
    pub balance_threshold: Decimal,

    /// Minimum co-occurrence count for an edge to join two addresses.
    ///
    /// Defaults to 2.
    #[serde(default = "default_interaction_threshold")]
    pub interaction_threshold: u32,

    /// Risk score at which the recommendation becomes "No (High Risk)".
    ///
    /// Defaults to 2.
    #[serde(default = "default_high_risk_score")]
    pub high_risk_score: usize,

    /// Persist a checkpoint after this many processed addresses.
    ///
    /// Defaults to 10.
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            balance_threshold: default_balance_threshold(),
            interaction_threshold: default_interaction_threshold(),
            high_risk_score: default_high_risk_score(),
            checkpoint_interval: default_checkpoint_interval(),
        }
    }
}

fn default_balance_threshold() -> Decimal {
    dec!(0.5)
}

fn default_interaction_threshold() -> u32 {
    2
}

fn default_high_risk_score() -> usize {
    2
}

fn default_checkpoint_interval() -> usize {
    10
}
