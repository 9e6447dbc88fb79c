//! Whitelist recommendation and risk scoring.
//!
//! The risk score of an address is the number of other addresses in its
//! interaction group. The recommendation starts from a balance threshold
//! and is overridden when the score reaches the high-risk level.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::Balance;
use super::cluster::AddressGroup;

/// Whitelist recommendation for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    No,
    HighRisk,
    /// Balance could not be fetched.
    Error,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::HighRisk => "No (High Risk)",
            Self::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Scoring outcome for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub recommendation: Recommendation,
    /// Group size minus one, 0 when ungrouped.
    pub risk_score: usize,
}

impl Assessment {
    /// Risk score as reported, `None` when the balance is unknown.
    #[must_use]
    pub fn reported_risk(&self) -> Option<usize> {
        match self.recommendation {
            Recommendation::Error => None,
            _ => Some(self.risk_score),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RiskScorer {
    balance_threshold: Decimal,
    high_risk_score: usize,
}

impl RiskScorer {
    #[must_use]
    pub fn new(balance_threshold: Decimal, high_risk_score: usize) -> Self {
        Self {
            balance_threshold,
            high_risk_score,
        }
    }

    /// Score an address from its balance and the group that claimed it.
    ///
    /// An unknown balance yields [`Recommendation::Error`] even for grouped
    /// addresses; otherwise a score at or above the high-risk level yields
    /// [`Recommendation::HighRisk`] regardless of balance.
    #[must_use]
    pub fn score(&self, balance: &Balance, group: Option<&AddressGroup>) -> Assessment {
        let risk_score = group.map_or(0, |g| g.size().saturating_sub(1));

        let recommendation = match balance.known() {
            None => Recommendation::Error,
            Some(_) if risk_score >= self.high_risk_score => Recommendation::HighRisk,
            Some(value) if value >= self.balance_threshold => Recommendation::Yes,
            Some(_) => Recommendation::No,
        };

        Assessment {
            recommendation,
            risk_score,
        }
    }
}
