//! Per-address output rows and per-label summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::Balance;
use super::cluster::AddressGroup;
use super::id::Address;
use super::score::{Assessment, Recommendation};

/// Ingestion result for one address, kept in the checkpoint until scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub balance: Balance,
}

/// Final output row for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub address: Address,
    pub cluster: Option<String>,
    pub balance: Balance,
    pub recommendation: Recommendation,
    pub related: Vec<Address>,
    /// `None` renders as `Error`.
    pub risk_score: Option<usize>,
}

impl ReportRow {
    #[must_use]
    pub fn new(
        record: &AddressRecord,
        assessment: Assessment,
        group: Option<&AddressGroup>,
    ) -> Self {
        let related = group
            .map(|g| g.related_to(&record.address).cloned().collect())
            .unwrap_or_default();

        Self {
            address: record.address.clone(),
            cluster: record.cluster.clone(),
            balance: record.balance,
            recommendation: assessment.recommendation,
            related,
            risk_score: assessment.reported_risk(),
        }
    }

    /// Related addresses joined by `", "`, or `None`.
    #[must_use]
    pub fn related_display(&self) -> String {
        if self.related.is_empty() {
            return "None".to_string();
        }
        self.related
            .iter()
            .map(Address::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn risk_display(&self) -> String {
        self.risk_score
            .map_or_else(|| "Error".to_string(), |score| score.to_string())
    }
}

/// Balance statistics for one input label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSummary {
    pub label: String,
    pub total_addresses: usize,
    /// Addresses whose balance was fetched.
    pub known_balances: usize,
    pub recommended: usize,
    pub total_balance: Decimal,
}

impl ClusterSummary {
    /// Label used for addresses listed before any label marker.
    pub const UNLABELLED: &'static str = "Unlabelled";

    #[must_use]
    pub fn average_balance(&self) -> Option<Decimal> {
        (self.known_balances > 0).then(|| self.total_balance / Decimal::from(self.known_balances))
    }

    /// Share of known-balance addresses recommended, in percent.
    #[must_use]
    pub fn recommendation_rate(&self) -> Option<Decimal> {
        (self.known_balances > 0).then(|| {
            Decimal::from(self.recommended) * Decimal::ONE_HUNDRED
                / Decimal::from(self.known_balances)
        })
    }

    /// Summarize rows by label, in order of first appearance.
    #[must_use]
    pub fn from_rows(rows: &[ReportRow]) -> Vec<Self> {
        let mut summaries: Vec<Self> = Vec::new();

        for row in rows {
            let label = row.cluster.as_deref().unwrap_or(Self::UNLABELLED);
            let idx = match summaries.iter().position(|s| s.label == label) {
                Some(idx) => idx,
                None => {
                    summaries.push(Self {
                        label: label.to_string(),
                        total_addresses: 0,
                        known_balances: 0,
                        recommended: 0,
                        total_balance: Decimal::ZERO,
                    });
                    summaries.len() - 1
                }
            };

            let summary = &mut summaries[idx];
            summary.total_addresses += 1;
            if let Some(value) = row.balance.known() {
                summary.known_balances += 1;
                summary.total_balance += value;
            }
            if row.recommendation == Recommendation::Yes {
                summary.recommended += 1;
            }
        }

        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(cluster: Option<&str>, balance: Balance, recommendation: Recommendation) -> ReportRow {
        ReportRow {
            address: Address::new("x"),
            cluster: cluster.map(str::to_string),
            balance,
            recommendation,
            related: Vec::new(),
            risk_score: Some(0),
        }
    }

    #[test]
    fn related_display_defaults_to_none() {
        let mut r = row(None, Balance::Unknown, Recommendation::Error);
        assert_eq!(r.related_display(), "None");
        r.related = vec![Address::new("b"), Address::new("c")];
        assert_eq!(r.related_display(), "b, c");
    }

    #[test]
    fn summaries_group_by_label() {
        let rows = vec![
            row(Some("Cluster 1"), Balance::Known(dec!(1)), Recommendation::Yes),
            row(Some("Cluster 1"), Balance::Known(dec!(0.2)), Recommendation::No),
            row(Some("Cluster 1"), Balance::Unknown, Recommendation::Error),
            row(None, Balance::Known(dec!(2)), Recommendation::HighRisk),
        ];

        let summaries = ClusterSummary::from_rows(&rows);
        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.label, "Cluster 1");
        assert_eq!(first.total_addresses, 3);
        assert_eq!(first.known_balances, 2);
        assert_eq!(first.recommended, 1);
        assert_eq!(first.average_balance(), Some(dec!(0.6)));
        assert_eq!(first.recommendation_rate(), Some(dec!(50)));

        assert_eq!(summaries[1].label, ClusterSummary::UNLABELLED);
        assert_eq!(summaries[1].recommended, 0);
    }
}
