//! Summary tables printed after a run.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

use crate::domain::{Address, AddressGroup, Balance, ClusterSummary, ReportRow};

#[derive(Tabled)]
struct LabelLine {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Addresses")]
    total: usize,
    #[tabled(rename = "Known Balance")]
    known: usize,
    #[tabled(rename = "Recommended")]
    recommended: usize,
    #[tabled(rename = "Total Balance")]
    total_balance: String,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Tabled)]
struct GroupLine {
    #[tabled(rename = "Group")]
    group: usize,
    #[tabled(rename = "Size")]
    size: usize,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

fn round(value: Decimal) -> String {
    value.round_dp(4).normalize().to_string()
}

/// Per-label balance and recommendation table.
#[must_use]
pub fn label_table(summaries: &[ClusterSummary]) -> String {
    let lines: Vec<LabelLine> = summaries
        .iter()
        .map(|s| LabelLine {
            label: s.label.clone(),
            total: s.total_addresses,
            known: s.known_balances,
            recommended: s.recommended,
            total_balance: round(s.total_balance),
            average: s.average_balance().map_or_else(|| "-".into(), round),
            rate: s
                .recommendation_rate()
                .map_or_else(|| "-".into(), |r| format!("{}%", r.round_dp(1))),
        })
        .collect();
    Table::new(lines).to_string()
}

fn balances(rows: &[ReportRow]) -> HashMap<&Address, Balance> {
    rows.iter().map(|row| (&row.address, row.balance)).collect()
}

/// One line per group member, groups numbered from 1.
#[must_use]
pub fn group_table(groups: &[AddressGroup], rows: &[ReportRow]) -> String {
    let balances = balances(rows);
    let lines: Vec<GroupLine> = groups
        .iter()
        .enumerate()
        .flat_map(|(idx, group)| {
            let balances = &balances;
            group.members().map(move |member| GroupLine {
                group: idx + 1,
                size: group.size(),
                address: member.to_string(),
                balance: balances
                    .get(member)
                    .map_or_else(|| "-".into(), ToString::to_string),
            })
        })
        .collect();
    Table::new(lines).to_string()
}

/// Summaries as JSON for `--json` mode.
#[must_use]
pub fn summary_json(summaries: &[ClusterSummary], groups: &[AddressGroup]) -> Value {
    json!({
        "labels": summaries
            .iter()
            .map(|s| json!({
                "label": s.label,
                "addresses": s.total_addresses,
                "known_balances": s.known_balances,
                "recommended": s.recommended,
                "total_balance": s.total_balance.to_string(),
            }))
            .collect::<Vec<_>>(),
        "groups": groups
            .iter()
            .map(|g| g.members().map(Address::as_str).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    })
}
