//! Per-address and run-level pipeline states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress of one address through ingestion.
///
/// `Pending → BalanceFetched → TransactionsFetched → ParticipantsResolved →
/// GraphUpdated`. An address is counted by the checkpoint cursor only once
/// it reaches `GraphUpdated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressStage {
    Pending,
    BalanceFetched,
    TransactionsFetched,
    ParticipantsResolved,
    GraphUpdated,
}

impl fmt::Display for AddressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::BalanceFetched => "balance fetched",
            Self::TransactionsFetched => "transactions fetched",
            Self::ParticipantsResolved => "participants resolved",
            Self::GraphUpdated => "graph updated",
        };
        f.write_str(label)
    }
}

/// Run-level states after every address reached `GraphUpdated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Ingesting,
    Clustered,
    Scored,
    Reported,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ingesting => "ingesting",
            Self::Clustered => "clustered",
            Self::Scored => "scored",
            Self::Reported => "reported",
        };
        f.write_str(label)
    }
}
