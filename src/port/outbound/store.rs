//! Persistence ports for the result cache and the ingestion checkpoint.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Address, AddressRecord, InteractionGraph, ParticipantSet, Signature};
use crate::error::Result;

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Everything previously fetched from the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Balances in lamports.
    #[serde(default)]
    pub balances: BTreeMap<Address, u64>,
    #[serde(default)]
    pub signatures: BTreeMap<Address, Vec<Signature>>,
    /// Participants restricted to the universe of the run that fetched them.
    #[serde(default)]
    pub participants: BTreeMap<Signature, ParticipantSet>,
}

/// Durable resumption point for an interrupted run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    /// Number of addresses fully processed, in universe order.
    pub cursor: usize,
    pub graph: InteractionGraph,
    /// Signatures already fed into `graph`.
    pub recorded: BTreeSet<Signature>,
    /// One record per processed address.
    pub records: Vec<AddressRecord>,
    pub saved_at: DateTime<Utc>,
}

impl Checkpoint {
    /// A checkpoint at the very start of a run.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            cursor: 0,
            graph: InteractionGraph::new(),
            recorded: BTreeSet::new(),
            records: Vec::new(),
            saved_at: Utc::now(),
        }
    }
}

/// Storage for the cache blob. Owned exclusively by one `ResultCache`.
pub trait CacheStore: Send + Sync {
    /// Load the persisted cache, empty if nothing was persisted yet.
    fn load(&self) -> Result<CacheSnapshot>;

    /// Persist the full cache.
    fn flush(&self, snapshot: &CacheSnapshot) -> Result<()>;

    /// Discard the persisted cache.
    fn clear(&self) -> Result<()>;
}

/// Storage for the checkpoint blob.
pub trait CheckpointStore: Send + Sync {
    /// `None` means start fresh.
    fn load(&self) -> Result<Option<Checkpoint>>;

    fn save(&self, checkpoint: &Checkpoint) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
