//! Addrlink - address interaction clustering and whitelist scoring.
//!
//! Ingests a labelled list of Solana addresses, fetches each address's
//! balance and recent transactions over JSON-RPC, counts how often
//! addresses appear together in the same transactions, groups addresses
//! that interact at least a threshold number of times, and scores every
//! address for whitelisting from its balance and the size of its group.
//!
//! Ingestion is resumable: every fetched result is cached on disk, and a
//! checkpoint of the interaction graph is saved at a fixed interval and
//! whenever a run stops early.
//!
//! # Modules
//!
//! - [`domain`] - Addresses, balances, the interaction graph, grouping and scoring
//! - [`port`] - Traits at the chain, storage, report and progress seams
//! - [`adapter`] - JSON-RPC client, file stores, CSV report, CLI
//! - [`application`] - Result cache and the ingestion pipeline
//! - [`infrastructure`] - Configuration loading and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted transport, fake chain and failing stores for tests
//!
//! # Example
//!
//! ```
//! use addrlink::domain::{AddressUniverse, ClusterExtractor, InputEntry, InteractionGraph};
//!
//! let universe = AddressUniverse::from_entries(vec![
//!     InputEntry::Label("Cluster 1".into()),
//!     InputEntry::Address("A".into()),
//!     InputEntry::Address("B".into()),
//! ]);
//! let mut graph = InteractionGraph::new();
//! let both = universe.restrict(universe.addresses());
//! graph.record_co_occurrence(&both);
//! graph.record_co_occurrence(&both);
//!
//! let groups = ClusterExtractor::new(2).extract(universe.addresses(), &graph);
//! assert_eq!(groups.len(), 1);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
