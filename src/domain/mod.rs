//! Chain-agnostic analysis types: identifiers, balances, the interaction
//! graph, group extraction and scoring.

pub mod balance;
pub mod cluster;
pub mod graph;
pub mod id;
pub mod report;
pub mod score;
pub mod universe;

pub use balance::Balance;
pub use cluster::{AddressGroup, ClusterExtractor, GroupIndex};
pub use graph::{InteractionGraph, ParticipantSet};
pub use id::{Address, Signature};
pub use report::{AddressRecord, ClusterSummary, ReportRow};
pub use score::{Assessment, Recommendation, RiskScorer};
pub use universe::{AddressUniverse, InputEntry, UniverseEntry};
