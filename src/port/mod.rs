//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │   RPC   │            │ Cache and   │              │  Report   │
//! │ Adapter │            │ Checkpoint  │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::chain::ChainReader;
pub use outbound::progress::{NoopProgress, ProgressSink};
pub use outbound::report::ReportSink;
pub use outbound::store::{CacheSnapshot, CacheStore, Checkpoint, CheckpointStore};
pub use outbound::transport::{RpcTransport, TransportResponse};
