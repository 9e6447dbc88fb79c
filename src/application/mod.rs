//! Application services (use cases).
//!
//! The ingestion pipeline and the cache it reads through, coordinating the
//! domain types with the outbound ports.

pub mod cache;
pub mod guard;
pub mod pipeline;
pub mod settings;
pub mod stage;

pub use cache::{CacheStats, ResultCache};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use settings::PipelineSettings;
pub use stage::{AddressStage, RunStage};
