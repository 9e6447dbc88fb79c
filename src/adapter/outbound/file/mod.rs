//! File-backed adapters: JSON blobs for the cache and checkpoint, CSV for
//! the report.

mod atomic;
pub mod report;
pub mod store;

pub use report::CsvReportWriter;
pub use store::{JsonCacheStore, JsonCheckpointStore};
