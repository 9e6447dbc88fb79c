//! Progress notifications from the ingestion loop.

use crate::domain::Address;

/// Observer for per-address progress.
pub trait ProgressSink: Send + Sync {
    /// Ingestion begins; `resumed_at` addresses were already done.
    fn started(&self, _total: usize, _resumed_at: usize) {}

    /// One address finished ingestion.
    fn advanced(&self, _address: &Address) {}

    /// All addresses ingested.
    fn finished(&self) {}
}

/// Progress sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}
