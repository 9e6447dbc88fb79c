//! Stores that fail on demand, for the unhandled-failure path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::adapter::outbound::memory::MemoryCacheStore;
use crate::error::{Error, Result};
use crate::port::outbound::store::{CacheSnapshot, CacheStore};

/// Cache store whose flushes start failing after a fixed number succeed.
#[derive(Debug, Clone)]
pub struct FailingCacheStore {
    inner: MemoryCacheStore,
    remaining: Arc<AtomicUsize>,
}

impl FailingCacheStore {
    /// Allow `successful_flushes` flushes, then fail every one after.
    pub fn after(inner: MemoryCacheStore, successful_flushes: usize) -> Self {
        Self {
            inner,
            remaining: Arc::new(AtomicUsize::new(successful_flushes)),
        }
    }

    /// Let every later flush succeed.
    pub fn heal(&self) {
        self.remaining.store(usize::MAX, Ordering::SeqCst);
    }
}

impl CacheStore for FailingCacheStore {
    fn load(&self) -> Result<CacheSnapshot> {
        self.inner.load()
    }

    fn flush(&self, snapshot: &CacheSnapshot) -> Result<()> {
        let allowed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(Error::Storage("disk full".into()));
        }
        self.inner.flush(snapshot)
    }

    fn clear(&self) -> Result<()> {
        self.inner.clear()
    }
}
