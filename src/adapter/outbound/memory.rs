//! In-memory cache and checkpoint stores.
//!
//! Clones share state, so a test can hand one clone to a pipeline and keep
//! another to inspect what was persisted or to simulate a restart.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::port::outbound::store::{CacheSnapshot, CacheStore, Checkpoint, CheckpointStore};

#[derive(Debug, Default)]
struct CacheState {
    snapshot: CacheSnapshot,
    flushes: usize,
}

/// Cache store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    state: Arc<RwLock<CacheState>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last flushed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CacheSnapshot {
        self.state.read().snapshot.clone()
    }

    /// Number of flushes so far.
    #[must_use]
    pub fn flushes(&self) -> usize {
        self.state.read().flushes
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<CacheSnapshot> {
        Ok(self.snapshot())
    }

    fn flush(&self, snapshot: &CacheSnapshot) -> Result<()> {
        let mut state = self.state.write();
        state.snapshot = snapshot.clone();
        state.flushes += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.state.write().snapshot = CacheSnapshot::default();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CheckpointState {
    current: Option<Checkpoint>,
    saved_cursors: Vec<usize>,
}

/// Checkpoint store kept in memory, recording the cursor of every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    state: Arc<RwLock<CheckpointState>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<Checkpoint> {
        self.state.read().current.clone()
    }

    /// Cursor of each save, oldest first.
    #[must_use]
    pub fn saved_cursors(&self) -> Vec<usize> {
        self.state.read().saved_cursors.clone()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self) -> Result<Option<Checkpoint>> {
        Ok(self.current())
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let mut state = self.state.write();
        state.current = Some(checkpoint.clone());
        state.saved_cursors.push(checkpoint.cursor);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.state.write().current = None;
        Ok(())
    }
}
