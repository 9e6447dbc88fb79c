//! Persist-then-propagate scope around the ingestion loop.

use chrono::Utc;
use tracing::{debug, error};

use crate::error::Result;
use crate::port::outbound::store::{Checkpoint, CheckpointStore};

/// Owns the in-progress checkpoint for the duration of a run.
///
/// Every exit path leaves the store consistent: [`complete`](Self::complete)
/// clears it, [`fail`](Self::fail) saves it, and dropping an unfinished
/// guard (a cancelled future, a panic) saves it as well.
pub struct RunGuard<'s, K: CheckpointStore> {
    store: &'s K,
    checkpoint: Checkpoint,
    armed: bool,
}

impl<'s, K: CheckpointStore> RunGuard<'s, K> {
    pub fn new(store: &'s K, checkpoint: Checkpoint) -> Self {
        Self {
            store,
            checkpoint,
            armed: true,
        }
    }

    #[must_use]
    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    pub fn checkpoint_mut(&mut self) -> &mut Checkpoint {
        &mut self.checkpoint
    }

    /// Save the current state, keeping the guard armed.
    pub fn persist(&mut self) -> Result<()> {
        self.checkpoint.saved_at = Utc::now();
        self.store.save(&self.checkpoint)
    }

    /// Save the current state before an error propagates.
    pub fn fail(mut self) -> Result<()> {
        self.armed = false;
        self.persist()
    }

    /// The run succeeded: discard the checkpoint and hand back its state.
    pub fn complete(mut self) -> Result<Checkpoint> {
        self.armed = false;
        self.store.clear()?;
        Ok(std::mem::replace(&mut self.checkpoint, Checkpoint::fresh()))
    }
}

impl<K: CheckpointStore> Drop for RunGuard<'_, K> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.persist() {
            Ok(()) => debug!(
                cursor = self.checkpoint.cursor,
                "Checkpoint saved on interruption"
            ),
            Err(e) => error!(
                error = %e,
                cursor = self.checkpoint.cursor,
                "Failed to save checkpoint on interruption"
            ),
        }
    }
}
