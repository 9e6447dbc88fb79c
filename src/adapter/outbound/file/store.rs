//! JSON file stores for the result cache and the checkpoint.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::atomic::{read_json, remove, write_json};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    CacheSnapshot, CacheStore, Checkpoint, CheckpointStore, CHECKPOINT_VERSION,
};

/// Result cache persisted as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonCacheStore {
    path: PathBuf,
}

impl JsonCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> Result<CacheSnapshot> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn flush(&self, snapshot: &CacheSnapshot) -> Result<()> {
        write_json(&self.path, snapshot)
    }

    fn clear(&self) -> Result<()> {
        remove(&self.path)
    }
}

/// Checkpoint persisted as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for JsonCheckpointStore {
    fn load(&self) -> Result<Option<Checkpoint>> {
        let checkpoint: Option<Checkpoint> = read_json(&self.path)?;
        if let Some(cp) = &checkpoint {
            if cp.version != CHECKPOINT_VERSION {
                return Err(Error::Storage(format!(
                    "{} has format version {}, expected {CHECKPOINT_VERSION}",
                    self.path.display(),
                    cp.version
                )));
            }
        }
        Ok(checkpoint)
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        write_json(&self.path, checkpoint)?;
        debug!(path = %self.path.display(), cursor = checkpoint.cursor, "Checkpoint written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        remove(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, AddressRecord, Balance, ParticipantSet, Signature};

    #[test]
    fn missing_cache_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCacheStore::new(dir.path().join("cache.json"));
        assert_eq!(store.load().unwrap(), CacheSnapshot::default());
    }

    #[test]
    fn cache_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCacheStore::new(dir.path().join("nested/cache.json"));

        let mut snapshot = CacheSnapshot::default();
        snapshot.balances.insert(Address::new("a"), 7);
        let participants: ParticipantSet = [Address::new("a"), Address::new("b")].into();
        snapshot.participants.insert(Signature::new("s"), participants);
        store.flush(&snapshot).unwrap();

        let reopened = JsonCacheStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().unwrap(), snapshot);
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonCacheStore::new(path).load(),
            Err(Error::Storage(_))
        ));
    }

    #[test]
    fn checkpoint_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.json"));
        assert!(store.load().unwrap().is_none());

        let mut checkpoint = Checkpoint::fresh();
        checkpoint.cursor = 1;
        checkpoint.records.push(AddressRecord {
            address: Address::new("a"),
            cluster: Some("Cluster 1".into()),
            balance: Balance::Unknown,
        });
        let pair: ParticipantSet = [Address::new("a"), Address::new("b")].into();
        checkpoint.graph.record_co_occurrence(&pair);
        checkpoint.recorded.insert(Signature::new("s"));
        store.save(&checkpoint).unwrap();

        assert_eq!(store.load().unwrap(), Some(checkpoint));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn checkpoint_with_other_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.json"));
        let mut checkpoint = Checkpoint::fresh();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        store.save(&checkpoint).unwrap();
        assert!(matches!(store.load(), Err(Error::Storage(_))));
    }
}
