//! Locations of the durable cache and checkpoint blobs.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Result cache file. Defaults to `addrlink-cache.json`.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Checkpoint file. Defaults to `addrlink-checkpoint.json`.
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: PathBuf,

    /// Delete the cache after a successful run. Defaults to false, so reruns
    /// over the same input avoid remote calls.
    #[serde(default)]
    pub clear_cache_on_success: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            checkpoint_path: default_checkpoint_path(),
            clear_cache_on_success: false,
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("addrlink-cache.json")
}

fn default_checkpoint_path() -> PathBuf {
    PathBuf::from("addrlink-checkpoint.json")
}
