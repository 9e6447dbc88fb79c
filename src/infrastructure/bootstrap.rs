//! Infrastructure bootstrap helpers for runtime wiring.

use tracing::info;

use crate::adapter::outbound::file::{JsonCacheStore, JsonCheckpointStore};
use crate::adapter::outbound::rpc::{HttpTransport, RemoteCallClient, SolanaReader};
use crate::application::{Pipeline, PipelineSettings, ResultCache};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Pipeline over Solana JSON-RPC with JSON file stores.
pub type LivePipeline = Pipeline<SolanaReader<HttpTransport>, JsonCacheStore, JsonCheckpointStore>;

/// Cache store at the configured location.
#[must_use]
pub fn cache_store(config: &Config) -> JsonCacheStore {
    JsonCacheStore::new(config.storage.cache_path.clone())
}

/// Checkpoint store at the configured location.
#[must_use]
pub fn checkpoint_store(config: &Config) -> JsonCheckpointStore {
    JsonCheckpointStore::new(config.storage.checkpoint_path.clone())
}

/// Wire the live pipeline from configuration.
///
/// # Errors
///
/// Fails if the persisted cache cannot be read.
pub fn build_pipeline(config: &Config, settings: PipelineSettings) -> Result<LivePipeline> {
    let transport = HttpTransport::from_config(&config.rpc);
    let reader = SolanaReader::new(RemoteCallClient::new(transport, &config.rpc));
    let cache = ResultCache::load(cache_store(config))?;

    let stats = cache.stats();
    info!(
        endpoints = config.rpc.endpoints.len(),
        cached_balances = stats.balances,
        cached_transactions = stats.transactions,
        "Pipeline ready"
    );

    Ok(Pipeline::new(reader, cache, checkpoint_store(config), settings))
}
