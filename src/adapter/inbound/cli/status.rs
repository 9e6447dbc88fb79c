//! Handler for the `status` command.

use serde_json::json;

use super::output;
use crate::application::ResultCache;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::outbound::store::CheckpointStore;

/// Show saved progress and cache sizes.
pub fn execute(config: &Config) -> Result<()> {
    let checkpoint = bootstrap::checkpoint_store(config).load()?;
    let cache = ResultCache::load(bootstrap::cache_store(config))?;
    let stats = cache.stats();

    if output::is_json() {
        output::json_output(json!({
            "command": "status",
            "checkpoint": checkpoint.as_ref().map(|cp| json!({
                "cursor": cp.cursor,
                "edges": cp.graph.edge_count(),
                "transactions": cp.recorded.len(),
                "saved_at": cp.saved_at.to_rfc3339(),
            })),
            "cache": {
                "balances": stats.balances,
                "signature_lists": stats.signature_lists,
                "transactions": stats.transactions,
            },
        }));
        return Ok(());
    }

    output::header();
    output::section("Checkpoint");
    match &checkpoint {
        Some(cp) => {
            output::field("Processed", cp.cursor);
            output::field("Edges", cp.graph.edge_count());
            output::field("Transactions", cp.recorded.len());
            output::field("Saved", cp.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => output::note("No saved progress"),
    }

    output::section("Cache");
    output::field("Path", config.storage.cache_path.display());
    output::field("Balances", stats.balances);
    output::field("Signatures", stats.signature_lists);
    output::field("Transactions", stats.transactions);
    Ok(())
}
