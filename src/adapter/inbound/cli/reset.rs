//! Handler for the `reset` command.

use super::command::ResetArgs;
use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::outbound::store::{CacheStore, CheckpointStore};

/// Delete the checkpoint, and the cache when asked.
pub fn execute(config: &Config, args: &ResetArgs) -> Result<()> {
    bootstrap::checkpoint_store(config).clear()?;
    output::success("Checkpoint removed");

    if args.cache {
        bootstrap::cache_store(config).clear()?;
        output::success("Cache removed");
    }
    Ok(())
}
