//! Ingestion orchestrator.
//!
//! For each address of the universe, in order: fetch the balance and the
//! signature list (cache first), resolve the participants of every
//! transaction not yet counted (cache first, up to `max_in_flight` reads in
//! flight), and feed them to the interaction graph. The checkpoint is saved
//! every `checkpoint_interval` addresses. Once every address is ingested the
//! graph is clustered, every address is scored, and the rows go to the
//! report sink.
//!
//! Chain read failures are absorbed and recorded as missing data. Any other
//! failure saves the checkpoint and surfaces as [`Error::Pipeline`].

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::cache::ResultCache;
use super::guard::RunGuard;
use super::settings::PipelineSettings;
use super::stage::{AddressStage, RunStage};
use crate::domain::{
    Address, AddressGroup, AddressRecord, AddressUniverse, Balance, ClusterExtractor, GroupIndex,
    InteractionGraph, ParticipantSet, ReportRow, RiskScorer, Signature, UniverseEntry,
};
use crate::error::{Error, Result, RpcError};
use crate::port::outbound::chain::ChainReader;
use crate::port::outbound::progress::{NoopProgress, ProgressSink};
use crate::port::outbound::report::ReportSink;
use crate::port::outbound::store::{CacheStore, Checkpoint, CheckpointStore};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub rows: Vec<ReportRow>,
    pub groups: Vec<AddressGroup>,
    pub graph: InteractionGraph,
    /// Addresses already ingested by an earlier, interrupted run.
    pub resumed_at: usize,
}

/// Participants of one transaction, from the cache or the chain.
enum Resolved {
    Cached(ParticipantSet),
    Fetched(std::result::Result<Option<Vec<Address>>, RpcError>),
}

pub struct Pipeline<R, C, K>
where
    R: ChainReader,
    C: CacheStore,
    K: CheckpointStore,
{
    reader: R,
    cache: ResultCache<C>,
    checkpoints: K,
    settings: PipelineSettings,
    progress: Arc<dyn ProgressSink>,
}

impl<R, C, K> Pipeline<R, C, K>
where
    R: ChainReader,
    C: CacheStore,
    K: CheckpointStore,
{
    pub fn new(
        reader: R,
        cache: ResultCache<C>,
        checkpoints: K,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            reader,
            cache,
            checkpoints,
            settings,
            progress: Arc::new(NoopProgress),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    #[must_use]
    pub fn cache(&self) -> &ResultCache<C> {
        &self.cache
    }

    /// Run the pipeline over `universe`, resuming from a saved checkpoint.
    ///
    /// # Errors
    ///
    /// [`Error::Input`] if the saved checkpoint belongs to a different
    /// address list, [`Error::Pipeline`] when ingestion of an address fails
    /// for a reason other than a chain read, or the sink's error. The
    /// checkpoint is saved before any of these is returned.
    pub async fn run(
        &mut self,
        universe: &AddressUniverse,
        sink: &dyn ReportSink,
    ) -> Result<PipelineOutcome> {
        let Self {
            reader,
            cache,
            checkpoints,
            settings,
            progress,
        } = self;

        let checkpoint = match checkpoints.load()? {
            Some(saved) => {
                ensure_matches(&saved, universe)?;
                info!(cursor = saved.cursor, total = universe.len(), "Resuming from checkpoint");
                saved
            }
            None => {
                let fresh = Checkpoint::fresh();
                checkpoints.save(&fresh)?;
                fresh
            }
        };
        let resumed_at = checkpoint.cursor;
        let mut guard = RunGuard::new(&*checkpoints, checkpoint);

        info!(
            stage = %RunStage::Ingesting,
            total = universe.len(),
            resumed_at,
            "Starting ingestion"
        );
        progress.started(universe.len(), resumed_at);

        for position in resumed_at..universe.len() {
            let Some(entry) = universe.get(position) else {
                break;
            };

            let ingested = ingest_address(
                &*reader,
                cache,
                guard.checkpoint_mut(),
                universe,
                entry,
                settings,
            )
            .await;

            let record = match ingested {
                Ok(record) => record,
                Err((stage, source)) => {
                    let address = entry.address.clone();
                    warn!(address = %address, stage = %stage, error = %source, "Ingestion halted");
                    if let Err(e) = guard.fail() {
                        warn!(error = %e, "Failed to save checkpoint after error");
                    }
                    return Err(Error::Pipeline {
                        address,
                        stage,
                        source: Box::new(source),
                    });
                }
            };

            let checkpoint = guard.checkpoint_mut();
            checkpoint.records.push(record);
            checkpoint.cursor = position + 1;
            progress.advanced(&entry.address);

            let cursor = checkpoint.cursor;
            if cursor % settings.checkpoint_interval.max(1) == 0 {
                if let Err(source) = guard.persist() {
                    let address = entry.address.clone();
                    return Err(Error::Pipeline {
                        address,
                        stage: AddressStage::GraphUpdated,
                        source: Box::new(source),
                    });
                }
                info!(cursor, total = universe.len(), "Checkpoint saved");
            }
        }
        progress.finished();

        let checkpoint = guard.checkpoint();
        let groups = ClusterExtractor::new(settings.interaction_threshold)
            .extract(universe.addresses(), &checkpoint.graph);
        info!(
            stage = %RunStage::Clustered,
            groups = groups.len(),
            nodes = checkpoint.graph.node_count(),
            edges = checkpoint.graph.edge_count(),
            "Graph clustered"
        );

        let rows = score_records(&checkpoint.records, &groups, settings);
        info!(stage = %RunStage::Scored, rows = rows.len(), "Addresses scored");

        if let Err(e) = sink.write(&rows) {
            if let Err(save) = guard.fail() {
                warn!(error = %save, "Failed to save checkpoint after error");
            }
            return Err(e);
        }

        let finished = guard.complete()?;
        if settings.clear_cache_on_success {
            cache.clear()?;
            debug!("Cache cleared");
        }
        info!(stage = %RunStage::Reported, rows = rows.len(), "Run complete");

        Ok(PipelineOutcome {
            rows,
            groups,
            graph: finished.graph,
            resumed_at,
        })
    }
}

/// A checkpoint may only resume the list it was taken from.
fn ensure_matches(checkpoint: &Checkpoint, universe: &AddressUniverse) -> Result<()> {
    let consistent = checkpoint.cursor <= universe.len()
        && checkpoint.records.len() == checkpoint.cursor
        && checkpoint
            .records
            .iter()
            .zip(universe.entries())
            .all(|(record, entry)| record.address == entry.address);

    if consistent {
        Ok(())
    } else {
        Err(Error::Input(
            "saved checkpoint does not match the address list; run `addrlink reset` to start over"
                .into(),
        ))
    }
}

fn score_records(
    records: &[AddressRecord],
    groups: &[AddressGroup],
    settings: &PipelineSettings,
) -> Vec<ReportRow> {
    let scorer = RiskScorer::new(settings.balance_threshold, settings.high_risk_score);
    let index = GroupIndex::new(groups);
    records
        .iter()
        .map(|record| {
            let group = index.group_of(&record.address);
            ReportRow::new(record, scorer.score(&record.balance, group), group)
        })
        .collect()
}

type StageResult<T> = std::result::Result<T, (AddressStage, Error)>;

/// Take one address from `Pending` to `GraphUpdated`.
///
/// Graph and cache mutation happens between reads, never across one.
async fn ingest_address<R: ChainReader, C: CacheStore>(
    reader: &R,
    cache: &mut ResultCache<C>,
    checkpoint: &mut Checkpoint,
    universe: &AddressUniverse,
    entry: &UniverseEntry,
    settings: &PipelineSettings,
) -> StageResult<AddressRecord> {
    let address = &entry.address;
    let mut stage = AddressStage::Pending;

    let balance = match cache.balance(address) {
        Some(lamports) => Balance::from_lamports(lamports),
        None => match reader.balance(address).await {
            Ok(lamports) => {
                cache.put_balance(address, lamports).map_err(|e| (stage, e))?;
                Balance::from_lamports(lamports)
            }
            Err(e) => {
                warn!(address = %address, error = %e, "Balance unavailable");
                Balance::Unknown
            }
        },
    };
    stage = AddressStage::BalanceFetched;

    let signatures: Vec<Signature> = match cache.signatures(address) {
        Some(cached) => cached.to_vec(),
        None => match reader.signatures(address, settings.signature_limit).await {
            Ok(fetched) => {
                cache
                    .put_signatures(address, fetched.clone())
                    .map_err(|e| (stage, e))?;
                fetched
            }
            Err(e) => {
                warn!(address = %address, error = %e, "Transactions unavailable");
                Vec::new()
            }
        },
    };
    stage = AddressStage::TransactionsFetched;

    let mut seen = HashSet::new();
    let plan: Vec<(Signature, Option<ParticipantSet>)> = signatures
        .into_iter()
        .filter(|sig| !checkpoint.recorded.contains(sig) && seen.insert(sig.clone()))
        .map(|sig| {
            let cached = cache.participants(&sig).cloned();
            (sig, cached)
        })
        .collect();
    let pending = plan.len();

    let mut resolved = stream::iter(plan)
        .map(|(signature, cached)| async move {
            let resolved = match cached {
                Some(participants) => Resolved::Cached(participants),
                None => Resolved::Fetched(reader.account_keys(&signature).await),
            };
            (signature, resolved)
        })
        .buffered(settings.max_in_flight.max(1));

    let mut counted = 0usize;
    while let Some((signature, resolved)) = resolved.next().await {
        let participants = match resolved {
            // The list may have changed since the entry was cached.
            Resolved::Cached(cached) => universe.restrict(cached.iter()),
            Resolved::Fetched(Ok(Some(keys))) => {
                let participants = universe.restrict(keys.iter());
                cache
                    .put_participants(&signature, participants.clone())
                    .map_err(|e| (stage, e))?;
                participants
            }
            Resolved::Fetched(Ok(None)) => {
                debug!(signature = %signature, "Transaction not found");
                continue;
            }
            Resolved::Fetched(Err(e)) => {
                warn!(
                    address = %address,
                    signature = %signature,
                    error = %e,
                    "Transaction unavailable"
                );
                continue;
            }
        };

        checkpoint.graph.record_co_occurrence(&participants);
        checkpoint.recorded.insert(signature);
        counted += 1;
    }
    stage = AddressStage::ParticipantsResolved;
    debug!(address = %address, stage = %stage, pending, counted, "Participants resolved");

    debug!(
        address = %address,
        stage = %AddressStage::GraphUpdated,
        balance = %balance,
        "Address ingested"
    );
    Ok(AddressRecord {
        address: address.clone(),
        cluster: entry.cluster.clone(),
        balance,
    })
}
