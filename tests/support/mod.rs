#![allow(dead_code)]

use addrlink::adapter::outbound::memory::{MemoryCacheStore, MemoryCheckpointStore};
use addrlink::application::{Pipeline, PipelineSettings, ResultCache};
use addrlink::domain::{Address, AddressUniverse, InputEntry, ReportRow};
use addrlink::error::Result;
use addrlink::port::outbound::report::ReportSink;
use addrlink::port::outbound::store::CacheStore;
use addrlink::testkit::chain::FakeChain;
use parking_lot::Mutex;

pub const LAMPORTS: u64 = 1_000_000_000;

/// Universe from a compact list: entries starting with `Cluster` are labels.
pub fn universe(items: &[&str]) -> AddressUniverse {
    AddressUniverse::from_entries(items.iter().map(|item| {
        if item.starts_with("Cluster") {
            InputEntry::Label((*item).to_string())
        } else {
            InputEntry::Address(Address::new(*item))
        }
    }))
}

/// Report sink keeping the last rows written.
#[derive(Default)]
pub struct CollectingSink {
    rows: Mutex<Vec<ReportRow>>,
}

impl CollectingSink {
    pub fn rows(&self) -> Vec<ReportRow> {
        self.rows.lock().clone()
    }
}

impl ReportSink for CollectingSink {
    fn write(&self, rows: &[ReportRow]) -> Result<()> {
        *self.rows.lock() = rows.to_vec();
        Ok(())
    }
}

pub fn pipeline<C: CacheStore + Clone>(
    chain: &FakeChain,
    cache: &C,
    checkpoints: &MemoryCheckpointStore,
    settings: PipelineSettings,
) -> Pipeline<FakeChain, C, MemoryCheckpointStore> {
    let cache = ResultCache::load(cache.clone()).expect("load cache");
    Pipeline::new(chain.clone(), cache, checkpoints.clone(), settings)
}

/// Pipeline over fresh in-memory stores.
pub fn fresh_pipeline(
    chain: &FakeChain,
    settings: PipelineSettings,
) -> Pipeline<FakeChain, MemoryCacheStore, MemoryCheckpointStore> {
    pipeline(
        chain,
        &MemoryCacheStore::new(),
        &MemoryCheckpointStore::new(),
        settings,
    )
}

pub fn row<'a>(rows: &'a [ReportRow], address: &str) -> &'a ReportRow {
    rows.iter()
        .find(|r| r.address.as_str() == address)
        .unwrap_or_else(|| panic!("no row for {address}"))
}
