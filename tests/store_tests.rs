use addrlink::adapter::outbound::file::{CsvReportWriter, JsonCacheStore, JsonCheckpointStore};
use addrlink::application::ResultCache;
use addrlink::domain::{Address, Signature};
use addrlink::port::outbound::store::{CacheStore, Checkpoint, CheckpointStore};
use addrlink::testkit::chain::FakeChain;
use addrlink::testkit::config;

mod support;

use support::{universe, LAMPORTS};

#[test]
fn file_cache_write_through_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.json");

    {
        let mut cache = ResultCache::load(JsonCacheStore::new(&path)).unwrap();
        cache.put_balance(&Address::new("A"), 42).unwrap();
        cache
            .put_signatures(&Address::new("A"), vec![Signature::new("s1")])
            .unwrap();
    }

    let reopened = ResultCache::load(JsonCacheStore::new(&path)).unwrap();
    assert_eq!(reopened.balance(&Address::new("A")), Some(42));
    assert_eq!(
        reopened.signatures(&Address::new("A")),
        Some([Signature::new("s1")].as_slice())
    );
}

#[test]
fn absent_files_mean_start_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let cache = JsonCacheStore::new(dir.path().join("cache.json"));
    let checkpoints = JsonCheckpointStore::new(dir.path().join("checkpoint.json"));

    assert!(cache.load().unwrap().balances.is_empty());
    assert!(checkpoints.load().unwrap().is_none());
    checkpoints.clear().unwrap();
    cache.clear().unwrap();
}

#[test]
fn checkpoint_overwrite_keeps_latest() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path().join("checkpoint.json"));

    let mut checkpoint = Checkpoint::fresh();
    store.save(&checkpoint).unwrap();
    checkpoint.recorded.insert(Signature::new("s9"));
    store.save(&checkpoint).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert!(loaded.recorded.contains(&Signature::new("s9")));
}

#[tokio::test]
async fn pipeline_over_file_stores_writes_csv_and_clears_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let cache = JsonCacheStore::new(dir.path().join("cache.json"));
    let checkpoints = JsonCheckpointStore::new(dir.path().join("checkpoint.json"));
    let report = CsvReportWriter::new(dir.path().join("report.csv"));

    let chain = FakeChain::new()
        .with_balance("A", LAMPORTS)
        .with_balance("B", LAMPORTS / 2)
        .with_transaction("s1", &["A", "B"])
        .with_transaction("s2", &["A", "B"]);
    let universe = universe(&["Cluster 1", "A", "B", "C"]);

    let mut pipeline = addrlink::application::Pipeline::new(
        chain,
        ResultCache::load(cache.clone()).unwrap(),
        checkpoints.clone(),
        config::pipeline(2),
    );
    pipeline.run(&universe, &report).await.unwrap();

    let csv = std::fs::read_to_string(report.path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Address,Balance,Whitelist Recommendation,Related Addresses,Risk Score",
            "A,1,Yes,B,1",
            "B,0.5,Yes,A,1",
            "C,0,No,None,0",
        ]
    );
    assert!(!checkpoints.path().exists());
    assert!(cache.path().exists());
}
