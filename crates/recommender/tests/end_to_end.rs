//! End-to-end tests for assembled recommender stacks.
//!
//! These wire real collaborators (fixed recall, parity filter, tier
//! sorter, history stores) the way a composition root would.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use history::{CandidateId, HistoryStore, InMemoryHistoryStore, JsonlHistoryStore};
use pipeline::filters::{AlreadyServedFilter, Parity, ParityFilter};
use pipeline::sorters::TierSorter;
use recommender::{ErrorKind, PipelineEngine, RecommendBuilder, Recommender};
use sources::FixedRecaller;

const DEMO_POOL: [CandidateId; 20] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 101, 201, 301, 401, 500, 601, 700, 800, 991, 1000,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("recommender=debug,pipeline=debug")
        .with_test_writer()
        .try_init();
}

fn bigger_group() -> TierSorter {
    TierSorter::new("BiggerGroup")
        .tier("above_100", |id| *id > 100)
        .tier("below_50", |id| *id > 0 && *id < 50)
        .tier("negative", |id| *id < 0)
}

fn demo_engine(seed: u64) -> PipelineEngine {
    PipelineEngine::new(0, FixedRecaller::new("match", DEMO_POOL.to_vec()))
        .with_filter_rule(ParityFilter::new(Parity::Odd))
        .with_sorter(bigger_group())
        .with_seed(seed)
}

#[test]
fn test_demo_scenario_orders_tiers() {
    init_tracing();

    for seed in 0..20 {
        let result = demo_engine(seed).fetch(100).unwrap();

        assert_eq!(result.len(), 11, "all odd ids survive");
        let high: HashSet<CandidateId> = result[..6].iter().copied().collect();
        let low: HashSet<CandidateId> = result[6..].iter().copied().collect();
        assert_eq!(high, HashSet::from([101, 201, 301, 401, 601, 991]));
        assert_eq!(low, HashSet::from([1, 3, 5, 7, 9]));
    }
}

#[test]
fn test_demo_scenario_filter_and_groups() {
    let engine = demo_engine(1);

    let filtered = engine.filter(DEMO_POOL.to_vec()).unwrap();
    assert_eq!(filtered, vec![1, 3, 5, 7, 9, 101, 201, 301, 401, 601, 991]);

    let groups = engine.group_sort(&filtered).unwrap();
    assert_eq!(
        groups,
        vec![vec![101, 201, 301, 401, 601, 991], vec![1, 3, 5, 7, 9]]
    );

    // No post-sorters: one group, order unchanged
    let flat: Vec<CandidateId> = groups.into_iter().flatten().collect();
    assert_eq!(engine.post_sort(&flat).unwrap(), vec![flat.clone()]);
}

#[test]
fn test_demo_scenario_truncates_from_top_tier() {
    let result = demo_engine(9).fetch(4).unwrap();

    assert_eq!(result.len(), 4);
    assert!(result.iter().all(|id| *id > 100));
}

#[test]
fn test_intra_tier_order_varies_across_seeds() {
    let orders: HashSet<Vec<CandidateId>> =
        (0..20).map(|seed| demo_engine(seed).fetch(100).unwrap()).collect();
    assert!(orders.len() > 1, "shuffle should produce different orders");
}

#[test]
fn test_served_history_excludes_on_next_fetch() {
    let store: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
    let stack = RecommendBuilder::new(0, FixedRecaller::new("match", DEMO_POOL.to_vec()))
        .filter_rule(AlreadyServedFilter::new(store.clone(), "user:0"))
        .filter_rule(ParityFilter::new(Parity::Odd))
        .sorter(bigger_group())
        .require_non_empty()
        .remember(store.clone(), "user:0")
        .seed(4)
        .build();

    let first = stack.fetch(6).unwrap();
    let second = stack.fetch(6).unwrap();

    let first_set: HashSet<CandidateId> = first.iter().copied().collect();
    assert!(second.iter().all(|id| !first_set.contains(id)));
    assert_eq!(first.len() + second.len(), 11);

    // Everything has been served: the escalation decorator turns that into an error
    assert_eq!(stack.fetch(6).unwrap_err().kind(), ErrorKind::EscalatedEmpty);
}

#[test]
fn test_jsonl_store_records_across_stacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("served.jsonl");

    let build = || {
        let store: Arc<dyn HistoryStore> = Arc::new(JsonlHistoryStore::new(&path));
        RecommendBuilder::new(0, FixedRecaller::new("match", DEMO_POOL.to_vec()))
            .filter_rule(AlreadyServedFilter::new(store.clone(), "jsonl"))
            .filter_rule(ParityFilter::new(Parity::Odd))
            .remember(store, "jsonl")
            .build()
    };

    let first = build().fetch(5).unwrap();
    let second = build().fetch(100).unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 6);
    let served = JsonlHistoryStore::new(&path).served("jsonl").unwrap();
    assert_eq!(served.len(), 11);
}

#[test]
fn test_shared_stack_across_threads() {
    let stack: Arc<dyn Recommender> = Arc::new(demo_engine(2));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let stack = Arc::clone(&stack);
            thread::spawn(move || stack.fetch(100))
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap().unwrap();
        assert_eq!(result.len(), 11);
    }
}
