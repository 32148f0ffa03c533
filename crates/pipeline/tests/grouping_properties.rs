//! Property tests for the hierarchical partition.
//!
//! Predicates here are threshold and modulus tests generated by proptest,
//! so layers overlap, leave gaps, and sometimes match nothing at all.

use std::collections::HashSet;

use history::CandidateId;
use pipeline::grouping::{flatten, partition};
use pipeline::NamedPredicateSet;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Test {
    Above(i64),
    Below(i64),
    DivisibleBy(i64),
}

impl Test {
    fn eval(&self, id: CandidateId) -> bool {
        match *self {
            Test::Above(t) => id > t,
            Test::Below(t) => id < t,
            Test::DivisibleBy(m) => id.rem_euclid(m) == 0,
        }
    }
}

fn arb_test() -> impl Strategy<Value = Test> {
    prop_oneof![
        (-500i64..500).prop_map(Test::Above),
        (-500i64..500).prop_map(Test::Below),
        (2i64..7).prop_map(Test::DivisibleBy),
    ]
}

fn build(layers: &[Vec<Test>]) -> Vec<NamedPredicateSet> {
    layers
        .iter()
        .enumerate()
        .map(|(i, tests)| {
            let mut set = NamedPredicateSet::new(format!("layer_{}", i));
            for (j, test) in tests.iter().cloned().enumerate() {
                set = set.with(format!("tier_{}", j), move |id: &CandidateId| test.eval(*id));
            }
            set
        })
        .collect()
}

/// Tier path of an item through every layer; None if some layer drops it.
fn path(layers: &[Vec<Test>], id: CandidateId) -> Option<Vec<usize>> {
    layers
        .iter()
        .map(|tests| tests.iter().position(|t| t.eval(id)))
        .collect()
}

proptest! {
    #[test]
    fn groups_are_disjoint_subset_of_input(
        items in prop::collection::hash_set(-1000i64..1000, 0..60),
        layers in prop::collection::vec(prop::collection::vec(arb_test(), 1..4), 1..4),
    ) {
        let items: Vec<CandidateId> = items.into_iter().collect();
        let groups = partition(&items, &build(&layers));

        let input: HashSet<CandidateId> = items.iter().copied().collect();
        let mut seen = HashSet::new();
        for group in &groups {
            prop_assert!(!group.is_empty());
            for id in group {
                prop_assert!(input.contains(id));
                prop_assert!(seen.insert(*id), "{} appears in two groups", id);
            }
        }
    }

    #[test]
    fn unmatched_items_are_dropped_and_matched_items_kept(
        items in prop::collection::hash_set(-1000i64..1000, 0..60),
        layers in prop::collection::vec(prop::collection::vec(arb_test(), 1..4), 1..4),
    ) {
        let items: Vec<CandidateId> = items.into_iter().collect();
        let flat: HashSet<CandidateId> = flatten(partition(&items, &build(&layers)))
            .into_iter()
            .collect();

        for id in &items {
            prop_assert_eq!(flat.contains(id), path(&layers, *id).is_some());
        }
    }

    #[test]
    fn group_order_follows_tier_paths(
        items in prop::collection::hash_set(-1000i64..1000, 0..60),
        layers in prop::collection::vec(prop::collection::vec(arb_test(), 1..4), 1..4),
    ) {
        let items: Vec<CandidateId> = items.into_iter().collect();
        let groups = partition(&items, &build(&layers));

        let paths: Vec<Vec<usize>> = groups
            .iter()
            .map(|group| {
                let first = path(&layers, group[0]).unwrap();
                for id in group {
                    assert_eq!(path(&layers, *id).unwrap(), first, "group mixes tiers");
                }
                first
            })
            .collect();

        // Lexicographic tier paths, strictly increasing
        for pair in paths.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn no_layers_is_identity(items in prop::collection::vec(-1000i64..1000, 0..40)) {
        let groups = partition::<CandidateId>(&items, &[]);
        prop_assert_eq!(groups, vec![items]);
    }
}
