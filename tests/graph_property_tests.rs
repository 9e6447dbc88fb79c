use std::collections::BTreeSet;

use addrlink::domain::{Address, ClusterExtractor, InteractionGraph, ParticipantSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn addresses(n: usize) -> Vec<Address> {
    (0..n).map(|i| Address::new(format!("addr{i:02}"))).collect()
}

/// Random transactions over `universe`, each with 1 to 4 participants.
fn random_graph(seed: u64, universe: &[Address], transactions: usize) -> InteractionGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = InteractionGraph::new();
    for _ in 0..transactions {
        let size = rng.gen_range(1..=4);
        let participants: ParticipantSet = (0..size)
            .map(|_| universe[rng.gen_range(0..universe.len())].clone())
            .collect();
        graph.record_co_occurrence(&participants);
        assert!(graph.is_symmetric());
    }
    graph
}

fn grouped(universe: &[Address], graph: &InteractionGraph, threshold: u32) -> BTreeSet<Address> {
    ClusterExtractor::new(threshold)
        .extract(universe, graph)
        .iter()
        .flat_map(|g| g.members().cloned())
        .collect()
}

#[test]
fn counts_stay_symmetric() {
    let universe = addresses(12);
    for seed in 0..20 {
        let graph = random_graph(seed, &universe, 60);
        for a in &universe {
            for b in &universe {
                assert_eq!(graph.count(a, b), graph.count(b, a));
            }
        }
    }
}

#[test]
fn groups_partition_the_grouped_addresses() {
    let universe = addresses(15);
    for seed in 0..20 {
        let graph = random_graph(seed, &universe, 40);
        for threshold in 1..=3 {
            let groups = ClusterExtractor::new(threshold).extract(&universe, &graph);
            let mut seen = BTreeSet::new();
            for group in &groups {
                assert!(group.size() >= 2);
                for member in group.members() {
                    assert!(seen.insert(member.clone()), "{member} in two groups");
                }
            }
        }
    }
}

#[test]
fn raising_threshold_never_grows_grouped_set() {
    let universe = addresses(15);
    for seed in 0..20 {
        let graph = random_graph(seed, &universe, 50);
        let mut previous = grouped(&universe, &graph, 1);
        for threshold in 2..=5 {
            let current = grouped(&universe, &graph, threshold);
            assert!(current.is_subset(&previous), "seed {seed}, threshold {threshold}");
            previous = current;
        }
    }
}

#[test]
fn group_members_are_connected_above_threshold() {
    let universe = addresses(10);
    let graph = random_graph(7, &universe, 40);
    let threshold = 2;

    for group in ClusterExtractor::new(threshold).extract(&universe, &graph) {
        for member in group.members() {
            let has_strong_edge = group
                .members()
                .any(|other| other != member && graph.count(member, other) >= threshold);
            assert!(has_strong_edge, "{member} has no qualifying edge in its group");
        }
    }
}
