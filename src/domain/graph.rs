//! Co-occurrence graph over the address universe.
//!
//! Every transaction contributes its participant set as a clique: each
//! ordered pair of distinct participants gets its count bumped by one. Both
//! directions are updated in the same step, so `count(a, b) == count(b, a)`
//! holds between any two calls.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::id::Address;

/// Addresses from the universe that appear together in one transaction.
pub type ParticipantSet = BTreeSet<Address>;

/// Directed interaction-count multigraph.
///
/// Adjacency and counts share one structure: a target is a neighbor of a
/// source exactly when it has a count entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionGraph {
    edges: BTreeMap<Address, BTreeMap<Address, u32>>,
}

impl InteractionGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one transaction's participants.
    ///
    /// No-op for fewer than two participants. Not idempotent: the caller
    /// must feed each transaction at most once. Returns the number of
    /// ordered pairs incremented.
    pub fn record_co_occurrence(&mut self, participants: &ParticipantSet) -> usize {
        if participants.len() < 2 {
            return 0;
        }

        let mut incremented = 0;
        for source in participants {
            let targets = self.edges.entry(source.clone()).or_default();
            for target in participants {
                if source == target {
                    continue;
                }
                *targets.entry(target.clone()).or_insert(0) += 1;
                incremented += 1;
            }
        }
        incremented
    }

    /// Co-occurrence count for the ordered pair, 0 if never seen together.
    #[must_use]
    pub fn count(&self, source: &Address, target: &Address) -> u32 {
        self.edges
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    /// Outgoing edges of `source` with their counts, in address order.
    pub fn neighbors<'a>(&'a self, source: &Address) -> impl Iterator<Item = (&'a Address, u32)> {
        self.edges
            .get(source)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(addr, count)| (addr, *count)))
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Number of addresses with at least one outgoing edge.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check `count(a, b) == count(b, a)` for every edge.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.edges.iter().all(|(source, targets)| {
            targets
                .iter()
                .all(|(target, count)| self.count(target, source) == *count)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(addrs: &[&str]) -> ParticipantSet {
        addrs.iter().map(|a| Address::new(*a)).collect()
    }

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    #[test]
    fn singleton_and_empty_sets_are_ignored() {
        let mut graph = InteractionGraph::new();
        assert_eq!(graph.record_co_occurrence(&set(&[])), 0);
        assert_eq!(graph.record_co_occurrence(&set(&["a"])), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn every_ordered_pair_is_incremented() {
        let mut graph = InteractionGraph::new();
        let incremented = graph.record_co_occurrence(&set(&["a", "b", "c"]));

        assert_eq!(incremented, 6);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.count(&addr("a"), &addr("c")), 1);
        assert_eq!(graph.count(&addr("c"), &addr("a")), 1);
        assert_eq!(graph.count(&addr("a"), &addr("a")), 0);
    }

    #[test]
    fn repeated_transactions_accumulate() {
        let mut graph = InteractionGraph::new();
        for _ in 0..3 {
            graph.record_co_occurrence(&set(&["a", "b"]));
        }
        graph.record_co_occurrence(&set(&["b", "c"]));

        assert_eq!(graph.count(&addr("a"), &addr("b")), 3);
        assert_eq!(graph.count(&addr("b"), &addr("c")), 1);
        assert_eq!(graph.count(&addr("a"), &addr("c")), 0);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn symmetry_holds_after_every_step() {
        let transactions = [
            set(&["a", "b", "c", "d"]),
            set(&["a", "d"]),
            set(&["e"]),
            set(&["b", "c", "e"]),
            set(&["a", "b", "c", "d", "e"]),
        ];
        let mut graph = InteractionGraph::new();
        for participants in &transactions {
            graph.record_co_occurrence(participants);
            assert!(graph.is_symmetric());
        }
    }

    #[test]
    fn neighbors_are_listed_in_address_order() {
        let mut graph = InteractionGraph::new();
        graph.record_co_occurrence(&set(&["m", "z", "b"]));
        let neighbors: Vec<_> = graph
            .neighbors(&addr("m"))
            .map(|(a, _)| a.as_str().to_string())
            .collect();
        assert_eq!(neighbors, vec!["b", "z"]);
        assert_eq!(graph.neighbors(&addr("unknown")).count(), 0);
    }
}
