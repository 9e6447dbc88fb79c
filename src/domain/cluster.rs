//! Thresholded connected-component extraction.
//!
//! An [`AddressGroup`] is a maximal set of two or more addresses that reach
//! each other over edges whose count meets the interaction threshold.
//! Groups are claimed in universe order and never overlap.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::graph::InteractionGraph;
use super::id::Address;

/// A disjoint group of interacting addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGroup {
    members: BTreeSet<Address>,
}

impl AddressGroup {
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn members(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    /// Other members of the group, excluding `address`.
    pub fn related_to<'a>(&'a self, address: &'a Address) -> impl Iterator<Item = &'a Address> {
        self.members.iter().filter(move |m| *m != address)
    }
}

/// Partitions the universe into interaction groups.
#[derive(Debug, Clone, Copy)]
pub struct ClusterExtractor {
    threshold: u32,
}

impl ClusterExtractor {
    #[must_use]
    pub fn new(interaction_threshold: u32) -> Self {
        Self {
            threshold: interaction_threshold,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Extract groups, visiting start addresses in the given order.
    ///
    /// The first unclaimed address of a component claims the whole
    /// component. Components of size one are discarded.
    pub fn extract<'a>(
        &self,
        universe: impl IntoIterator<Item = &'a Address>,
        graph: &InteractionGraph,
    ) -> Vec<AddressGroup> {
        let mut claimed: HashSet<Address> = HashSet::new();
        let mut groups = Vec::new();

        for start in universe {
            if claimed.contains(start) {
                continue;
            }

            let members = self.component(start, graph);
            if members.len() < 2 {
                continue;
            }

            claimed.extend(members.iter().cloned());
            groups.push(AddressGroup { members });
        }

        groups
    }

    fn component(&self, start: &Address, graph: &InteractionGraph) -> BTreeSet<Address> {
        let mut members = BTreeSet::from([start.clone()]);
        let mut frontier = VecDeque::from([start.clone()]);

        while let Some(current) = frontier.pop_front() {
            for (target, count) in graph.neighbors(&current) {
                if count >= self.threshold && members.insert(target.clone()) {
                    frontier.push_back(target.clone());
                }
            }
        }
        members
    }
}

/// Lookup from address to the group that claimed it.
#[derive(Debug, Default)]
pub struct GroupIndex<'g> {
    by_address: HashMap<&'g Address, &'g AddressGroup>,
}

impl<'g> GroupIndex<'g> {
    #[must_use]
    pub fn new(groups: &'g [AddressGroup]) -> Self {
        let by_address = groups
            .iter()
            .flat_map(|group| group.members().map(move |m| (m, group)))
            .collect();
        Self { by_address }
    }

    #[must_use]
    pub fn group_of(&self, address: &Address) -> Option<&'g AddressGroup> {
        self.by_address.get(address).copied()
    }
}
