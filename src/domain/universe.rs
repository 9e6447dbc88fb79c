//! The ordered set of addresses under analysis.

use std::collections::HashMap;

use tracing::warn;

use super::graph::ParticipantSet;
use super::id::Address;

/// One entry of the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEntry {
    /// Starts a new named group of addresses.
    Label(String),
    Address(Address),
}

/// An address together with the input label it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseEntry {
    pub address: Address,
    pub cluster: Option<String>,
}

/// Address universe in deterministic processing order.
///
/// Order is first appearance in the input. The checkpoint cursor and the
/// group extractor's claim order both index into it.
#[derive(Debug, Clone, Default)]
pub struct AddressUniverse {
    entries: Vec<UniverseEntry>,
    index: HashMap<Address, usize>,
}

impl AddressUniverse {
    /// Build the universe from the input sequence, dropping labels and
    /// repeated addresses.
    pub fn from_entries(input: impl IntoIterator<Item = InputEntry>) -> Self {
        let mut universe = Self::default();
        let mut cluster: Option<String> = None;

        for entry in input {
            match entry {
                InputEntry::Label(label) => cluster = Some(label),
                InputEntry::Address(address) => {
                    if universe.index.contains_key(&address) {
                        warn!(address = %address, "Duplicate address in input, keeping first");
                        continue;
                    }
                    universe.index.insert(address.clone(), universe.entries.len());
                    universe.entries.push(UniverseEntry {
                        address,
                        cluster: cluster.clone(),
                    });
                }
            }
        }
        universe
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&UniverseEntry> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> impl Iterator<Item = &UniverseEntry> {
        self.entries.iter()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.entries.iter().map(|e| &e.address)
    }

    /// Keep only the account keys that belong to the universe.
    pub fn restrict<'a>(&self, keys: impl IntoIterator<Item = &'a Address>) -> ParticipantSet {
        keys.into_iter()
            .filter(|key| self.contains(key))
            .cloned()
            .collect()
    }
}
