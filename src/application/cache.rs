//! Durable cache of previously fetched chain data.
//!
//! Consulted before every remote read. Entries never expire; every `put_*`
//! writes the whole cache through to its store before returning, so a crash
//! loses at most the read in flight.

use crate::domain::{Address, ParticipantSet, Signature};
use crate::error::Result;
use crate::port::outbound::store::{CacheSnapshot, CacheStore};

/// Entry counts of a cache, for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub balances: usize,
    pub signature_lists: usize,
    pub transactions: usize,
}

/// Write-through cache over a [`CacheStore`].
pub struct ResultCache<S: CacheStore> {
    store: S,
    snapshot: CacheSnapshot,
}

impl<S: CacheStore> ResultCache<S> {
    /// Load whatever `store` holds; an empty store yields an empty cache.
    pub fn load(store: S) -> Result<Self> {
        let snapshot = store.load()?;
        Ok(Self { store, snapshot })
    }

    #[must_use]
    pub fn balance(&self, address: &Address) -> Option<u64> {
        self.snapshot.balances.get(address).copied()
    }

    pub fn put_balance(&mut self, address: &Address, lamports: u64) -> Result<()> {
        self.snapshot.balances.insert(address.clone(), lamports);
        self.flush()
    }

    #[must_use]
    pub fn signatures(&self, address: &Address) -> Option<&[Signature]> {
        self.snapshot.signatures.get(address).map(Vec::as_slice)
    }

    pub fn put_signatures(&mut self, address: &Address, signatures: Vec<Signature>) -> Result<()> {
        self.snapshot.signatures.insert(address.clone(), signatures);
        self.flush()
    }

    #[must_use]
    pub fn participants(&self, signature: &Signature) -> Option<&ParticipantSet> {
        self.snapshot.participants.get(signature)
    }

    pub fn put_participants(
        &mut self,
        signature: &Signature,
        participants: ParticipantSet,
    ) -> Result<()> {
        self.snapshot
            .participants
            .insert(signature.clone(), participants);
        self.flush()
    }

    pub fn flush(&self) -> Result<()> {
        self.store.flush(&self.snapshot)
    }

    /// Drop every entry, in memory and in the store.
    pub fn clear(&mut self) -> Result<()> {
        self.snapshot = CacheSnapshot::default();
        self.store.clear()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            balances: self.snapshot.balances.len(),
            signature_lists: self.snapshot.signatures.len(),
            transactions: self.snapshot.participants.len(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryCacheStore;

    #[test]
    fn every_put_flushes() {
        let store = MemoryCacheStore::new();
        let mut cache = ResultCache::load(store.clone()).unwrap();
        let address = Address::new("a");

        cache.put_balance(&address, 10).unwrap();
        cache
            .put_signatures(&address, vec![Signature::new("s")])
            .unwrap();
        cache
            .put_participants(&Signature::new("s"), ParticipantSet::new())
            .unwrap();

        assert_eq!(store.flushes(), 3);
        assert_eq!(store.snapshot().balances.get(&address), Some(&10));
    }

    #[test]
    fn reload_sees_previous_entries() {
        let store = MemoryCacheStore::new();
        let mut cache = ResultCache::load(store.clone()).unwrap();
        cache.put_balance(&Address::new("a"), 3).unwrap();

        let reloaded = ResultCache::load(store).unwrap();
        assert_eq!(reloaded.balance(&Address::new("a")), Some(3));
        assert_eq!(reloaded.signatures(&Address::new("a")), None);
        assert_eq!(
            reloaded.stats(),
            CacheStats {
                balances: 1,
                signature_lists: 0,
                transactions: 0
            }
        );
    }

    #[test]
    fn clear_empties_store() {
        let store = MemoryCacheStore::new();
        let mut cache = ResultCache::load(store.clone()).unwrap();
        cache.put_balance(&Address::new("a"), 3).unwrap();
        cache.clear().unwrap();

        assert_eq!(cache.balance(&Address::new("a")), None);
        assert_eq!(store.snapshot(), CacheSnapshot::default());
    }
}
