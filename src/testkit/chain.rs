//! In-memory [`ChainReader`] for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::domain::{Address, Signature};
use crate::error::RpcError;
use crate::port::outbound::chain::ChainReader;

/// One read issued against a [`FakeChain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChainCall {
    Balance(Address),
    Signatures(Address),
    Transaction(Signature),
}

#[derive(Debug, Default)]
struct ChainState {
    balances: HashMap<Address, u64>,
    signatures: HashMap<Address, Vec<Signature>>,
    transactions: HashMap<Signature, Vec<Address>>,
    failing_balances: HashSet<Address>,
    failing_signatures: HashSet<Address>,
    failing_transactions: HashSet<Signature>,
    hanging: HashSet<Address>,
    hanging_transactions: HashSet<Signature>,
}

/// Chain with scripted balances and transactions.
///
/// Clones share state and the call log. Unknown addresses have a zero
/// balance and no transactions; unknown signatures have no record.
#[derive(Debug, Clone, Default)]
pub struct FakeChain {
    state: Arc<RwLock<ChainState>>,
    calls: Arc<Mutex<Vec<ChainCall>>>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the balance of `address` in lamports.
    pub fn with_balance(self, address: &str, lamports: u64) -> Self {
        self.state
            .write()
            .balances
            .insert(Address::new(address), lamports);
        self
    }

    /// Add a transaction with the given account keys. The signature is
    /// appended to the signature list of every key.
    pub fn with_transaction(self, signature: &str, keys: &[&str]) -> Self {
        {
            let mut state = self.state.write();
            let signature = Signature::new(signature);
            let keys: Vec<Address> = keys.iter().map(|k| Address::new(*k)).collect();
            for key in &keys {
                state
                    .signatures
                    .entry(key.clone())
                    .or_default()
                    .push(signature.clone());
            }
            state.transactions.insert(signature, keys);
        }
        self
    }

    /// List `signature` for `address` without recording the transaction,
    /// so the node reports no record of it.
    pub fn with_dangling_signature(self, address: &str, signature: &str) -> Self {
        self.state
            .write()
            .signatures
            .entry(Address::new(address))
            .or_default()
            .push(Signature::new(signature));
        self
    }

    /// Make every balance read for `address` fail.
    pub fn fail_balance(self, address: &str) -> Self {
        self.state
            .write()
            .failing_balances
            .insert(Address::new(address));
        self
    }

    /// Make every signature listing for `address` fail.
    pub fn fail_signatures(self, address: &str) -> Self {
        self.state
            .write()
            .failing_signatures
            .insert(Address::new(address));
        self
    }

    /// Make every detail read for `signature` fail.
    pub fn fail_transaction(self, signature: &str) -> Self {
        self.state
            .write()
            .failing_transactions
            .insert(Signature::new(signature));
        self
    }

    /// Make balance reads for `address` never complete.
    pub fn hang_on(self, address: &str) -> Self {
        self.state.write().hanging.insert(Address::new(address));
        self
    }

    /// Make detail reads for `signature` never complete.
    pub fn hang_on_transaction(self, signature: &str) -> Self {
        self.state
            .write()
            .hanging_transactions
            .insert(Signature::new(signature));
        self
    }

    /// Let balance reads for an address, or detail reads for a signature,
    /// named `key` complete again.
    pub fn release(&self, key: &str) {
        let mut state = self.state.write();
        state.hanging.remove(&Address::new(key));
        state.hanging_transactions.remove(&Signature::new(key));
    }

    /// Every read issued so far, oldest first.
    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().clone()
    }

    /// Reads that mention `address` (balance or signature listing).
    pub fn calls_for(&self, address: &str) -> usize {
        let address = Address::new(address);
        self.calls
            .lock()
            .iter()
            .filter(|call| match call {
                ChainCall::Balance(a) | ChainCall::Signatures(a) => *a == address,
                ChainCall::Transaction(_) => false,
            })
            .count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    fn exhausted(method: &str) -> RpcError {
        RpcError::Exhausted {
            method: method.to_string(),
            attempts: 5,
            last: Box::new(RpcError::Transport("connection refused".into())),
        }
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn balance(&self, address: &Address) -> Result<u64, RpcError> {
        self.calls.lock().push(ChainCall::Balance(address.clone()));

        let hangs = self.state.read().hanging.contains(address);
        if hangs {
            std::future::pending::<()>().await;
        }

        let state = self.state.read();
        if state.failing_balances.contains(address) {
            return Err(Self::exhausted("getBalance"));
        }
        Ok(state.balances.get(address).copied().unwrap_or(0))
    }

    async fn signatures(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<Signature>, RpcError> {
        self.calls.lock().push(ChainCall::Signatures(address.clone()));

        let state = self.state.read();
        if state.failing_signatures.contains(address) {
            return Err(Self::exhausted("getSignaturesForAddress"));
        }
        let mut signatures = state.signatures.get(address).cloned().unwrap_or_default();
        signatures.truncate(limit);
        Ok(signatures)
    }

    async fn account_keys(&self, signature: &Signature) -> Result<Option<Vec<Address>>, RpcError> {
        self.calls
            .lock()
            .push(ChainCall::Transaction(signature.clone()));

        let hangs = self.state.read().hanging_transactions.contains(signature);
        if hangs {
            std::future::pending::<()>().await;
        }

        let state = self.state.read();
        if state.failing_transactions.contains(signature) {
            return Err(Self::exhausted("getTransaction"));
        }
        Ok(state.transactions.get(signature).cloned())
    }
}
