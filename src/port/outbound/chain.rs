//! Read access to the chain.

use async_trait::async_trait;

use crate::domain::{Address, Signature};
use crate::error::RpcError;

/// The three reads the ingestion pipeline needs.
///
/// Errors mean "no data" to the caller; they are never fatal for a run.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Balance in the smallest native unit.
    async fn balance(&self, address: &Address) -> Result<u64, RpcError>;

    /// Most recent signatures involving `address`, newest first.
    async fn signatures(&self, address: &Address, limit: usize) -> Result<Vec<Signature>, RpcError>;

    /// Account keys of a transaction, `None` if the node has no record of it.
    async fn account_keys(&self, signature: &Signature) -> Result<Option<Vec<Address>>, RpcError>;
}
