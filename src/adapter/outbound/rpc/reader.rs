//! [`ChainReader`] over Solana JSON-RPC.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::client::RemoteCallClient;
use super::dto::{AccountKey, BalanceResult, SignatureInfo, TransactionResult};
use crate::domain::{Address, Signature};
use crate::error::RpcError;
use crate::port::outbound::chain::ChainReader;
use crate::port::outbound::transport::RpcTransport;

/// Reads balances, signature lists and transaction account keys.
pub struct SolanaReader<T: RpcTransport> {
    client: RemoteCallClient<T>,
}

impl<T: RpcTransport> SolanaReader<T> {
    #[must_use]
    pub fn new(client: RemoteCallClient<T>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &RemoteCallClient<T> {
        &self.client
    }
}

fn decode<R: DeserializeOwned>(method: &str, value: Value) -> Result<R, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::Malformed(format!("{method}: {e}")))
}

#[async_trait]
impl<T: RpcTransport> ChainReader for SolanaReader<T> {
    async fn balance(&self, address: &Address) -> Result<u64, RpcError> {
        let result = self
            .client
            .call("getBalance", json!([address.as_str()]))
            .await?;
        let balance: BalanceResult = decode("getBalance", result)?;
        Ok(balance.value)
    }

    async fn signatures(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<Signature>, RpcError> {
        let result = self
            .client
            .call(
                "getSignaturesForAddress",
                json!([address.as_str(), { "limit": limit }]),
            )
            .await?;
        let infos: Vec<SignatureInfo> = decode("getSignaturesForAddress", result)?;
        Ok(infos.into_iter().map(|i| Signature::new(i.signature)).collect())
    }

    async fn account_keys(&self, signature: &Signature) -> Result<Option<Vec<Address>>, RpcError> {
        let result = self
            .client
            .call(
                "getTransaction",
                json!([
                    signature.as_str(),
                    { "encoding": "jsonParsed", "maxSupportedTransactionVersion": 0 }
                ]),
            )
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let tx: TransactionResult = decode("getTransaction", result)?;
        Ok(Some(
            tx.transaction
                .message
                .account_keys
                .iter()
                .map(AccountKey::pubkey)
                .map(Address::new)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::transport::TransportResponse;
    use crate::testkit::config;
    use crate::testkit::rpc::ScriptedTransport;

    fn reader_with(result: Value) -> SolanaReader<ScriptedTransport> {
        let transport = ScriptedTransport::new();
        transport.push_response(TransportResponse::new(
            200,
            json!([{"jsonrpc": "2.0", "id": 1, "result": result}]).to_string(),
        ));
        SolanaReader::new(RemoteCallClient::new(transport, &config::rpc(&["https://a"])))
    }

    #[tokio::test]
    async fn balance_reads_lamports() {
        let reader = reader_with(json!({"context": {"slot": 9}, "value": 2_500_000_000u64}));
        assert_eq!(reader.balance(&Address::new("a")).await, Ok(2_500_000_000));
    }

    #[tokio::test]
    async fn signatures_request_carries_limit() {
        let reader = reader_with(json!([
            {"signature": "s1", "slot": 3, "err": null},
            {"signature": "s2", "slot": 2, "err": null}
        ]));
        let sigs = reader.signatures(&Address::new("a"), 25).await.unwrap();

        assert_eq!(sigs, vec![Signature::new("s1"), Signature::new("s2")]);
        let sent = reader.client().transport().requests();
        assert_eq!(sent[0].1[0]["params"][1]["limit"], 25);
    }

    #[tokio::test]
    async fn missing_transaction_yields_none() {
        let reader = reader_with(Value::Null);
        assert_eq!(reader.account_keys(&Signature::new("s")).await, Ok(None));
    }

    #[tokio::test]
    async fn balance_without_value_is_malformed() {
        let reader = reader_with(json!({"context": {}}));
        assert!(matches!(
            reader.balance(&Address::new("a")).await,
            Err(RpcError::Malformed(_))
        ));
    }
}
