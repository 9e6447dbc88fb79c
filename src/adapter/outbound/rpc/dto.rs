//! JSON-RPC 2.0 envelopes and Solana result payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// One request inside a batch.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a Value,
}

impl<'a> RpcRequest<'a> {
    #[must_use]
    pub fn new(id: u64, method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

/// Pull the `result` for request `id` out of a response body.
///
/// Accepts a batch array or a single response object. A present but null
/// `result` is returned as [`Value::Null`].
pub fn extract_result(body: &str, id: u64) -> Result<Value, RpcError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|e| RpcError::Malformed(format!("invalid JSON: {e}")))?;

    let response = match parsed {
        Value::Array(items) => {
            let matching = items
                .iter()
                .position(|item| item.get("id").and_then(Value::as_u64) == Some(id))
                .unwrap_or(0);
            items
                .into_iter()
                .nth(matching)
                .ok_or_else(|| RpcError::Malformed("empty batch response".into()))?
        }
        other => other,
    };

    let Value::Object(mut fields) = response else {
        return Err(RpcError::Malformed("response is not an object".into()));
    };

    if let Some(error) = fields.remove("error") {
        let error: ErrorObject = serde_json::from_value(error)
            .map_err(|e| RpcError::Malformed(format!("invalid error object: {e}")))?;
        return Err(RpcError::Remote {
            code: error.code,
            message: error.message,
        });
    }

    fields
        .remove("result")
        .ok_or_else(|| RpcError::Malformed("missing result".into()))
}

/// `getBalance` result.
#[derive(Debug, Deserialize)]
pub struct BalanceResult {
    pub value: u64,
}

/// One entry of a `getSignaturesForAddress` result.
#[derive(Debug, Deserialize)]
pub struct SignatureInfo {
    pub signature: String,
}

/// `getTransaction` result, reduced to the account keys.
#[derive(Debug, Deserialize)]
pub struct TransactionResult {
    pub transaction: TransactionEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct TransactionEnvelope {
    pub message: TransactionMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    pub account_keys: Vec<AccountKey>,
}

/// `jsonParsed` encoding yields objects, `json` encoding plain strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AccountKey {
    Parsed { pubkey: String },
    Raw(String),
}

impl AccountKey {
    #[must_use]
    pub fn pubkey(&self) -> &str {
        match self {
            Self::Parsed { pubkey } => pubkey,
            Self::Raw(key) => key,
        }
    }
}
