// JSON-RPC 2.0 request/response types and the Ethereum payloads we exchange

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WhitelistError;

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Error object carried in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Split into the result value or a typed error.
    ///
    /// A response with neither field is treated as a `null` result, which is
    /// how nodes answer a receipt query for a pending transaction.
    pub fn into_result(self) -> Result<Value, WhitelistError> {
        if let Some(err) = self.error {
            let message = match err.data {
                Some(Value::String(data)) => format!("{} ({})", err.message, data),
                _ => err.message,
            };
            return Err(WhitelistError::Rpc {
                code: err.code,
                message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// Call/transaction object for `eth_call` and `eth_sendTransaction`.
///
/// A request with no `to` is a contract creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl TransactionRequest {
    /// Read-only call against `to`.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to: Some(to),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

/// The subset of a mined transaction's receipt this client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// 1 = success, 0 = reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| s == U64::from(1))
    }

    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// Parse a hex quantity such as `"0x5"`.
pub fn parse_quantity(raw: &str) -> Result<u64, WhitelistError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| WhitelistError::Decode(format!("quantity without 0x prefix: {raw}")))?;
    if digits.is_empty() {
        return Err(WhitelistError::Decode("empty quantity".to_string()));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| WhitelistError::Decode(format!("bad quantity {raw}: {e}")))
}
