// Wallet backed by an EIP-1193 provider exposed over HTTP JSON-RPC

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::WalletProvider;
use crate::error::Result;
use crate::rpc::{parse_quantity, RpcClient, TransactionReceipt, TransactionRequest};

pub struct RpcWallet {
    rpc: RpcClient,
}

impl RpcWallet {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::new(url)?,
        })
    }

    /// Wallet whose requests fail after `timeout`. `None` waits indefinitely.
    pub fn with_timeout(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::with_timeout(url, timeout)?,
        })
    }

    pub fn from_client(rpc: RpcClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        match self.rpc.request("eth_requestAccounts", json!([])).await {
            // Dev nodes don't implement EIP-1102; their accounts are already unlocked
            Err(e) if e.is_method_not_found() => {
                tracing::debug!(wallet = self.rpc.url(), "eth_requestAccounts unsupported, using eth_accounts");
                self.rpc.request("eth_accounts", json!([])).await
            }
            other => other,
        }
    }

    async fn chain_id(&self) -> Result<u64> {
        let raw: String = self.rpc.request("eth_chainId", json!([])).await?;
        parse_quantity(&raw)
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        self.rpc.request("eth_call", json!([tx, "latest"])).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        self.rpc.request("eth_sendTransaction", json!([tx])).await
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        self.rpc
            .request("eth_getTransactionReceipt", json!([hash]))
            .await
    }

    fn name(&self) -> &str {
        self.rpc.url()
    }
}
