// Wallet abstraction
//
// The wallet is the only thing that holds keys. This crate asks it for
// accounts, the chain it is on, read-only calls, and signed transactions.
// Everything above this module sees a `WalletProvider`, so tests swap in an
// in-memory wallet and the binary uses a JSON-RPC endpoint.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;

use crate::error::Result;
use crate::rpc::{TransactionReceipt, TransactionRequest};

mod connection;
mod receipt;
mod rpc_wallet;

pub use connection::{connect_provider, connect_signer, Connection, Provider, ReadHandle, RequiredNetwork, Signer};
pub use receipt::wait_for_receipt;
pub use rpc_wallet::RpcWallet;

/// Trait for wallet backends
///
/// Mirrors the EIP-1193 methods the whitelist flows need.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to expose its accounts (may prompt the user).
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Chain id the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64>;

    /// Execute a read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes>;

    /// Have the wallet sign and broadcast a transaction. Returns its hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256>;

    /// Receipt for a mined transaction, `None` while still pending.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;

    /// Short label for logs (endpoint URL or backend name).
    fn name(&self) -> &str;
}
