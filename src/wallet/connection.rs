// Connection acquisition and the read/sign handles derived from it
//
// A Connection is only handed out after the wallet reports the required
// chain id. Handles are cheap (an Arc and an address) and are rebuilt for
// every operation rather than cached.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{wait_for_receipt, WalletProvider};
use crate::config::NetworkConfig;
use crate::error::{Result, WhitelistError};
use crate::rpc::{TransactionReceipt, TransactionRequest};
use crate::ui::Alert;

/// The chain a flow insists on, and how to name it to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredNetwork {
    pub chain_id: u64,
    pub name: String,
}

impl RequiredNetwork {
    pub fn new(chain_id: u64, name: impl Into<String>) -> Self {
        Self {
            chain_id,
            name: name.into(),
        }
    }

    pub fn from_config(key: &str, network: &NetworkConfig) -> Self {
        Self::new(network.chain_id, network.label(key))
    }

    fn switch_prompt(&self) -> String {
        format!("Change to the {} test network", self.name)
    }
}

/// A wallet session verified to be on the required chain.
pub struct Connection {
    wallet: Arc<dyn WalletProvider>,
    chain_id: u64,
    accounts: Vec<Address>,
}

impl Connection {
    /// Ask the wallet for access, then check its chain.
    ///
    /// On a chain mismatch the user is alerted and `WrongNetwork` is returned;
    /// nothing else is sent to the wallet.
    pub async fn establish(
        wallet: Arc<dyn WalletProvider>,
        required: &RequiredNetwork,
        alert: &dyn Alert,
    ) -> Result<Self> {
        let accounts = wallet.request_accounts().await?;
        let chain_id = wallet.chain_id().await?;

        if chain_id != required.chain_id {
            alert.alert(&required.switch_prompt());
            return Err(WhitelistError::WrongNetwork {
                expected: required.chain_id,
                actual: chain_id,
            });
        }

        tracing::debug!(
            wallet = wallet.name(),
            chain_id,
            accounts = accounts.len(),
            "Wallet connected"
        );

        Ok(Self {
            wallet,
            chain_id,
            accounts,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Read-only handle.
    pub fn provider(&self) -> Provider {
        Provider {
            wallet: Arc::clone(&self.wallet),
        }
    }

    /// Signing handle for the wallet's selected (first) account.
    pub fn signer(&self) -> Result<Signer> {
        let address = *self.accounts.first().ok_or(WhitelistError::NoAccounts)?;
        Ok(Signer {
            provider: self.provider(),
            address,
        })
    }
}

/// Connect and return a read-only handle.
pub async fn connect_provider(
    wallet: Arc<dyn WalletProvider>,
    required: &RequiredNetwork,
    alert: &dyn Alert,
) -> Result<Provider> {
    Ok(Connection::establish(wallet, required, alert).await?.provider())
}

/// Connect and return a signing handle.
pub async fn connect_signer(
    wallet: Arc<dyn WalletProvider>,
    required: &RequiredNetwork,
    alert: &dyn Alert,
) -> Result<Signer> {
    Connection::establish(wallet, required, alert).await?.signer()
}

/// Anything that can run read-only contract calls.
#[async_trait]
pub trait ReadHandle: Send + Sync {
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes>;
}

/// Read-only handle to chain state.
#[derive(Clone)]
pub struct Provider {
    wallet: Arc<dyn WalletProvider>,
}

impl Provider {
    pub fn wallet(&self) -> &dyn WalletProvider {
        self.wallet.as_ref()
    }
}

#[async_trait]
impl ReadHandle for Provider {
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.wallet.call(&tx).await
    }
}

/// Handle that can also authorise state-changing transactions.
#[derive(Clone)]
pub struct Signer {
    provider: Provider,
    address: Address,
}

impl Signer {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Sign and broadcast from this signer's account.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        let tx = tx.with_from(self.address);
        let hash = self.provider.wallet.send_transaction(&tx).await?;
        tracing::info!(tx = %hash, from = %self.address, "Transaction submitted");
        Ok(hash)
    }

    /// Block until `hash` is mined.
    pub async fn confirm(&self, hash: B256, poll_interval: Duration) -> Result<TransactionReceipt> {
        wait_for_receipt(self.provider.wallet(), hash, poll_interval).await
    }
}

#[async_trait]
impl ReadHandle for Signer {
    /// Reads through a signer carry its address as `from`.
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.provider.call(tx.with_from(self.address)).await
    }
}
