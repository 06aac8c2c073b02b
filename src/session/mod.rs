// Wallet session flows
//
// Each flow reconnects to the wallet, builds a fresh contract binding, runs
// its remote calls in order and copies the outcome into `UiState`. Flows
// never return errors: failures are logged and the state keeps its last
// known values. The fallible building blocks are public for callers (the
// CLI's `count` and `check`) that want the error.

use alloy_primitives::Address;
use std::sync::Arc;
use std::time::Duration;

use crate::config::constants::DEFAULT_RECEIPT_POLL_INTERVAL_MS;
use crate::config::Config;
use crate::contract::WhitelistContract;
use crate::error::{Result, WhitelistError};
use crate::rpc::TransactionReceipt;
use crate::ui::Alert;
use crate::wallet::{connect_provider, connect_signer, Provider, RequiredNetwork, Signer, WalletProvider};

/// Last known remote state, as the view sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// A wallet session on the right chain has been established
    pub wallet_connected: bool,
    /// The signer's address is a member
    pub joined_whitelist: bool,
    /// A join transaction is in flight
    pub loading: bool,
    /// Members so far
    pub num_whitelisted: u8,
    /// Contract capacity, when the contract exposes it
    pub max_whitelisted: Option<u8>,
}

pub struct WhitelistSession {
    wallet: Arc<dyn WalletProvider>,
    network: RequiredNetwork,
    contract: Address,
    alert: Arc<dyn Alert>,
    poll_interval: Duration,
    state: UiState,
}

impl WhitelistSession {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        network: RequiredNetwork,
        contract: Address,
        alert: Arc<dyn Alert>,
    ) -> Self {
        Self {
            wallet,
            network,
            contract,
            alert,
            poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
            state: UiState::default(),
        }
    }

    /// Build from loaded configuration. Fails if no contract address is set.
    pub fn from_config(
        config: &Config,
        wallet: Arc<dyn WalletProvider>,
        alert: Arc<dyn Alert>,
    ) -> anyhow::Result<Self> {
        let network = RequiredNetwork::from_config(&config.network, config.active_network()?);
        let contract = config.require_contract_address()?;
        Ok(Self::new(wallet, network, contract, alert)
            .with_poll_interval(config.receipt_poll_interval()))
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    async fn provider(&self) -> Result<Provider> {
        connect_provider(Arc::clone(&self.wallet), &self.network, self.alert.as_ref()).await
    }

    async fn signer(&self) -> Result<Signer> {
        connect_signer(Arc::clone(&self.wallet), &self.network, self.alert.as_ref()).await
    }

    // ---------------------------------------------------------------------
    // Fallible operations
    // ---------------------------------------------------------------------

    /// Number of members, through a read-only handle.
    pub async fn fetch_member_count(&self) -> Result<u8> {
        let provider = self.provider().await?;
        WhitelistContract::new(self.contract, &provider)
            .num_addresses_whitelisted()
            .await
    }

    /// Contract capacity, through a read-only handle.
    pub async fn fetch_capacity(&self) -> Result<u8> {
        let provider = self.provider().await?;
        WhitelistContract::new(self.contract, &provider)
            .max_whitelisted_addresses()
            .await
    }

    /// Whether `account` (default: the signer's own address) is a member.
    ///
    /// Goes through the signer even though it only reads.
    pub async fn fetch_membership(&self, account: Option<Address>) -> Result<bool> {
        let signer = self.signer().await?;
        let account = account.unwrap_or_else(|| signer.address());
        WhitelistContract::new(self.contract, &signer)
            .whitelisted_addresses(account)
            .await
    }

    // ---------------------------------------------------------------------
    // Flows
    // ---------------------------------------------------------------------

    /// Connect, then refresh membership, count and capacity.
    ///
    /// Membership and count reconnect like any other flow; the capacity read
    /// reuses the connection made here.
    pub async fn connect_wallet(&mut self) {
        match self.provider().await {
            Ok(provider) => {
                self.state.wallet_connected = true;
                self.check_if_address_in_whitelist().await;
                self.get_num_of_whitelisted().await;
                self.read_capacity(&provider).await;
            }
            Err(e) => log_failure("connect wallet", &e),
        }
    }

    pub async fn check_if_address_in_whitelist(&mut self) {
        match self.fetch_membership(None).await {
            Ok(joined) => self.state.joined_whitelist = joined,
            Err(e) => log_failure("check whitelist membership", &e),
        }
    }

    pub async fn get_num_of_whitelisted(&mut self) {
        match self.fetch_member_count().await {
            Ok(count) => self.state.num_whitelisted = count,
            Err(e) => log_failure("read whitelist count", &e),
        }
    }

    /// Capacity is informational; contracts without the getter just leave it unset.
    pub async fn get_max_whitelisted(&mut self) {
        match self.provider().await {
            Ok(provider) => self.read_capacity(&provider).await,
            Err(e) => tracing::debug!(error = %e, "Whitelist capacity unavailable"),
        }
    }

    async fn read_capacity(&mut self, provider: &Provider) {
        match WhitelistContract::new(self.contract, provider)
            .max_whitelisted_addresses()
            .await
        {
            Ok(max) => self.state.max_whitelisted = Some(max),
            Err(e) => tracing::debug!(error = %e, "Whitelist capacity unavailable"),
        }
    }

    /// Submit the join transaction, wait for it to be mined, then refresh.
    ///
    /// `joined_whitelist` only flips once a successful receipt is in hand.
    pub async fn add_address_to_whitelist(&mut self) {
        match self.join().await {
            Ok(receipt) => {
                tracing::info!(
                    tx = %receipt.transaction_hash,
                    block = ?receipt.block(),
                    "Joined the whitelist"
                );
                self.get_num_of_whitelisted().await;
                self.state.joined_whitelist = true;
                self.state.loading = false;
            }
            Err(e) => {
                self.state.loading = false;
                log_failure("join whitelist", &e);
            }
        }
    }

    async fn join(&mut self) -> Result<TransactionReceipt> {
        let signer = self.signer().await?;
        let hash = WhitelistContract::new(self.contract, &signer)
            .add_address_to_whitelist()
            .await?;

        self.state.loading = true;

        let receipt = signer.confirm(hash, self.poll_interval).await?;
        if !receipt.succeeded() {
            return Err(WhitelistError::Reverted(hash));
        }
        Ok(receipt)
    }
}

fn log_failure(action: &str, error: &WhitelistError) {
    if error.is_wrong_network() {
        tracing::warn!(%error, "Could not {}", action);
    } else {
        tracing::error!(%error, "Could not {}", action);
    }
}
