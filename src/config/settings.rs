// Configuration structs

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;

/// A chain the client can talk to through a wallet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Wallet (or node) JSON-RPC endpoint
    pub rpc_url: String,

    /// Chain id the wallet must report before any contract call
    pub chain_id: u64,

    /// Human name shown in the wrong-network alert (e.g. "Goerli")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl NetworkConfig {
    pub fn goerli() -> Self {
        Self {
            rpc_url: DEFAULT_WALLET_URL.to_string(),
            chain_id: GOERLI_CHAIN_ID,
            display_name: Some(GOERLI_DISPLAY_NAME.to_string()),
        }
    }

    /// Display name, falling back to the config key.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(key)
    }
}

/// Settings for the one-shot deployment flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Artifact JSON file, or a Hardhat `artifacts/` directory
    #[serde(default = "default_artifact")]
    pub artifact: PathBuf,

    /// Contract name to resolve inside an artifacts directory
    #[serde(default = "default_contract_name")]
    pub contract_name: String,

    /// Constructor argument: capacity of the whitelist
    #[serde(default = "default_max_whitelisted")]
    pub max_whitelisted_addresses: u8,
}

fn default_artifact() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACTS_DIR)
}

fn default_contract_name() -> String {
    DEFAULT_CONTRACT_NAME.to_string()
}

fn default_max_whitelisted() -> u8 {
    DEFAULT_MAX_WHITELISTED_ADDRESSES
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            artifact: default_artifact(),
            contract_name: default_contract_name(),
            max_whitelisted_addresses: default_max_whitelisted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Key into `networks` for the chain in use
    pub network: String,

    /// Known networks by name
    pub networks: HashMap<String, NetworkConfig>,

    /// Address of the deployed whitelist contract
    pub contract_address: Option<Address>,

    /// Receipt polling cadence while waiting for a transaction to be mined
    pub receipt_poll_interval_ms: u64,

    /// Per-request HTTP timeout for the wallet endpoint. Unset means wait
    /// as long as the wallet takes (prompts included).
    pub request_timeout_secs: Option<u64>,

    pub deploy: DeployConfig,
}

impl Default for Config {
    fn default() -> Self {
        let mut networks = HashMap::new();
        networks.insert(DEFAULT_NETWORK.to_string(), NetworkConfig::goerli());

        Self {
            network: DEFAULT_NETWORK.to_string(),
            networks,
            contract_address: None,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            request_timeout_secs: None,
            deploy: DeployConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        let Some(network) = self.networks.get(&self.network) else {
            let mut known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            known.sort_unstable();
            anyhow::bail!(
                "Unknown network '{}'. Configured networks: {}\n\n\
                 Add it to ~/{}/config.toml:\n  \
                 [networks.{}]\n  rpc_url = \"...\"\n  chain_id = ...",
                self.network,
                if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                },
                CONFIG_DIR_NAME,
                self.network
            );
        };

        if network.chain_id == 0 {
            anyhow::bail!("chain_id for network '{}' must be greater than 0", self.network);
        }

        if network.rpc_url.trim().is_empty() {
            anyhow::bail!("rpc_url for network '{}' is empty", self.network);
        }

        if self.receipt_poll_interval_ms == 0 {
            anyhow::bail!("receipt_poll_interval_ms must be greater than 0");
        }

        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be greater than 0 (omit it to wait indefinitely)");
        }

        Ok(())
    }

    /// The selected network. Only fails on an unvalidated config.
    pub fn active_network(&self) -> anyhow::Result<&NetworkConfig> {
        self.networks
            .get(&self.network)
            .ok_or_else(|| anyhow::anyhow!("Unknown network '{}'", self.network))
    }

    /// Contract address, or a config error telling the user how to set one.
    pub fn require_contract_address(&self) -> anyhow::Result<Address> {
        self.contract_address.ok_or_else(|| {
            anyhow::anyhow!(
                "No whitelist contract address configured.\n\n\
                 Deploy one with `whitelist deploy`, then set it via:\n  \
                 • contract_address = \"0x...\" in ~/{}/config.toml\n  \
                 • export {}=0x...\n  \
                 • --contract 0x...",
                CONFIG_DIR_NAME,
                ENV_CONTRACT_ADDRESS
            )
        })
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
