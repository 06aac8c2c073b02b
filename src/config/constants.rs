// Project-wide constants
//
// Centralised here so chain ids and endpoint defaults have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Network selected when neither the config file nor the environment names one.
pub const DEFAULT_NETWORK: &str = "goerli";

/// Chain id the whitelist contract lives on (Goerli testnet).
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Display name used in the wrong-network alert.
pub const GOERLI_DISPLAY_NAME: &str = "Goerli";

/// Default wallet endpoint.
///
/// Desktop wallets that expose an EIP-1193 provider over HTTP listen here
/// (Frame uses 1248). Point `rpc_url` at a dev node for local testing.
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

/// How often to poll for a transaction receipt.
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 2000;

/// Constructor argument for a fresh deployment.
pub const DEFAULT_MAX_WHITELISTED_ADDRESSES: u8 = 10;

/// Contract name looked up in a Hardhat artifacts directory.
pub const DEFAULT_CONTRACT_NAME: &str = "Whitelist";

/// Default artifacts location, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Config directory under the user's home.
pub const CONFIG_DIR_NAME: &str = ".whitelist";

pub const ENV_NETWORK: &str = "WHITELIST_NETWORK";
pub const ENV_RPC_URL: &str = "WHITELIST_RPC_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "WHITELIST_CONTRACT_ADDRESS";
