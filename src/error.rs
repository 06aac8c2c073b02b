// Error types for the whitelist client
//
// Two buckets matter to callers: the wallet sitting on the wrong network
// (user must switch and re-run), and everything else (logged, state left as-is).

use alloy_primitives::B256;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WhitelistError>;

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for any failure.
pub const EXIT_FAILURE: i32 = 1;

/// JSON-RPC "method not found".
pub const RPC_METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Error)]
pub enum WhitelistError {
    /// Wallet is connected to a different chain than the one configured.
    #[error("wrong network: expected chain id {expected}, wallet is on chain id {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// Wallet did not expose any account to sign with.
    #[error("wallet exposed no accounts")]
    NoAccounts,

    /// HTTP transport failure talking to the wallet endpoint.
    #[error("wallet transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON-RPC error object returned by the wallet or node.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response was well-formed JSON but not what the method promises.
    #[error("malformed rpc response: {0}")]
    Decode(String),

    /// ABI encoding or decoding failed.
    #[error("abi error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    /// Transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    Reverted(B256),

    /// Deployment receipt carried no contract address.
    #[error("deployment transaction {0} produced no contract address")]
    NoContractAddress(B256),

    /// Compiled contract artifact is missing or unusable.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Settings that cannot be used as given.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WhitelistError {
    /// True for the failure the user fixes by switching networks in the wallet.
    pub fn is_wrong_network(&self) -> bool {
        matches!(self, WhitelistError::WrongNetwork { .. })
    }

    pub fn is_method_not_found(&self) -> bool {
        matches!(self, WhitelistError::Rpc { code, .. } if *code == RPC_METHOD_NOT_FOUND)
    }
}
