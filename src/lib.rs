// Whitelist - join an on-chain whitelist from a wallet, deploy the contract
// Library exports

pub mod config;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod rpc;
pub mod session;
pub mod ui;
pub mod wallet;

pub use error::{Result, WhitelistError};
