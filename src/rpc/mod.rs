// JSON-RPC transport to the wallet endpoint

mod client;
pub mod types;

pub use client::RpcClient;
pub use types::{parse_quantity, TransactionReceipt, TransactionRequest};
