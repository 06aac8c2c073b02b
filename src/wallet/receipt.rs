// Waiting for a transaction to be mined

use alloy_primitives::B256;
use std::time::Duration;
use tokio::time::sleep;

use super::WalletProvider;
use crate::error::Result;
use crate::rpc::TransactionReceipt;

/// Poll for `hash`'s receipt until the node has one.
///
/// There is no deadline: a transaction that never mines blocks the caller,
/// the same as a wallet prompt nobody answers.
pub async fn wait_for_receipt(
    wallet: &dyn WalletProvider,
    hash: B256,
    poll_interval: Duration,
) -> Result<TransactionReceipt> {
    let mut polls: u32 = 0;

    loop {
        if let Some(receipt) = wallet.transaction_receipt(hash).await? {
            tracing::debug!(tx = %hash, polls, block = ?receipt.block(), "Transaction mined");
            return Ok(receipt);
        }

        polls += 1;
        tracing::debug!(tx = %hash, polls, "Transaction pending, waiting {:?}", poll_interval);
        sleep(poll_interval).await;
    }
}
