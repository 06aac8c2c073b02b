// Shared test doubles: an in-memory wallet that runs the whitelist contract

#![allow(dead_code)]

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use whitelist::contract::IWhitelist;
use whitelist::rpc::{TransactionReceipt, TransactionRequest};
use whitelist::ui::Alert;
use whitelist::wallet::WalletProvider;
use whitelist::WhitelistError;

pub const GOERLI: u64 = 5;

pub fn contract_address() -> Address {
    Address::repeat_byte(0x5f)
}

pub fn user() -> Address {
    Address::repeat_byte(0xaa)
}

pub fn deployed_address() -> Address {
    Address::repeat_byte(0xcc)
}

/// Mutable chain state behind the fake wallet.
#[derive(Default)]
pub struct FakeChain {
    pub members: HashSet<Address>,
    pub max: u8,
    /// Every eth_call, in order
    pub calls: Vec<TransactionRequest>,
    /// Every eth_sendTransaction, in order
    pub sent: Vec<TransactionRequest>,
    pub receipts: HashMap<B256, TransactionReceipt>,
    /// Receipt lookups answer `None` this many times first
    pub pending_polls: u32,
    pub receipt_polls: u32,
    pub revert_next: bool,
    pub fail_reads: bool,
    pub omit_contract_address: bool,
    pub account_requests: u32,
}

pub struct FakeWallet {
    chain_id: u64,
    accounts: Vec<Address>,
    chain: Mutex<FakeChain>,
}

impl FakeWallet {
    pub fn new(chain_id: u64, accounts: Vec<Address>) -> Arc<Self> {
        Arc::new(Self {
            chain_id,
            accounts,
            chain: Mutex::new(FakeChain {
                max: 10,
                ..Default::default()
            }),
        })
    }

    /// Goerli wallet exposing `user()`.
    pub fn goerli() -> Arc<Self> {
        Self::new(GOERLI, vec![user()])
    }

    pub fn chain(&self) -> MutexGuard<'_, FakeChain> {
        self.chain.lock().unwrap()
    }

    /// True if the contract was never touched (no reads, no transactions).
    pub fn untouched(&self) -> bool {
        let chain = self.chain();
        chain.calls.is_empty() && chain.sent.is_empty()
    }
}

fn receipt(hash: B256, ok: bool, contract_address: Option<Address>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: hash,
        block_number: Some(U64::from(100)),
        status: Some(U64::from(u8::from(ok))),
        contract_address,
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> whitelist::Result<Vec<Address>> {
        self.chain().account_requests += 1;
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> whitelist::Result<u64> {
        Ok(self.chain_id)
    }

    async fn call(&self, tx: &TransactionRequest) -> whitelist::Result<Bytes> {
        let mut chain = self.chain();
        chain.calls.push(tx.clone());

        if chain.fail_reads {
            return Err(WhitelistError::Rpc {
                code: -32000,
                message: "header not found".to_string(),
            });
        }
        if tx.to != Some(contract_address()) {
            // No code at that address
            return Ok(Bytes::new());
        }

        let data = tx.data.clone().unwrap_or_default();
        let selector = &data[..4.min(data.len())];

        let output = if selector == IWhitelist::numAddressesWhitelistedCall::SELECTOR {
            U256::from(chain.members.len()).abi_encode()
        } else if selector == IWhitelist::maxWhitelistedAddressesCall::SELECTOR {
            U256::from(chain.max).abi_encode()
        } else if selector == IWhitelist::whitelistedAddressesCall::SELECTOR {
            let query = IWhitelist::whitelistedAddressesCall::abi_decode(&data, true)?;
            chain.members.contains(&query.account).abi_encode()
        } else {
            return Err(WhitelistError::Rpc {
                code: 3,
                message: "execution reverted".to_string(),
            });
        };

        Ok(output.into())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> whitelist::Result<B256> {
        let mut chain = self.chain();
        chain.sent.push(tx.clone());
        let hash = B256::with_last_byte(chain.sent.len() as u8);

        let revert = std::mem::take(&mut chain.revert_next);

        let result = if tx.is_create() {
            let address = (!chain.omit_contract_address).then(deployed_address);
            receipt(hash, !revert, if revert { None } else { address })
        } else {
            let data = tx.data.clone().unwrap_or_default();
            let is_join = data[..] == IWhitelist::addAddressToWhitelistCall::SELECTOR;
            let from = tx.from.unwrap_or_default();
            let full = chain.members.len() >= chain.max as usize;
            let ok = is_join && !revert && !full && !chain.members.contains(&from);
            if ok {
                chain.members.insert(from);
            }
            receipt(hash, ok, None)
        };

        chain.receipts.insert(hash, result);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: B256) -> whitelist::Result<Option<TransactionReceipt>> {
        let mut chain = self.chain();
        chain.receipt_polls += 1;
        if chain.pending_polls > 0 {
            chain.pending_polls -= 1;
            return Ok(None);
        }
        Ok(chain.receipts.get(&hash).cloned())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Collects alerts instead of printing them.
#[derive(Default)]
pub struct RecordingAlert {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlert {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
