// Whitelist contract binding
//
// Fixed interface, caller-supplied address and handle. Read methods work
// through any `ReadHandle`; joining needs a `Signer`.

use alloy_primitives::{Address, B256};
use alloy_sol_types::{sol, SolCall};

use crate::error::Result;
use crate::rpc::TransactionRequest;
use crate::wallet::{ReadHandle, Signer};

sol! {
    #[derive(Debug, PartialEq)]
    interface IWhitelist {
        /// Capacity fixed at deployment
        function maxWhitelistedAddresses() external view returns (uint8 max);

        /// Public getter of the membership mapping
        function whitelistedAddresses(address account) external view returns (bool joined);

        /// Number of addresses that have joined so far
        function numAddressesWhitelisted() external view returns (uint8 count);

        /// Add the caller; reverts when already joined or full
        function addAddressToWhitelist() external;
    }
}

pub struct WhitelistContract<'a, H> {
    address: Address,
    handle: &'a H,
}

impl<'a, H> WhitelistContract<'a, H> {
    pub fn new(address: Address, handle: &'a H) -> Self {
        Self { address, handle }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl<'a, H: ReadHandle> WhitelistContract<'a, H> {
    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let output = self
            .handle
            .call(TransactionRequest::call(self.address, call.abi_encode()))
            .await?;
        Ok(C::abi_decode_returns(&output, true)?)
    }

    pub async fn num_addresses_whitelisted(&self) -> Result<u8> {
        Ok(self
            .read(IWhitelist::numAddressesWhitelistedCall {})
            .await?
            .count)
    }

    pub async fn whitelisted_addresses(&self, account: Address) -> Result<bool> {
        Ok(self
            .read(IWhitelist::whitelistedAddressesCall { account })
            .await?
            .joined)
    }

    pub async fn max_whitelisted_addresses(&self) -> Result<u8> {
        Ok(self
            .read(IWhitelist::maxWhitelistedAddressesCall {})
            .await?
            .max)
    }
}

impl<'a> WhitelistContract<'a, Signer> {
    /// Submit the join transaction. Returns as soon as the wallet broadcasts it.
    pub async fn add_address_to_whitelist(&self) -> Result<B256> {
        let call = IWhitelist::addAddressToWhitelistCall {};
        self.handle
            .send_transaction(TransactionRequest::call(self.address, call.abi_encode()))
            .await
    }
}
