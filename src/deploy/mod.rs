// One-shot deployment of the whitelist contract
//
// Load artifact -> connect signer -> send creation tx -> wait for receipt ->
// print address. Not idempotent: every run creates a new instance.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Result, WhitelistError, EXIT_FAILURE, EXIT_SUCCESS};
use crate::rpc::TransactionRequest;
use crate::ui::Alert;
use crate::wallet::{connect_signer, RequiredNetwork, Signer, WalletProvider};

mod artifact;

pub use artifact::Artifact;

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
}

/// Creation code for one contract, ready to be combined with constructor arguments.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    bytecode: Bytes,
}

impl ContractFactory {
    /// Build a factory for the whitelist contract from its artifact.
    ///
    /// The artifact's constructor must take exactly one `uint8` (the capacity).
    pub fn from_artifact(artifact: &Artifact) -> Result<Self> {
        let inputs = artifact.constructor_inputs();
        if inputs != ["uint8"] {
            return Err(WhitelistError::Artifact(format!(
                "{} constructor takes ({}), expected (uint8)",
                artifact.contract_name,
                inputs.join(", ")
            )));
        }

        Ok(Self {
            name: artifact.contract_name.clone(),
            bytecode: artifact.creation_code()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation transaction: bytecode followed by the ABI-encoded capacity.
    pub fn deploy_transaction(&self, max_whitelisted_addresses: u8) -> TransactionRequest {
        // A single static argument encodes as one 32-byte word
        let args = U256::from(max_whitelisted_addresses).abi_encode();

        let mut data = Vec::with_capacity(self.bytecode.len() + args.len());
        data.extend_from_slice(&self.bytecode);
        data.extend_from_slice(&args);

        TransactionRequest {
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Send the creation transaction and wait until it is mined.
    pub async fn deploy(
        &self,
        signer: &Signer,
        max_whitelisted_addresses: u8,
        poll_interval: Duration,
    ) -> Result<Deployment> {
        let hash = signer
            .send_transaction(self.deploy_transaction(max_whitelisted_addresses))
            .await?;

        tracing::info!(contract = %self.name, tx = %hash, "Waiting for deployment to be mined");

        let receipt = signer.confirm(hash, poll_interval).await?;
        if !receipt.succeeded() {
            return Err(WhitelistError::Reverted(hash));
        }
        let address = receipt
            .contract_address
            .ok_or(WhitelistError::NoContractAddress(hash))?;

        Ok(Deployment {
            address,
            transaction_hash: hash,
            block_number: receipt.block(),
        })
    }
}

/// Per-run overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub artifact: Option<PathBuf>,
    pub max_whitelisted_addresses: Option<u8>,
}

/// The whole deployment procedure.
pub async fn run_deploy(
    config: &Config,
    options: &DeployOptions,
    wallet: Arc<dyn WalletProvider>,
    alert: &dyn Alert,
) -> Result<Deployment> {
    let artifact_root = options.artifact.as_ref().unwrap_or(&config.deploy.artifact);
    let artifact_path = Artifact::resolve(artifact_root, &config.deploy.contract_name)?;
    let factory = ContractFactory::from_artifact(&Artifact::load(&artifact_path)?)?;

    let network_config = config
        .active_network()
        .map_err(|e| WhitelistError::Config(e.to_string()))?;
    let required = RequiredNetwork::from_config(&config.network, network_config);
    let signer = connect_signer(wallet, &required, alert).await?;

    let max = options
        .max_whitelisted_addresses
        .unwrap_or(config.deploy.max_whitelisted_addresses);

    tracing::info!(
        contract = factory.name(),
        network = %config.network,
        deployer = %signer.address(),
        max_whitelisted_addresses = max,
        "Deploying"
    );

    factory
        .deploy(&signer, max, config.receipt_poll_interval())
        .await
}

/// Script entry: run the deployment, report, and return the process exit code.
///
/// Success prints the address to `out` and yields 0; any failure prints the
/// error to `err` and yields 1.
pub async fn run_script<O: Write, E: Write>(
    config: &Config,
    options: &DeployOptions,
    wallet: Arc<dyn WalletProvider>,
    alert: &dyn Alert,
    out: &mut O,
    err: &mut E,
) -> i32 {
    match run_deploy(config, options, wallet, alert).await {
        Ok(deployment) => {
            if writeln!(out, "Whitelist Contract Address: {}", deployment.address).is_err() {
                return EXIT_FAILURE;
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            EXIT_FAILURE
        }
    }
}
