// Whitelist - join an on-chain whitelist from a wallet, deploy the contract
// Main entry point

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use whitelist::config::{load_config, Overrides};
use whitelist::deploy::{self, DeployOptions};
use whitelist::logging::init_logging;
use whitelist::session::WhitelistSession;
use whitelist::ui::{self, Alert, TerminalAlert};
use whitelist::wallet::{RpcWallet, WalletProvider};

#[derive(Parser)]
#[command(name = "whitelist")]
#[command(version, about = "Join the Crypto Devs whitelist from your wallet", long_about = None)]
struct Cli {
    /// Config file (default: ~/.whitelist/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Network to use, as named in the config's [networks] table
    #[arg(long, global = true)]
    network: Option<String>,

    /// Wallet JSON-RPC endpoint for the selected network
    #[arg(long, value_name = "URL", global = true)]
    rpc_url: Option<String>,

    /// Whitelist contract address
    #[arg(long, value_name = "ADDRESS", global = true)]
    contract: Option<Address>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Connect the wallet and show whitelist status (default)
    Status,
    /// Join the whitelist with the wallet's account
    Join,
    /// Print how many addresses have joined
    Count,
    /// Print whether an address has joined (default: your wallet's account)
    Check {
        address: Option<Address>,
    },
    /// Deploy a new whitelist contract
    Deploy {
        /// Artifact JSON file or Hardhat artifacts directory
        #[arg(long, value_name = "PATH")]
        artifact: Option<PathBuf>,

        /// Maximum number of whitelisted addresses
        #[arg(long = "max", value_name = "N")]
        max_whitelisted_addresses: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let overrides = Overrides {
        network: cli.network.clone(),
        rpc_url: cli.rpc_url.clone(),
        contract_address: cli.contract,
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    let network = config.active_network()?;
    let wallet: Arc<dyn WalletProvider> = Arc::new(
        RpcWallet::with_timeout(network.rpc_url.clone(), config.request_timeout())
            .context("Failed to create wallet client")?,
    );
    let alert: Arc<dyn Alert> = Arc::new(TerminalAlert);

    tracing::debug!(network = %config.network, wallet = wallet.name(), "Starting");

    match cli.command.unwrap_or(Command::Status) {
        Command::Deploy {
            artifact,
            max_whitelisted_addresses,
        } => {
            let options = DeployOptions {
                artifact,
                max_whitelisted_addresses,
            };
            let code = deploy::run_script(
                &config,
                &options,
                wallet,
                alert.as_ref(),
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
            .await;
            std::process::exit(code);
        }
        Command::Status => {
            let mut session = WhitelistSession::from_config(&config, wallet, alert)?;
            session.connect_wallet().await;
            print!("{}", ui::render(session.state()));
        }
        Command::Join => {
            let mut session = WhitelistSession::from_config(&config, wallet, alert)?;
            session.connect_wallet().await;

            let state = session.state();
            if state.wallet_connected && !state.joined_whitelist {
                println!("{}", ui::Prompt::Loading.text());
                session.add_address_to_whitelist().await;
            }
            print!("{}", ui::render(session.state()));
        }
        Command::Count => {
            let session = WhitelistSession::from_config(&config, wallet, alert)?;
            let count = session.fetch_member_count().await?;
            println!("{}", count);
        }
        Command::Check { address } => {
            let session = WhitelistSession::from_config(&config, wallet, alert)?;
            let joined = session.fetch_membership(address).await?;
            println!("{}", joined);
        }
    }

    Ok(())
}
