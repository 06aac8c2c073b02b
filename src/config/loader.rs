// Configuration loader
// Loads settings from ~/.whitelist/config.toml, then layers environment and CLI overrides

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::*;
use super::settings::{Config, DeployConfig, NetworkConfig};

/// On-disk shape. Every field is optional; absent keys keep built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    contract_address: Option<Address>,
    #[serde(default)]
    receipt_poll_interval_ms: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    networks: HashMap<String, NetworkConfig>,
    #[serde(default)]
    deploy: Option<DeployConfig>,
}

/// ~/.whitelist/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Settings that can come from outside the config file.
///
/// One value per layer (environment, command line); layers are merged with
/// [`Overrides::over`] and applied to the file config in a single step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub contract_address: Option<Address>,
}

impl Overrides {
    /// Read `WHITELIST_NETWORK`, `WHITELIST_RPC_URL` and `WHITELIST_CONTRACT_ADDRESS`.
    ///
    /// `lookup` abstracts the environment so tests don't touch process state.
    /// Empty values are ignored.
    pub fn from_env<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let contract_address = get(ENV_CONTRACT_ADDRESS)
            .map(|raw| {
                raw.parse::<Address>()
                    .with_context(|| format!("{} is not a valid address: {}", ENV_CONTRACT_ADDRESS, raw))
            })
            .transpose()?;

        Ok(Self {
            network: get(ENV_NETWORK),
            rpc_url: get(ENV_RPC_URL),
            contract_address,
        })
    }

    /// Layer `self` on top of `lower`. Fields set here win.
    pub fn over(self, lower: Overrides) -> Overrides {
        Overrides {
            network: self.network.or(lower.network),
            rpc_url: self.rpc_url.or(lower.rpc_url),
            contract_address: self.contract_address.or(lower.contract_address),
        }
    }

    /// Select the network first, then point the selected network at `rpc_url`.
    ///
    /// An `rpc_url` for a network with no entry is dropped; validation then
    /// reports the unknown network.
    pub fn apply(&self, config: &mut Config) {
        if let Some(network) = &self.network {
            config.network = network.clone();
        }

        if let Some(url) = &self.rpc_url {
            match config.networks.get_mut(&config.network) {
                Some(network) => network.rpc_url = url.clone(),
                None => tracing::debug!(network = %config.network, "No network entry to apply rpc_url to"),
            }
        }

        if let Some(address) = self.contract_address {
            config.contract_address = Some(address);
        }
    }
}

/// Load the file (explicit, default, or none), layer environment and then
/// `cli` on top, and validate the result.
pub fn load_config(explicit: Option<&Path>, cli: &Overrides) -> Result<Config> {
    load_layered(explicit, cli, |key| std::env::var(key).ok())
}

/// [`load_config`] with the environment supplied by `env`.
pub fn load_layered<F>(explicit: Option<&Path>, cli: &Overrides, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match explicit {
        Some(path) => load_config_from_path(path)?,
        None => {
            let path = default_config_path()?;
            if path.exists() {
                load_config_from_path(&path)?
            } else {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Config::default()
            }
        }
    };

    let overrides = cli.clone().over(Overrides::from_env(env)?);
    overrides.apply(&mut config);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Parse one TOML file and merge it over the defaults. Does not validate.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let toml_config: TomlConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let mut config = Config::default();

    if let Some(network) = toml_config.network {
        config.network = network;
    }
    config.contract_address = toml_config.contract_address;
    if let Some(interval) = toml_config.receipt_poll_interval_ms {
        config.receipt_poll_interval_ms = interval;
    }
    config.request_timeout_secs = toml_config.request_timeout_secs;
    // File entries replace built-ins of the same name
    config.networks.extend(toml_config.networks);
    if let Some(deploy) = toml_config.deploy {
        config.deploy = deploy;
    }

    tracing::debug!(path = %path.display(), network = %config.network, "Loaded config file");
    Ok(config)
}
