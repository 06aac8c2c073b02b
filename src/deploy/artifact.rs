// Compiled contract artifacts (Hardhat layout)

use alloy_primitives::{hex, Bytes};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WhitelistError};

/// The parts of `artifacts/contracts/<Name>.sol/<Name>.json` deployment needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: Vec<Value>,
    pub bytecode: String,
}

impl Artifact {
    /// Find the artifact for `name` under `path`.
    ///
    /// `path` may be the JSON file itself or an artifacts directory; inside a
    /// directory the Hardhat layout is tried first.
    pub fn resolve(path: &Path, name: &str) -> Result<PathBuf> {
        if !path.is_dir() {
            return if path.exists() {
                Ok(path.to_path_buf())
            } else {
                Err(WhitelistError::Artifact(format!(
                    "{} does not exist (compile the contract first)",
                    path.display()
                )))
            };
        }

        let file = format!("{name}.json");
        let candidates = [
            path.join("contracts").join(format!("{name}.sol")).join(&file),
            path.join(format!("{name}.sol")).join(&file),
            path.join(&file),
        ];

        candidates
            .iter()
            .find(|c| c.is_file())
            .cloned()
            .ok_or_else(|| {
                WhitelistError::Artifact(format!(
                    "no artifact for contract {} under {}",
                    name,
                    path.display()
                ))
            })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let artifact: Artifact = serde_json::from_str(&raw).map_err(|e| {
            WhitelistError::Artifact(format!("{} is not a contract artifact: {}", path.display(), e))
        })?;
        tracing::debug!(contract = %artifact.contract_name, path = %path.display(), "Loaded artifact");
        Ok(artifact)
    }

    /// Creation bytecode. Rejects abstract contracts and unlinked libraries.
    pub fn creation_code(&self) -> Result<Bytes> {
        if self.bytecode.contains("__$") {
            return Err(WhitelistError::Artifact(format!(
                "{} has unlinked library references",
                self.contract_name
            )));
        }

        let code = hex::decode(&self.bytecode).map_err(|e| {
            WhitelistError::Artifact(format!("{} bytecode is not hex: {}", self.contract_name, e))
        })?;

        if code.is_empty() {
            return Err(WhitelistError::Artifact(format!(
                "{} has no bytecode (abstract contract or interface?)",
                self.contract_name
            )));
        }

        Ok(code.into())
    }

    /// Solidity types of the constructor's parameters. Empty if there is no constructor.
    pub fn constructor_inputs(&self) -> Vec<String> {
        self.abi
            .iter()
            .find(|item| item.get("type").and_then(Value::as_str) == Some("constructor"))
            .and_then(|ctor| ctor.get("inputs"))
            .and_then(Value::as_array)
            .map(|inputs| {
                inputs
                    .iter()
                    .filter_map(|i| i.get("type").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
