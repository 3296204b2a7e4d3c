//! The on-disk configuration model.
//!
//! [`RawConfig`] mirrors the TOML schema exactly as written: string fields
//! keep their `${VAR}` placeholders and nothing is validated beyond the
//! shape. Resolving a document against an environment snapshot happens in
//! [`DeployConfig::resolve`].

use crate::{
    config::DeployConfig,
    env::{self, EnvSnapshot},
    error::{ConfigError, Result},
    solc::{DEFAULT_OPTIMIZER_ENABLED, DEFAULT_OPTIMIZER_RUNS},
};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Top-level schema of a `deploy.toml` document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Compiler version pin, e.g. `"0.8.17"`.
    pub solidity: String,
    /// Compiler settings.
    #[serde(default)]
    pub settings: RawSettings,
    /// Deployment targets, keyed by network name.
    #[serde(default)]
    pub networks: BTreeMap<String, RawNetwork>,
    /// Contract-verification credentials.
    #[serde(default)]
    pub etherscan: RawVerification,
}

/// The `[settings]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Optimizer flags.
    #[serde(default)]
    pub optimizer: RawOptimizer,
}

/// The `[settings.optimizer]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOptimizer {
    /// Whether the optimizer runs. Defaults on.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Optimizer runs setting. Defaults to 200.
    #[serde(default = "default_runs")]
    pub runs: u32,
}

impl Default for RawOptimizer {
    fn default() -> Self {
        Self { enabled: DEFAULT_OPTIMIZER_ENABLED, runs: DEFAULT_OPTIMIZER_RUNS }
    }
}

const fn default_enabled() -> bool {
    DEFAULT_OPTIMIZER_ENABLED
}

const fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

/// One entry of the `[networks]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNetwork {
    /// RPC endpoint template.
    pub url: String,
    /// Optional pinned chain id.
    #[serde(default, alias = "chainId")]
    pub chain_id: Option<u64>,
    /// Account key templates, one per slot.
    #[serde(default)]
    pub accounts: Vec<String>,
}

/// The `[etherscan]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawVerification {
    /// A single default key, or a table of per-service keys.
    #[serde(default, alias = "apiKey")]
    pub api_key: Option<RawApiKey>,
}

/// The two accepted shapes of `etherscan.api_key`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawApiKey {
    /// One key used for every explorer service.
    Single(String),
    /// Per-service keys, e.g. `{ etherscan = "...", bscscan = "..." }`.
    PerService(BTreeMap<String, String>),
}

impl RawConfig {
    /// Parse a configuration document from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: origin.to_string(), source })
    }

    /// Resolve every placeholder against `snapshot` and validate the result,
    /// yielding an immutable [`DeployConfig`].
    pub fn resolve(&self, snapshot: &EnvSnapshot) -> Result<DeployConfig> {
        DeployConfig::resolve(self, snapshot)
    }

    /// Every environment variable the document references, in reading order,
    /// deduplicated. Parsing never needs these; resolution does.
    pub fn required_env(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut collect = |template: &str| {
            for var in env::placeholders(template) {
                if !seen.iter().any(|known| known == var) {
                    seen.push(var.to_string());
                }
            }
        };

        collect(&self.solidity);
        for network in self.networks.values() {
            collect(&network.url);
            for account in &network.accounts {
                collect(account);
            }
        }
        match &self.etherscan.api_key {
            Some(RawApiKey::Single(template)) => collect(template),
            Some(RawApiKey::PerService(keys)) => {
                for template in keys.values() {
                    collect(template);
                }
            }
            None => {}
        }
        seen
    }
}
