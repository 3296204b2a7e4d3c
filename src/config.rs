//! Resolved deployment configuration.
//!
//! [`DeployConfig`] is the validated, immutable product of resolving a
//! [`RawConfig`] against an [`EnvSnapshot`]. The environment is consulted
//! only during resolution; afterwards the config is a plain value and
//! rendering it can never touch the process environment again.

use crate::{
    env::{self, EnvSnapshot},
    error::{ConfigError, Result},
    network::NetworkProfile,
    raw::{RawApiKey, RawConfig, RawNetwork, RawVerification},
    signer::{AccountKey, KeySource},
    solc::{OptimizerSettings, SolcConfig, SolcVersion},
    verification::{ApiKey, VerificationKeys},
};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{info, instrument, warn};
use url::Url;
use zeroize::Zeroizing;

/// A fully resolved and validated deployment configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    solc: SolcConfig,
    networks: BTreeMap<String, NetworkProfile>,
    verification: VerificationKeys,
}

impl DeployConfig {
    /// Read `path` and resolve it against `snapshot`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, snapshot: &EnvSnapshot) -> Result<Self> {
        RawConfig::from_path(path.as_ref())?.resolve(snapshot)
    }

    /// Resolve a parsed document against `snapshot`, validating every field.
    ///
    /// Resolution fails on the first defect: a malformed placeholder, a
    /// missing or empty environment variable, an unparseable URL or key, or
    /// a duplicate verification entry. Nothing is deferred to use time.
    #[instrument(skip_all)]
    pub fn resolve(raw: &RawConfig, snapshot: &EnvSnapshot) -> Result<Self> {
        let version_text = env::interpolate(&raw.solidity, snapshot, "solidity")?;
        let version: SolcVersion = version_text.parse()?;
        let optimizer = OptimizerSettings {
            enabled: raw.settings.optimizer.enabled,
            runs: raw.settings.optimizer.runs,
        };

        let mut networks = BTreeMap::new();
        for (name, net) in &raw.networks {
            networks.insert(name.clone(), resolve_network(name, net, snapshot)?);
        }

        let verification = resolve_verification(&raw.etherscan, snapshot)?;

        let config = Self { solc: SolcConfig { version, optimizer }, networks, verification };
        info!(
            solc = %config.solc.version,
            networks = config.networks.len(),
            "resolved deployment configuration"
        );
        Ok(config)
    }

    /// Compiler configuration.
    pub const fn solc(&self) -> &SolcConfig {
        &self.solc
    }

    /// Look up a deployment target by name.
    pub fn network(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks.get(name).ok_or_else(|| ConfigError::UnknownNetwork {
            name: name.to_string(),
            known: self.networks.keys().cloned().collect(),
        })
    }

    /// All deployment targets, in name order.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    /// Contract-verification credentials.
    pub const fn verification(&self) -> &VerificationKeys {
        &self.verification
    }

    /// Render the effective configuration as TOML. Secret values render as
    /// their provenance, so the output is safe to log and, for
    /// environment-sourced secrets, is itself a loadable document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.effective())?)
    }

    /// Render the effective configuration as JSON, with the same redaction
    /// rules as [`Self::to_toml_string`].
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.effective())?)
    }

    fn effective(&self) -> Effective<'_> {
        let networks = self
            .networks
            .iter()
            .map(|(name, profile)| {
                let effective = EffectiveNetwork {
                    url: profile.url_template(),
                    chain_id: profile.chain_id(),
                    accounts: profile.accounts().iter().map(AccountKey::provenance).collect(),
                };
                (name.as_str(), effective)
            })
            .collect();

        // Resolution populates either the default key or the service table,
        // never both.
        let api_key = match self.verification.default_key() {
            Some(default) => Some(EffectiveApiKey::Single(default.provenance())),
            None => {
                let services: BTreeMap<&str, String> = self
                    .verification
                    .services()
                    .map(|(name, key)| (name, key.provenance()))
                    .collect();
                (!services.is_empty()).then_some(EffectiveApiKey::PerService(services))
            }
        };

        Effective {
            solidity: self.solc.version.to_string(),
            settings: EffectiveSettings {
                optimizer: EffectiveOptimizer {
                    enabled: self.solc.optimizer.enabled,
                    runs: self.solc.optimizer.runs,
                },
            },
            networks,
            etherscan: EffectiveVerification { api_key },
        }
    }
}

fn resolve_network(name: &str, raw: &RawNetwork, snapshot: &EnvSnapshot) -> Result<NetworkProfile> {
    let at = format!("networks.{name}.url");
    let url_text = env::interpolate(&raw.url, snapshot, &at)?;
    let url = Url::parse(&url_text).map_err(|source| ConfigError::InvalidUrl { at, source })?;

    let mut accounts = Vec::with_capacity(raw.accounts.len());
    for (slot, template) in raw.accounts.iter().enumerate() {
        let at = format!("networks.{name}.accounts[{slot}]");
        let source = KeySource::of_template(template);
        if source == KeySource::Literal {
            warn!(%at, "private key written directly in the config file");
        }
        let material = Zeroizing::new(env::interpolate(template, snapshot, &at)?);
        accounts.push(AccountKey::parse(&material, source, &at)?);
    }

    NetworkProfile::new(name.to_string(), raw.url.clone(), url, raw.chain_id, accounts)
}

fn resolve_verification(raw: &RawVerification, snapshot: &EnvSnapshot) -> Result<VerificationKeys> {
    let mut keys = VerificationKeys::default();
    match &raw.api_key {
        None => {}
        Some(RawApiKey::Single(template)) => {
            keys.set_default(resolve_api_key(template, snapshot, "etherscan.api_key")?)?;
        }
        Some(RawApiKey::PerService(services)) => {
            for (service, template) in services {
                let at = format!("etherscan.api_key.{service}");
                keys.insert(service, resolve_api_key(template, snapshot, &at)?)?;
            }
        }
    }
    Ok(keys)
}

fn resolve_api_key(template: &str, snapshot: &EnvSnapshot, at: &str) -> Result<ApiKey> {
    let source = KeySource::of_template(template);
    if source == KeySource::Literal {
        warn!(%at, "verification key written directly in the config file");
    }
    Ok(ApiKey::new(env::interpolate(template, snapshot, at)?, source))
}

/// Serializable mirror of the configuration in its input schema. Secret
/// values are replaced by provenance strings before this type is built.
#[derive(Debug, Serialize)]
struct Effective<'a> {
    solidity: String,
    settings: EffectiveSettings,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    networks: BTreeMap<&'a str, EffectiveNetwork<'a>>,
    #[serde(skip_serializing_if = "EffectiveVerification::is_empty")]
    etherscan: EffectiveVerification<'a>,
}

#[derive(Debug, Serialize)]
struct EffectiveSettings {
    optimizer: EffectiveOptimizer,
}

#[derive(Debug, Serialize)]
struct EffectiveOptimizer {
    enabled: bool,
    runs: u32,
}

#[derive(Debug, Serialize)]
struct EffectiveNetwork<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    accounts: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EffectiveVerification<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<EffectiveApiKey<'a>>,
}

impl EffectiveVerification<'_> {
    fn is_empty(&self) -> bool {
        self.api_key.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum EffectiveApiKey<'a> {
    Single(String),
    PerService(BTreeMap<&'a str, String>),
}
