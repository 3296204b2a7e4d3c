//! Compiler settings: the solc version pin and optimizer flags.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// Default optimizer state for stock configurations.
pub const DEFAULT_OPTIMIZER_ENABLED: bool = true;
/// Default optimizer run count for stock configurations.
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// An exact solc version pin, e.g. `0.8.17`.
///
/// The toolchain invokes exactly this compiler release, so ranges and
/// prerelease tags are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolcVersion {
    /// Major version.
    pub major: u64,
    /// Minor version.
    pub minor: u64,
    /// Patch version.
    pub patch: u64,
}

impl SolcVersion {
    /// Create a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }
}

impl FromStr for SolcVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let reject = || ConfigError::InvalidSolcVersion { given: s.to_string() };

        let mut parts = s.split('.');
        let mut next = || -> Result<u64> {
            parts
                .next()
                .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|p| p.parse().ok())
                .ok_or_else(reject)
        };

        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(reject());
        }
        Ok(version)
    }
}

impl fmt::Display for SolcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Optimizer flag bundle controlling the code-size/gas-cost tradeoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerSettings {
    /// Whether the optimizer runs at all.
    pub enabled: bool,
    /// How often contract code is expected to run. Higher values trade
    /// deploy cost for cheaper calls.
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self { enabled: DEFAULT_OPTIMIZER_ENABLED, runs: DEFAULT_OPTIMIZER_RUNS }
    }
}

/// Resolved compiler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolcConfig {
    /// The pinned compiler release.
    pub version: SolcVersion,
    /// Optimizer flags passed to that release.
    pub optimizer: OptimizerSettings,
}
