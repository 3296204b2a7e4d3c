//! Test utilities for exercising configuration loading.

use crate::{config::DeployConfig, env::EnvSnapshot, raw::RawConfig};
use eyre::Result;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt,
};

/// A well-known private key. Never use outside tests.
pub const TEST_PRIVATE_KEY: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000001";

/// The address controlled by [`TEST_PRIVATE_KEY`].
pub const TEST_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

/// The reference configuration document shipped with the crate.
pub fn sample_config_toml() -> &'static str {
    include_str!("../deploy.toml")
}

/// A snapshot providing every variable the reference document references.
pub fn test_snapshot() -> EnvSnapshot {
    [
        ("PRIVATE_KEY", TEST_PRIVATE_KEY),
        ("INFURA_PROJECT_ID", "test-project"),
        ("ETHERSCAN_API_KEY", "etherscan-key"),
        ("BSC_API_KEY", "bsc-key"),
    ]
    .into_iter()
    .collect()
}

/// Resolves the reference document against the test snapshot.
pub fn setup_test_config() -> Result<DeployConfig> {
    Ok(RawConfig::from_toml_str(sample_config_toml())?.resolve(&test_snapshot())?)
}

/// Initializes a logger that prints during testing
pub fn setup_logging() {
    // Initialize logging
    let filter = EnvFilter::from_default_env();
    let fmt = fmt::layer().with_filter(filter);
    let registry = registry().with(fmt);
    let _ = registry.try_init();
}
