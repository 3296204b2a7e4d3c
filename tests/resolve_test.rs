//! Tests for environment resolution failures surfaced at load time.

use deploy_config::{
    config::DeployConfig,
    env::EnvSnapshot,
    error::ConfigError,
    raw::RawConfig,
    test_utils::{TEST_PRIVATE_KEY, sample_config_toml, setup_logging},
};
use eyre::Result;

fn snapshot_without(var: &str) -> EnvSnapshot {
    [
        ("PRIVATE_KEY", TEST_PRIVATE_KEY),
        ("INFURA_PROJECT_ID", "test-project"),
        ("ETHERSCAN_API_KEY", "etherscan-key"),
        ("BSC_API_KEY", "bsc-key"),
    ]
    .into_iter()
    .filter(|(name, _)| *name != var)
    .collect()
}

#[test]
fn missing_credentials_fail_resolution_not_parsing() -> Result<()> {
    setup_logging();

    let raw = RawConfig::from_toml_str(sample_config_toml())?;
    assert_eq!(
        raw.required_env(),
        ["PRIVATE_KEY", "INFURA_PROJECT_ID", "BSC_API_KEY", "ETHERSCAN_API_KEY"]
    );

    let err = DeployConfig::resolve(&raw, &snapshot_without("PRIVATE_KEY")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing environment variable PRIVATE_KEY, required by networks.bsctest.accounts[0]"
    );
    Ok(())
}

#[test]
fn each_referenced_variable_is_demanded() -> Result<()> {
    let raw = RawConfig::from_toml_str(sample_config_toml())?;
    for var in raw.required_env() {
        let err = DeployConfig::resolve(&raw, &snapshot_without(&var)).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnv { var: ref missing, .. } if *missing == var),
            "expected MissingEnv for {var}, got {err:?}"
        );
    }
    Ok(())
}

#[test]
fn explorer_key_errors_name_the_service_entry() -> Result<()> {
    let raw = RawConfig::from_toml_str(sample_config_toml())?;
    let err = DeployConfig::resolve(&raw, &snapshot_without("BSC_API_KEY")).unwrap_err();
    match err {
        ConfigError::MissingEnv { var, at } => {
            assert_eq!(var, "BSC_API_KEY");
            assert_eq!(at, "etherscan.api_key.bscscan");
        }
        other => panic!("expected MissingEnv, got {other:?}"),
    }
    Ok(())
}

#[test]
fn garbage_key_material_is_rejected_at_load_time() -> Result<()> {
    let raw = RawConfig::from_toml_str(sample_config_toml())?;
    let snapshot: EnvSnapshot = [
        ("PRIVATE_KEY", "not-hex-at-all"),
        ("INFURA_PROJECT_ID", "test-project"),
        ("ETHERSCAN_API_KEY", "etherscan-key"),
        ("BSC_API_KEY", "bsc-key"),
    ]
    .into_iter()
    .collect();

    let err = DeployConfig::resolve(&raw, &snapshot).unwrap_err();
    match err {
        ConfigError::InvalidPrivateKey { at, .. } => {
            assert_eq!(at, "networks.bsctest.accounts[0]");
        }
        other => panic!("expected InvalidPrivateKey, got {other:?}"),
    }
    Ok(())
}
