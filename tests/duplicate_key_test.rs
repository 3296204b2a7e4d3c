//! Tests for duplicate-assignment diagnostics.
//!
//! Assigning one configuration slot twice is always reported at load time;
//! no spelling of the collision silently keeps one of the two values.

use deploy_config::{
    config::DeployConfig, env::EnvSnapshot, error::ConfigError, raw::RawConfig,
    test_utils::setup_logging,
};

fn keys_snapshot() -> EnvSnapshot {
    [("ETHERSCAN_API_KEY", "etherscan-key"), ("BSC_API_KEY", "bsc-key")].into_iter().collect()
}

#[test]
fn repeated_api_key_assignments_fail_to_parse() {
    setup_logging();

    let doc = r#"
solidity = "0.8.17"

[etherscan]
api_key = "${ETHERSCAN_API_KEY}"
api_key = "${BSC_API_KEY}"
"#;
    let err = RawConfig::from_toml_str(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn aliased_api_key_spellings_also_collide() {
    let doc = r#"
solidity = "0.8.17"

[etherscan]
apiKey = "${ETHERSCAN_API_KEY}"
api_key = "${BSC_API_KEY}"
"#;
    let err = RawConfig::from_toml_str(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn case_folded_service_names_collide_at_resolution() {
    let doc = r#"
solidity = "0.8.17"

[etherscan.api_key]
BscScan = "${BSC_API_KEY}"
bscscan = "${ETHERSCAN_API_KEY}"
"#;
    let raw = RawConfig::from_toml_str(doc).unwrap();
    let err = DeployConfig::resolve(&raw, &keys_snapshot()).unwrap_err();
    match err {
        ConfigError::DuplicateKey { table, key } => {
            assert_eq!(table, "etherscan.api_key");
            assert_eq!(key, "bscscan");
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[test]
fn repeated_network_tables_fail_to_parse() {
    let doc = r#"
solidity = "0.8.17"

[networks.dev]
url = "http://localhost:8545"

[networks.dev]
url = "http://localhost:8546"
"#;
    let err = RawConfig::from_toml_str(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn distinct_services_do_not_collide() {
    let doc = r#"
solidity = "0.8.17"

[etherscan.api_key]
etherscan = "${ETHERSCAN_API_KEY}"
bscscan = "${BSC_API_KEY}"
"#;
    let raw = RawConfig::from_toml_str(doc).unwrap();
    let config = DeployConfig::resolve(&raw, &keys_snapshot()).unwrap();
    assert_eq!(config.verification().for_service("etherscan").unwrap().value(), "etherscan-key");
    assert_eq!(config.verification().for_service("bscscan").unwrap().value(), "bsc-key");
}
