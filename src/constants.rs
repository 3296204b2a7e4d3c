//! Constants for well-known networks and the config-check binary.

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "deploy.toml";
/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "DEPLOY_CONFIG_PATH";
/// Environment variable selecting the output format of `config-check`.
pub const CONFIG_FORMAT_ENV: &str = "DEPLOY_CONFIG_FORMAT";
/// Chain ID of the Rinkeby Ethereum testnet.
pub const RINKEBY_CHAIN_ID: u64 = 4;
/// Chain ID of the BNB Smart Chain testnet.
pub const BSC_TESTNET_CHAIN_ID: u64 = 97;
/// Chain ID of the BNB Smart Chain mainnet.
pub const BSC_MAINNET_CHAIN_ID: u64 = 56;
/// Public RPC endpoint of the BNB Smart Chain testnet.
pub const BSC_TESTNET_RPC: &str = "https://data-seed-prebsc-1-s1.binance.org:8545";
/// Public RPC endpoint of the BNB Smart Chain mainnet.
pub const BSC_MAINNET_RPC: &str = "https://bsc-dataseed.binance.org/";
/// Endpoint template for Rinkeby via Infura. Requires `INFURA_PROJECT_ID`.
pub const RINKEBY_RPC_TEMPLATE: &str = "https://rinkeby.infura.io/v3/${INFURA_PROJECT_ID}";
