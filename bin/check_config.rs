use deploy_config::{
    config::DeployConfig,
    constants::{CONFIG_FORMAT_ENV, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH},
    env::{self, EnvSnapshot},
    raw::RawConfig,
};
use eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt,
};

fn main() -> Result<()> {
    init_logging();

    if let Some(path) = env::load_dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }
    let snapshot = EnvSnapshot::capture();

    let path = config_path(&snapshot);
    tracing::info!(path = %path.display(), "checking deployment config");

    let raw = RawConfig::from_path(&path)?;
    let config = match DeployConfig::resolve(&raw, &snapshot) {
        Ok(config) => config,
        Err(err) => {
            report_env(&raw, &snapshot);
            return Err(err.into());
        }
    };

    for network in config.networks() {
        let sender = network
            .sender()
            .map(|address| address.to_string())
            .unwrap_or_else(|_| "<no accounts>".to_string());
        tracing::info!(network = network.name(), sender, "validated network");
    }

    let rendered = if snapshot.get(CONFIG_FORMAT_ENV) == Some("json") {
        config.to_json_string()?
    } else {
        config.to_toml_string()?
    };
    println!("{rendered}");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = fmt::layer().with_filter(filter);
    registry().with(fmt).init();
}

/// Path precedence: first CLI argument, then `DEPLOY_CONFIG_PATH`, then
/// `./deploy.toml`.
fn config_path(snapshot: &EnvSnapshot) -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| snapshot.get(CONFIG_PATH_ENV).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
        .into()
}

/// On resolution failure, report which referenced variables are present
/// without printing any values.
fn report_env(raw: &RawConfig, snapshot: &EnvSnapshot) {
    eprintln!("environment variables referenced by the config:");
    for var in raw.required_env() {
        let state = match snapshot.get(&var) {
            Some("") => "set but empty",
            Some(_) => "set",
            None => "unset",
        };
        eprintln!("  {var}: {state}");
    }
}
