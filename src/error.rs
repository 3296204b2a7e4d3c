use alloy::signers::local::LocalSignerError;
use std::path::PathBuf;

/// Result type alias for configuration operations.
pub type Result<T> = core::result::Result<T, ConfigError>;

/// Errors raised while loading or resolving a deployment configuration.
///
/// Every variant names the configuration location it arose from, and no
/// variant carries secret material.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML or does not match the
    /// schema. Keys assigned twice within one table are reported here by
    /// the TOML parser.
    #[error("invalid config in {path}: {source}")]
    Parse {
        /// Source path, or `<inline>` for text parsed from memory.
        path: String,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },

    /// A `${VAR}` placeholder is malformed.
    #[error("invalid placeholder in {at}: {detail}")]
    Placeholder {
        /// Config field containing the template.
        at: String,
        /// What is wrong with the template.
        detail: String,
    },

    /// A `${VAR}` placeholder referenced an environment variable that is
    /// not present in the snapshot.
    #[error("missing environment variable {var}, required by {at}")]
    MissingEnv {
        /// The unset variable.
        var: String,
        /// Config field that references it.
        at: String,
    },

    /// A `${VAR}` placeholder referenced an environment variable that is
    /// set but empty.
    #[error("environment variable {var} is set but empty, required by {at}")]
    EmptyEnv {
        /// The empty variable.
        var: String,
        /// Config field that references it.
        at: String,
    },

    /// The same key was assigned more than once within one table.
    #[error("duplicate key {key:?} in {table}")]
    DuplicateKey {
        /// Table containing the collision.
        table: String,
        /// The key assigned twice, after normalization.
        key: String,
    },

    /// A service name in a verification key table is empty.
    #[error("empty service name in {table}")]
    EmptyServiceName {
        /// Table containing the empty key.
        table: String,
    },

    /// A network URL could not be parsed.
    #[error("invalid URL in {at}: {source}")]
    InvalidUrl {
        /// Config field containing the URL.
        at: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A network URL uses a scheme the toolchain cannot speak.
    #[error("unsupported URL scheme {scheme:?} in {at}, expected http or https")]
    UnsupportedScheme {
        /// Config field containing the URL.
        at: String,
        /// The offending scheme.
        scheme: String,
    },

    /// An account entry is not a valid 32-byte private key. The key
    /// material is never echoed.
    #[error("invalid private key in {at}: {source}")]
    InvalidPrivateKey {
        /// Config field containing the key.
        at: String,
        /// Underlying signer error.
        #[source]
        source: LocalSignerError,
    },

    /// The compiler version pin is not of the form `MAJOR.MINOR.PATCH`.
    #[error("invalid solc version {given:?}, expected e.g. \"0.8.17\"")]
    InvalidSolcVersion {
        /// The rejected version string.
        given: String,
    },

    /// A wallet was requested for a network profile with no accounts.
    #[error("network {network:?} has no accounts configured")]
    NoAccounts {
        /// The account-less network.
        network: String,
    },

    /// A network was looked up under a name the configuration does not
    /// declare.
    #[error("unknown network {name:?}, known networks: [{}]", known.join(", "))]
    UnknownNetwork {
        /// The requested name.
        name: String,
        /// Every declared network name.
        known: Vec<String>,
    },

    /// The effective configuration could not be rendered.
    #[error("failed to render effective config: {0}")]
    Render(String),
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}
