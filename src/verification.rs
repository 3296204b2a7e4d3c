//! Contract-verification credentials for block-explorer APIs.
//!
//! The `[etherscan]` table maps explorer services (etherscan, bscscan, ...)
//! to API keys. A bare `api_key = "..."` sets the default used when no
//! service-specific entry matches. Assigning the same slot twice is a
//! configuration defect and is rejected at load time rather than silently
//! keeping one of the two values.

use crate::{
    error::{ConfigError, Result},
    signer::KeySource,
};
use std::collections::BTreeMap;
use std::fmt;

/// A single explorer API key with its provenance.
#[derive(Clone)]
pub struct ApiKey {
    value: String,
    source: KeySource,
}

impl ApiKey {
    /// Wrap a resolved key value together with where it came from.
    pub const fn new(value: String, source: KeySource) -> Self {
        Self { value, source }
    }

    /// The secret value, for handing to a verification client.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the key came from.
    pub const fn source(&self) -> &KeySource {
        &self.source
    }

    /// Printable provenance of the key value.
    pub fn provenance(&self) -> String {
        self.source.provenance()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("source", &self.source).finish()
    }
}

/// Verification credentials, keyed by explorer service name.
#[derive(Debug, Clone, Default)]
pub struct VerificationKeys {
    default: Option<ApiKey>,
    services: BTreeMap<String, ApiKey>,
}

impl VerificationKeys {
    /// Set the default key. A second call reports the duplicate assignment
    /// instead of overwriting the first.
    pub fn set_default(&mut self, key: ApiKey) -> Result<()> {
        if self.default.is_some() {
            return Err(ConfigError::DuplicateKey {
                table: "etherscan".to_string(),
                key: "api_key".to_string(),
            });
        }
        self.default = Some(key);
        Ok(())
    }

    /// Add a key for a named service. Names are trimmed and matched
    /// case-insensitively; a repeated name is a duplicate assignment.
    pub fn insert(&mut self, service: &str, key: ApiKey) -> Result<()> {
        let name = service.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(ConfigError::EmptyServiceName { table: "etherscan.api_key".to_string() });
        }
        if self.services.contains_key(&name) {
            return Err(ConfigError::DuplicateKey {
                table: "etherscan.api_key".to_string(),
                key: name,
            });
        }
        self.services.insert(name, key);
        Ok(())
    }

    /// Look up the key for a service, falling back to the default.
    pub fn for_service(&self, service: &str) -> Option<&ApiKey> {
        let name = service.trim().to_ascii_lowercase();
        self.services.get(&name).or(self.default.as_ref())
    }

    /// The default key, if one is configured.
    pub const fn default_key(&self) -> Option<&ApiKey> {
        self.default.as_ref()
    }

    /// Iterate service-specific keys in name order.
    pub fn services(&self) -> impl Iterator<Item = (&str, &ApiKey)> {
        self.services.iter().map(|(name, key)| (name.as_str(), key))
    }

    /// True when neither a default nor any service key is configured.
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> ApiKey {
        ApiKey::new(value.to_string(), KeySource::Literal)
    }

    #[test]
    fn default_key_serves_unknown_services() {
        let mut keys = VerificationKeys::default();
        keys.set_default(key("abc")).unwrap();
        assert_eq!(keys.for_service("etherscan").unwrap().value(), "abc");
        assert_eq!(keys.for_service("bscscan").unwrap().value(), "abc");
    }

    #[test]
    fn service_key_wins_over_default() {
        let mut keys = VerificationKeys::default();
        keys.set_default(key("fallback")).unwrap();
        keys.insert("bscscan", key("bsc")).unwrap();
        assert_eq!(keys.for_service("bscscan").unwrap().value(), "bsc");
        assert_eq!(keys.for_service("etherscan").unwrap().value(), "fallback");
    }

    #[test]
    fn second_default_is_rejected_not_overwritten() {
        let mut keys = VerificationKeys::default();
        keys.set_default(key("first")).unwrap();
        let err = keys.set_default(key("second")).unwrap_err();
        match err {
            ConfigError::DuplicateKey { table, key } => {
                assert_eq!(table, "etherscan");
                assert_eq!(key, "api_key");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        // The first assignment survives.
        assert_eq!(keys.default_key().unwrap().value(), "first");
    }

    #[test]
    fn service_names_normalize_before_collision_checks() {
        let mut keys = VerificationKeys::default();
        keys.insert("BscScan", key("a")).unwrap();
        let err = keys.insert("  bscscan ", key("b")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateKey { ref key, .. } if key == "bscscan"
        ));
        assert_eq!(keys.for_service("BSCSCAN").unwrap().value(), "a");
    }

    #[test]
    fn blank_service_name_is_rejected() {
        let mut keys = VerificationKeys::default();
        let err = keys.insert("   ", key("a")).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyServiceName { .. }));
    }

    #[test]
    fn missing_everything_yields_none() {
        let keys = VerificationKeys::default();
        assert!(keys.is_empty());
        assert!(keys.for_service("etherscan").is_none());
    }

    #[test]
    fn debug_omits_key_values() {
        let rendered = format!("{:?}", key("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
