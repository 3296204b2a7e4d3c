//! Signing-key material for network accounts.
//!
//! Keys arrive as strings (usually resolved from `${PRIVATE_KEY}`-style
//! placeholders), are parsed into [`PrivateKeySigner`]s immediately, and the
//! intermediate text is zeroized. Only the derived address and the value's
//! provenance are ever printed.

use crate::error::{ConfigError, Result};
use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use std::fmt;

/// Where a secret configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Resolved from a `${VAR}` placeholder.
    Env(String),
    /// Written directly in the configuration file.
    Literal,
}

impl KeySource {
    /// Classify a raw template: a template that is exactly one placeholder
    /// is environment-sourced; everything else (including mixed templates)
    /// counts as literal.
    pub fn of_template(template: &str) -> Self {
        template
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|name| crate::env::placeholders(template) == [*name])
            .map_or(Self::Literal, |name| Self::Env(name.to_string()))
    }

    /// Printable provenance: `${VAR}` or `<literal>`. Never the value.
    pub fn provenance(&self) -> String {
        match self {
            Self::Env(var) => format!("${{{var}}}"),
            Self::Literal => "<literal>".to_string(),
        }
    }
}

/// A resolved signing key for one account slot of a network profile.
#[derive(Clone)]
pub struct AccountKey {
    signer: PrivateKeySigner,
    source: KeySource,
}

impl AccountKey {
    /// Parse a 32-byte hex private key, with or without a `0x` prefix.
    /// Surrounding whitespace is tolerated. On failure the error names the
    /// config field (`at`) and never echoes the material.
    pub fn parse(raw: &str, source: KeySource, at: &str) -> Result<Self> {
        let signer = raw
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|source| ConfigError::InvalidPrivateKey { at: at.to_string(), source })?;
        Ok(Self { signer, source })
    }

    /// The address this key signs for.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The parsed signer.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
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

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountKey")
            .field("address", &self.address())
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The canonical test vector: key 0x...01 controls this address.
    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";
    const ADDR_ONE: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    #[test]
    fn parses_with_and_without_prefix() {
        let with = AccountKey::parse(KEY_ONE, KeySource::Literal, "f").unwrap();
        let without = AccountKey::parse(&KEY_ONE[2..], KeySource::Literal, "f").unwrap();
        assert_eq!(with.address(), without.address());
        assert_eq!(with.address(), ADDR_ONE.parse::<Address>().unwrap());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!("  {KEY_ONE}\n");
        let key = AccountKey::parse(&padded, KeySource::Literal, "f").unwrap();
        assert_eq!(key.address(), ADDR_ONE.parse::<Address>().unwrap());
    }

    #[test]
    fn rejects_invalid_material_without_echoing_it() {
        for bad in ["not-a-key", "0x1234", ""] {
            let err =
                AccountKey::parse(bad, KeySource::Literal, "networks.dev.accounts[0]").unwrap_err();
            match err {
                ConfigError::InvalidPrivateKey { ref at, .. } => {
                    assert_eq!(at, "networks.dev.accounts[0]");
                }
                other => panic!("expected InvalidPrivateKey, got {other:?}"),
            }
        }
    }

    #[test]
    fn debug_shows_address_not_material() {
        let key = AccountKey::parse(
            KEY_ONE,
            KeySource::Env("PRIVATE_KEY".to_string()),
            "f",
        )
        .unwrap();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("7E5F4552091A69125d5DfCb7b8C2659029395Bdf"));
        assert!(!rendered.contains("0000000000000001"));
    }

    #[test]
    fn classifies_templates() {
        assert_eq!(
            KeySource::of_template("${PRIVATE_KEY}"),
            KeySource::Env("PRIVATE_KEY".to_string())
        );
        assert_eq!(KeySource::of_template("0xabcd"), KeySource::Literal);
        assert_eq!(KeySource::of_template("${A}${B}"), KeySource::Literal);
        assert_eq!(KeySource::of_template("x${A}"), KeySource::Literal);
        assert_eq!(KeySource::of_template("$${NOT_A_VAR}"), KeySource::Literal);
    }

    #[test]
    fn provenance_never_contains_values() {
        assert_eq!(KeySource::Env("PRIVATE_KEY".to_string()).provenance(), "${PRIVATE_KEY}");
        assert_eq!(KeySource::Literal.provenance(), "<literal>");
    }
}
