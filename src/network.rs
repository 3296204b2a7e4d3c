//! Resolved network profiles and the provider handles built from them.
//!
//! A [`NetworkProfile`] is a fully validated deployment target: RPC endpoint,
//! optional chain id, and the signing keys for its account slots. Profiles
//! construct wallet and provider handles without performing any I/O; nothing
//! here dials the endpoint.

use crate::{
    error::{ConfigError, Result},
    signer::AccountKey,
};
use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        self, Identity, ProviderBuilder, RootProvider,
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
    },
    signers::{Signer, local::PrivateKeySigner},
};
use tracing::debug;
use url::Url;

/// Type alias for the read-only provider used to query a network.
pub type RpcProvider = RootProvider<Ethereum>;

/// Type alias for the provider used to sign and submit deployment
/// transactions.
pub type DeployProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    providers::RootProvider,
>;

/// A validated deployment target.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    name: String,
    url_template: String,
    url: Url,
    chain_id: Option<u64>,
    accounts: Vec<AccountKey>,
}

impl NetworkProfile {
    /// Assemble a profile from resolved parts. `url_template` is the
    /// endpoint as written in the file, placeholders intact; it is what
    /// gets displayed, since resolved URLs may embed credentials. Rejects
    /// endpoints that are not plain HTTP(S).
    pub fn new(
        name: String,
        url_template: String,
        url: Url,
        chain_id: Option<u64>,
        accounts: Vec<AccountKey>,
    ) -> Result<Self> {
        match url.scheme() {
            "http" | "https" => Ok(Self { name, url_template, url, chain_id, accounts }),
            scheme => Err(ConfigError::UnsupportedScheme {
                at: format!("networks.{name}.url"),
                scheme: scheme.to_string(),
            }),
        }
    }

    /// The profile's name, as written in the `[networks]` table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The endpoint as written in the file, placeholders intact.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// The resolved RPC endpoint. May embed credentials; display
    /// [`url_template`](Self::url_template) instead of this.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// The chain id, when one is pinned in the configuration.
    pub const fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// The resolved account keys, in declaration order.
    pub fn accounts(&self) -> &[AccountKey] {
        &self.accounts
    }

    /// The address transactions are sent from: the first account slot.
    pub fn sender(&self) -> Result<Address> {
        self.accounts
            .first()
            .map(AccountKey::address)
            .ok_or_else(|| ConfigError::NoAccounts { network: self.name.clone() })
    }

    /// A wallet holding every account key, with the first as default signer.
    /// Errors when the profile has no accounts.
    pub fn wallet(&self) -> Result<EthereumWallet> {
        let mut keys = self.accounts.iter();
        let first = keys
            .next()
            .ok_or_else(|| ConfigError::NoAccounts { network: self.name.clone() })?;

        let mut wallet = EthereumWallet::from(self.bound_signer(first));
        for key in keys {
            wallet.register_signer(self.bound_signer(key));
        }
        Ok(wallet)
    }

    /// A read-only provider for the endpoint. Does not dial.
    pub fn provider(&self) -> RpcProvider {
        RootProvider::new_http(self.url.clone())
    }

    /// A filling, wallet-backed provider for sending deployment transactions.
    /// Does not dial. Errors when the profile has no accounts.
    pub fn deploy_provider(&self) -> Result<DeployProvider> {
        let wallet = self.wallet()?;
        debug!(network = %self.name, url = %self.url_template, "constructing deployment provider");
        Ok(ProviderBuilder::new().wallet(wallet).connect_http(self.url.clone()))
    }

    /// Clone an account's signer and bind it to the profile's chain id.
    fn bound_signer(&self, key: &AccountKey) -> PrivateKeySigner {
        key.signer().clone().with_chain_id(self.chain_id)
    }
}
