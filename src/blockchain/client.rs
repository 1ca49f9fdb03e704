// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider acquisition.
//!
//! The [`ChainClient`] never looks the provider up from ambient state. It is
//! handed a [`WalletSource`] at construction, which production code backs with
//! the configured JSON-RPC endpoint and tests back with a recording wallet.

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use url::Url;

use super::contract::{RwaTokenContract, TokenContract};
use super::error::ChainError;

/// Capability obtained from a connected wallet provider.
///
/// The only thing this layer needs from it is the ability to bind a token
/// contract; signing and sending stay behind the provider.
pub trait WalletHandle: Clone + Send + Sync + 'static {
    /// Contract handle produced by [`WalletHandle::bind`].
    type Contract: TokenContract;

    /// Bind the token interface at `address` to this wallet.
    fn bind(&self, address: Address) -> Self::Contract;
}

/// Strategy for obtaining the connected wallet.
pub trait WalletSource: Send + Sync + 'static {
    type Wallet: WalletHandle;

    /// Probe for a wallet. `None` when no provider is present.
    fn acquire(&self) -> Option<Self::Wallet>;
}

/// Obtains wallet handles from an injected [`WalletSource`].
pub struct ChainClient<S> {
    source: S,
}

impl<S: WalletSource> ChainClient<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Acquire the connected wallet, or fail with [`ChainError::ProviderUnavailable`].
    ///
    /// Read-only probe with no retry. Called once per contract interaction, so a
    /// wallet switched between two calls is observed by the second one.
    pub fn acquire_provider(&self) -> Result<S::Wallet, ChainError> {
        self.source.acquire().ok_or(ChainError::ProviderUnavailable)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Wallet provider reached over JSON-RPC.
///
/// Transactions are sent with `from` set and no local signer, so the provider
/// endpoint signs them (`eth_sendTransaction`).
#[derive(Debug, Clone, Default)]
pub struct RpcWalletSource {
    url: Option<Url>,
}

impl RpcWalletSource {
    /// Create a source for the given endpoint. A malformed URL is treated as
    /// no provider at all.
    pub fn new(rpc_url: Option<&str>) -> Self {
        let url = rpc_url.and_then(|raw| match raw.parse::<Url>() {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(url = raw, error = %e, "Ignoring malformed wallet provider URL");
                None
            }
        });
        Self { url }
    }

    /// Whether a provider endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

impl WalletSource for RpcWalletSource {
    type Wallet = DynProvider;

    fn acquire(&self) -> Option<DynProvider> {
        let url = self.url.clone()?;
        Some(ProviderBuilder::new().connect_http(url).erased())
    }
}

impl WalletHandle for DynProvider {
    type Contract = RwaTokenContract<DynProvider>;

    fn bind(&self, address: Address) -> Self::Contract {
        RwaTokenContract::new(address, self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_source_reports_provider_unavailable() {
        let client = ChainClient::new(RpcWalletSource::new(None));
        assert!(matches!(
            client.acquire_provider(),
            Err(ChainError::ProviderUnavailable)
        ));
    }

    #[test]
    fn malformed_url_is_treated_as_missing() {
        let source = RpcWalletSource::new(Some("not a url"));
        assert!(!source.is_configured());
        assert!(source.acquire().is_none());
    }

    #[tokio::test]
    async fn configured_source_yields_handle_without_network() {
        let client = ChainClient::new(RpcWalletSource::new(Some("http://127.0.0.1:8545")));
        assert!(client.source().is_configured());
        assert!(client.acquire_provider().is_ok());
    }
}
