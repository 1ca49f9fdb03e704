// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::{ChainClient, RpcWalletSource, TokenContractProxy, TokenInteractions};
use crate::config::AppConfig;
use crate::property::{DraftSessions, PreviewStore};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenInteractions<RpcWalletSource>>,
    pub drafts: Arc<DraftSessions>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let source = RpcWalletSource::new(config.wallet_provider_url.as_deref());
        let proxy = TokenContractProxy::new(ChainClient::new(source), config.contract_address.clone());

        Self {
            tokens: Arc::new(TokenInteractions::new(proxy)),
            drafts: Arc::new(DraftSessions::new(PreviewStore::new())),
            config: Arc::new(config),
        }
    }

    pub fn previews(&self) -> &PreviewStore {
        self.drafts.previews()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
