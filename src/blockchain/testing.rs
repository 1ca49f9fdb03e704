// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recording wallet used by unit tests in place of a live provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, U256};

use super::client::{ChainClient, WalletHandle, WalletSource};
use super::contract::{TokenContract, TokenContractProxy};
use super::error::ChainError;
use super::interactions::TokenInteractions;
use super::types::{GasSettings, TxReceipt};

pub const CONTRACT: &str = "0x76568BEd5Acf1A5Cd888773C8cAe9ea2a9131A63";
pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

/// A contract method invocation as seen by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    BalanceOf {
        account: Address,
    },
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },
    BuyTokens {
        from: Address,
        amount: U256,
    },
    CreateRealEstate {
        from: Address,
        name: String,
        location: String,
        total_value: U256,
        gas: GasSettings,
    },
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    bound: Vec<Address>,
    balances: HashMap<Address, U256>,
    failure: Option<String>,
    latency: Option<Duration>,
}

/// Wallet that records every call and answers from canned state.
#[derive(Clone, Default)]
pub struct MockWallet {
    state: Arc<Mutex<MockState>>,
}

impl MockWallet {
    pub fn with_balance(self, account: &str, raw: U256) -> Self {
        let account = account.parse().expect("test address");
        self.state.lock().unwrap().balances.insert(account, raw);
        self
    }

    /// Make every subsequent call fail with this provider message.
    pub fn failing_with(self, message: &str) -> Self {
        self.state.lock().unwrap().failure = Some(message.to_string());
        self
    }

    /// Delay every call, to keep writes in flight.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.state.lock().unwrap().latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn bound_addresses(&self) -> Vec<Address> {
        self.state.lock().unwrap().bound.clone()
    }

    async fn record(&self, call: RecordedCall) -> Result<(), ChainError> {
        let latency = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            state.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match self.state.lock().unwrap().failure.clone() {
            Some(message) => Err(ChainError::from_call_failure(message)),
            None => Ok(()),
        }
    }

    fn receipt(&self) -> TxReceipt {
        let n = self.state.lock().unwrap().calls.len();
        TxReceipt {
            tx_hash: format!("0x{n:064x}"),
            block_number: Some(100 + n as u64),
            gas_used: 21_000,
            success: true,
        }
    }
}

impl WalletHandle for MockWallet {
    type Contract = MockWallet;

    fn bind(&self, address: Address) -> MockWallet {
        self.state.lock().unwrap().bound.push(address);
        self.clone()
    }
}

impl TokenContract for MockWallet {
    async fn balance_of(&self, account: Address) -> Result<U256, ChainError> {
        self.record(RecordedCall::BalanceOf { account }).await?;
        let balance = self.state.lock().unwrap().balances.get(&account).copied();
        Ok(balance.unwrap_or(U256::ZERO))
    }

    async fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<TxReceipt, ChainError> {
        self.record(RecordedCall::Transfer { from, to, amount }).await?;
        Ok(self.receipt())
    }

    async fn buy_tokens(&self, from: Address, amount: U256) -> Result<TxReceipt, ChainError> {
        self.record(RecordedCall::BuyTokens { from, amount }).await?;
        Ok(self.receipt())
    }

    async fn create_real_estate(
        &self,
        from: Address,
        name: &str,
        location: &str,
        total_value: U256,
        gas: GasSettings,
    ) -> Result<TxReceipt, ChainError> {
        self.record(RecordedCall::CreateRealEstate {
            from,
            name: name.to_string(),
            location: location.to_string(),
            total_value,
            gas,
        })
        .await?;
        Ok(self.receipt())
    }
}

/// Wallet source that is either connected to a [`MockWallet`] or empty.
#[derive(Default)]
pub struct MockSource {
    wallet: Option<MockWallet>,
    acquisitions: AtomicUsize,
}

impl MockSource {
    pub fn connected(wallet: MockWallet) -> Self {
        Self {
            wallet: Some(wallet),
            acquisitions: AtomicUsize::new(0),
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl WalletSource for MockSource {
    type Wallet = MockWallet;

    fn acquire(&self) -> Option<MockWallet> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.wallet.clone()
    }
}

/// Interactions wired to `wallet` and the test contract address.
pub fn interactions(wallet: &MockWallet) -> TokenInteractions<MockSource> {
    interactions_with(MockSource::connected(wallet.clone()))
}

pub fn interactions_with(source: MockSource) -> TokenInteractions<MockSource> {
    TokenInteractions::new(TokenContractProxy::new(
        ChainClient::new(source),
        Some(CONTRACT.to_string()),
    ))
}
