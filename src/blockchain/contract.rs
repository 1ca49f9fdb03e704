// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RWA token contract interface and binding.

use std::future::Future;
use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionReceipt,
    sol,
};

use super::client::{ChainClient, WalletHandle, WalletSource};
use super::error::ChainError;
use super::types::{GasSettings, TxReceipt};

// Interface description of the deployed RWA token contract
sol! {
    #[sol(rpc)]
    interface IRwaToken {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function buyTokens(address buyer, uint256 amount) external;
        function createRealEstate(string name, string location, uint256 totalValue) external;
    }
}

/// Callable surface of a bound token contract.
///
/// Amounts are already in the smallest unit. Write methods resolve once the
/// transaction receipt is available.
pub trait TokenContract: Send + Sync {
    fn balance_of(&self, account: Address) -> impl Future<Output = Result<U256, ChainError>> + Send;

    fn transfer(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;

    fn buy_tokens(
        &self,
        from: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;

    fn create_real_estate(
        &self,
        from: Address,
        name: &str,
        location: &str,
        total_value: U256,
        gas: GasSettings,
    ) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;
}

/// RWA token contract bound to an alloy provider.
pub struct RwaTokenContract<P> {
    contract: IRwaToken::IRwaTokenInstance<P>,
}

impl<P: Provider + Clone> RwaTokenContract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            contract: IRwaToken::new(address, provider),
        }
    }

    pub fn address(&self) -> &Address {
        self.contract.address()
    }
}

fn call_failure(e: impl std::fmt::Display) -> ChainError {
    ChainError::from_call_failure(e.to_string())
}

fn to_receipt(receipt: TransactionReceipt) -> TxReceipt {
    TxReceipt {
        tx_hash: format!("{:?}", receipt.transaction_hash),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used as u64,
        success: receipt.status(),
    }
}

impl<P: Provider + Clone + Send + Sync + 'static> TokenContract for RwaTokenContract<P> {
    async fn balance_of(&self, account: Address) -> Result<U256, ChainError> {
        self.contract
            .balanceOf(account)
            .call()
            .await
            .map_err(call_failure)
    }

    async fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<TxReceipt, ChainError> {
        let receipt = self
            .contract
            .transfer(to, amount)
            .from(from)
            .send()
            .await
            .map_err(call_failure)?
            .get_receipt()
            .await
            .map_err(call_failure)?;
        Ok(to_receipt(receipt))
    }

    async fn buy_tokens(&self, from: Address, amount: U256) -> Result<TxReceipt, ChainError> {
        let receipt = self
            .contract
            .buyTokens(from, amount)
            .from(from)
            .send()
            .await
            .map_err(call_failure)?
            .get_receipt()
            .await
            .map_err(call_failure)?;
        Ok(to_receipt(receipt))
    }

    async fn create_real_estate(
        &self,
        from: Address,
        name: &str,
        location: &str,
        total_value: U256,
        gas: GasSettings,
    ) -> Result<TxReceipt, ChainError> {
        let receipt = self
            .contract
            .createRealEstate(name.to_string(), location.to_string(), total_value)
            .from(from)
            .gas(gas.gas_limit)
            .gas_price(gas.gas_price)
            .send()
            .await
            .map_err(call_failure)?
            .get_receipt()
            .await
            .map_err(call_failure)?;
        Ok(to_receipt(receipt))
    }
}

/// Binds the configured contract address to a freshly acquired wallet.
pub struct TokenContractProxy<S> {
    client: ChainClient<S>,
    contract_address: Option<String>,
}

impl<S: WalletSource> TokenContractProxy<S> {
    /// The address comes straight from configuration and is only parsed when
    /// a call binds it.
    pub fn new(client: ChainClient<S>, contract_address: Option<String>) -> Self {
        Self {
            client,
            contract_address,
        }
    }

    /// Acquire the wallet and bind the contract. No caching: every call
    /// re-resolves the wallet.
    pub fn bind(&self) -> Result<<S::Wallet as WalletHandle>::Contract, ChainError> {
        let wallet = self.client.acquire_provider()?;
        let address = self.contract_address()?;
        Ok(wallet.bind(address))
    }

    pub fn client(&self) -> &ChainClient<S> {
        &self.client
    }

    fn contract_address(&self) -> Result<Address, ChainError> {
        let raw = self
            .contract_address
            .as_deref()
            .ok_or_else(|| ChainError::ContractCall("Contract address is not configured".to_string()))?;
        Address::from_str(raw).map_err(|e| {
            ChainError::ContractCall(format!("Configured contract address `{raw}` is invalid: {e}"))
        })
    }
}
