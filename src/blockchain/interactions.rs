// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token interaction methods.
//!
//! Each operation binds a fresh contract handle, invokes exactly one contract
//! method and maps the result. Failures are logged here and returned to the
//! caller unchanged; nothing is retried.

use std::str::FromStr;

use alloy::primitives::{Address, U256};
use tracing::{error, info};

use super::address::validate_address;
use super::client::WalletSource;
use super::contract::{TokenContract, TokenContractProxy};
use super::error::{ChainError, WriteOp};
use super::guard::InFlightRegistry;
use super::types::{TxReceipt, CREATE_REAL_ESTATE_GAS, TOKEN_DECIMALS};
use super::units::{format_amount, parse_amount};

/// RWA token operations on top of a [`TokenContractProxy`].
pub struct TokenInteractions<S> {
    proxy: TokenContractProxy<S>,
    in_flight: InFlightRegistry,
}

/// Account arguments are not checked locally; the binding layer rejects what
/// it cannot encode, which surfaces as a contract call failure.
fn encode_account(raw: &str) -> Result<Address, ChainError> {
    Address::from_str(raw)
        .map_err(|e| ChainError::ContractCall(format!("Cannot encode account `{raw}`: {e}")))
}

impl<S: WalletSource> TokenInteractions<S> {
    pub fn new(proxy: TokenContractProxy<S>) -> Self {
        Self {
            proxy,
            in_flight: InFlightRegistry::new(),
        }
    }

    pub fn proxy(&self) -> &TokenContractProxy<S> {
        &self.proxy
    }

    pub fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }

    /// Get the token balance of `address` in the display denomination.
    pub async fn get_balance(&self, address: &str) -> Result<String, ChainError> {
        let result = async {
            let contract = self.proxy.bind()?;
            let account = encode_account(address)?;
            let raw = contract.balance_of(account).await?;
            Ok::<_, ChainError>(format_amount(raw, TOKEN_DECIMALS))
        }
        .await;

        result.inspect_err(|e| error!(address, error = %e, "Error fetching balance"))
    }

    /// Transfer `amount` (display denomination) from `from` to `to`.
    pub async fn transfer(&self, from: &str, to: &str, amount: &str) -> Result<TxReceipt, ChainError> {
        let result = async {
            let contract = self.proxy.bind()?;
            let value = parse_amount(amount, TOKEN_DECIMALS)?;
            let sender = encode_account(from)?;
            let recipient = encode_account(to)?;

            let _permit = self.in_flight.try_begin(WriteOp::Transfer, sender)?;
            contract.transfer(sender, recipient, value).await
        }
        .await;

        match &result {
            Ok(receipt) => info!(from, to, amount, tx_hash = %receipt.tx_hash, "Tokens transferred"),
            Err(e) => error!(from, to, amount, error = %e, "Error transferring tokens"),
        }
        result
    }

    /// Buy `amount` (display denomination) tokens for `from`.
    ///
    /// Two distinct calls still produce two purchases; only a call that
    /// overlaps a pending one for the same buyer is rejected.
    pub async fn buy_tokens(&self, from: &str, amount: &str) -> Result<TxReceipt, ChainError> {
        let result = async {
            let contract = self.proxy.bind()?;
            let value = parse_amount(amount, TOKEN_DECIMALS)?;
            let buyer = encode_account(from)?;

            let _permit = self.in_flight.try_begin(WriteOp::BuyTokens, buyer)?;
            contract.buy_tokens(buyer, value).await
        }
        .await;

        match &result {
            Ok(receipt) => info!(from, amount, tx_hash = %receipt.tx_hash, "Tokens purchased"),
            Err(e) => error!(from, amount, error = %e, "Error buying tokens"),
        }
        result
    }

    /// Register a new tokenized property.
    ///
    /// `from` is validated before the wallet is even probed; an invalid sender
    /// never reaches the provider. Gas limit and price are fixed.
    pub async fn create_real_estate(
        &self,
        from: &str,
        name: &str,
        location: &str,
        total_value: U256,
    ) -> Result<TxReceipt, ChainError> {
        let result = async {
            let sender = validate_address(from)?;
            let contract = self.proxy.bind()?;

            let _permit = self.in_flight.try_begin(WriteOp::CreateRealEstate, sender)?;
            contract
                .create_real_estate(sender, name, location, total_value, CREATE_REAL_ESTATE_GAS)
                .await
        }
        .await;

        match &result {
            Ok(receipt) => info!(from, name, location, tx_hash = %receipt.tx_hash, "Real estate created"),
            Err(e) => error!(from, name, location, error = %e, "Error creating real estate"),
        }
        result
    }
}
