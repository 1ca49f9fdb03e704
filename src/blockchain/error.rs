// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy for token contract interactions.
//!
//! Underlying provider and contract failures arrive as opaque text. They are
//! classified by signature into the variants below so callers can pick a
//! retry or messaging policy; anything unrecognised stays [`ChainError::ContractCall`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// State-changing contract operations guarded against double submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WriteOp {
    Transfer,
    BuyTokens,
    CreateRealEstate,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteOp::Transfer => "transfer",
            WriteOp::BuyTokens => "buyTokens",
            WriteOp::CreateRealEstate => "createRealEstate",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during token contract operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// No wallet provider is connected.
    #[error("Wallet provider not found. Please connect a wallet provider.")]
    ProviderUnavailable,

    /// A sender address failed the local syntax check.
    #[error("Invalid Ethereum address: {0}")]
    InvalidAddress(String),

    /// A display amount could not be converted to the smallest unit.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The same write for the same sender is still pending.
    #[error("A {0} request from this account is already pending")]
    OperationInProgress(WriteOp),

    /// The wallet user declined the request.
    #[error("Request rejected by wallet: {0}")]
    UserRejected(String),

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Transport failure or timeout talking to the provider.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other contract or provider failure.
    #[error("Contract call failed: {0}")]
    ContractCall(String),
}

const USER_REJECTED_SIGNATURES: &[&str] = &[
    "user rejected",
    "user denied",
    "rejected the request",
    "code: 4001",
    "\"code\":4001",
];

const INSUFFICIENT_FUNDS_SIGNATURES: &[&str] = &[
    "insufficient funds",
    "insufficient balance",
    "exceeds balance",
];

const NETWORK_SIGNATURES: &[&str] = &[
    "timed out",
    "timeout",
    "connection refused",
    "connection reset",
    "error sending request",
    "dns error",
    "network unreachable",
];

impl ChainError {
    /// Classify an underlying provider or contract failure by its message.
    pub fn from_call_failure(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let lowered = detail.to_ascii_lowercase();
        let matches = |signatures: &[&str]| signatures.iter().any(|s| lowered.contains(s));

        if matches(USER_REJECTED_SIGNATURES) {
            ChainError::UserRejected(detail)
        } else if matches(INSUFFICIENT_FUNDS_SIGNATURES) {
            ChainError::InsufficientFunds(detail)
        } else if matches(NETWORK_SIGNATURES) {
            ChainError::Network(detail)
        } else {
            ChainError::ContractCall(detail)
        }
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChainError::ProviderUnavailable => "provider_unavailable",
            ChainError::InvalidAddress(_) => "invalid_address",
            ChainError::InvalidAmount(_) => "invalid_amount",
            ChainError::OperationInProgress(_) => "operation_in_progress",
            ChainError::UserRejected(_) => "user_rejected",
            ChainError::InsufficientFunds(_) => "insufficient_funds",
            ChainError::Network(_) => "network_error",
            ChainError::ContractCall(_) => "contract_call_error",
        }
    }

    /// Message safe to show to the end user. Never includes raw provider detail.
    pub fn user_message(&self) -> String {
        match self {
            ChainError::ProviderUnavailable => {
                "No wallet provider found. Please install or connect a wallet.".to_string()
            }
            ChainError::InvalidAddress(_) => "The wallet address is not valid.".to_string(),
            ChainError::InvalidAmount(_) => {
                "The amount must be a non-negative number with at most 18 decimals.".to_string()
            }
            ChainError::OperationInProgress(op) => {
                format!("A {op} request is already pending. Please wait for it to finish.")
            }
            ChainError::UserRejected(_) => "The request was rejected in your wallet.".to_string(),
            ChainError::InsufficientFunds(_) => {
                "Insufficient funds to complete this transaction.".to_string()
            }
            ChainError::Network(_) => {
                "Network error while contacting the blockchain. Please try again.".to_string()
            }
            ChainError::ContractCall(_) => "The transaction failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_user_rejection() {
        let err = ChainError::from_call_failure("MetaMask Tx Signature: User denied transaction signature.");
        assert!(matches!(err, ChainError::UserRejected(_)));

        let err = ChainError::from_call_failure("server returned an error response: error code 4001: rejected, code: 4001");
        assert_eq!(err.error_code(), "user_rejected");
    }

    #[test]
    fn classifies_insufficient_funds() {
        let err = ChainError::from_call_failure("insufficient funds for gas * price + value");
        assert!(matches!(err, ChainError::InsufficientFunds(_)));

        let err = ChainError::from_call_failure("execution reverted: ERC20: transfer amount exceeds balance");
        assert!(matches!(err, ChainError::InsufficientFunds(_)));
    }

    #[test]
    fn classifies_network_failures() {
        let err = ChainError::from_call_failure("error sending request for url (http://localhost:8545/)");
        assert!(matches!(err, ChainError::Network(_)));

        let err = ChainError::from_call_failure("operation timed out");
        assert!(matches!(err, ChainError::Network(_)));
    }

    #[test]
    fn unknown_failures_stay_contract_call() {
        let err = ChainError::from_call_failure("execution reverted: Ownable: caller is not the owner");
        assert_eq!(
            err,
            ChainError::ContractCall("execution reverted: Ownable: caller is not the owner".to_string())
        );
    }

    #[test]
    fn user_message_hides_provider_detail() {
        let err = ChainError::ContractCall("internal node stack trace".to_string());
        assert!(!err.user_message().contains("stack trace"));
        assert_eq!(
            ChainError::OperationInProgress(WriteOp::BuyTokens).user_message(),
            "A buyTokens request is already pending. Please wait for it to finish."
        );
    }
}
