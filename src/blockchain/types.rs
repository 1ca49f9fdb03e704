// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Decimals of the RWA token (denomination factor 10^18).
pub const TOKEN_DECIMALS: u8 = 18;

/// Fixed gas budget for a `createRealEstate` transaction.
pub const CREATE_REAL_ESTATE_GAS: GasSettings = GasSettings {
    gas_limit: 1_000_000,
    // 30 gwei
    gas_price: 30_000_000_000,
};

/// Explicit gas limit and legacy gas price for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    /// Gas limit
    pub gas_limit: u64,
    /// Gas price in wei
    pub gas_price: u128,
}

/// Transaction receipt after inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where transaction was included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas actually used
    pub gas_used: u64,
    /// Whether the transaction was successful
    pub success: bool,
}

/// Token balance of an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenBalance {
    /// Account address as supplied by the caller
    pub address: String,
    /// Balance in the display denomination (e.g., "2.5")
    pub balance: String,
    /// Number of decimals
    pub decimals: u8,
}
