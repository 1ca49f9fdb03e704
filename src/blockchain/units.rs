// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between display amounts and the token's smallest unit.

use alloy::primitives::U256;

use super::error::ChainError;

/// Parse a human-readable amount to the smallest unit.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for the RWA token)
///
/// # Returns
/// * `Ok(U256)` - Amount in smallest unit
/// * `Err(ChainError::InvalidAmount)` - Negative, malformed, too precise or overflowing
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ChainError> {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(ChainError::InvalidAmount("Amount is empty".to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChainError::InvalidAmount(format!(
            "`{amount}` is not a non-negative decimal number"
        )));
    }
    if fraction.len() > decimals as usize {
        return Err(ChainError::InvalidAmount(format!(
            "Too many decimal places (max {decimals})"
        )));
    }

    // Pad the fraction so the concatenation is already in the smallest unit
    let digits = format!("{whole}{fraction:0<width$}", width = decimals as usize);
    U256::from_str_radix(&digits, 10)
        .map_err(|_| ChainError::InvalidAmount("Amount overflow".to_string()))
}

/// Format an amount in the smallest unit to a human-readable amount.
///
/// Keeps full precision so that `parse_amount(format_amount(x))` returns `x`.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}
