// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local syntax check for Ethereum addresses.

use std::str::FromStr;

use alloy::primitives::Address;

use super::error::ChainError;

/// Validate an Ethereum address and parse it.
///
/// Accepts 40 hex characters with an optional `0x` prefix. All-lowercase and
/// all-uppercase forms are accepted as-is; mixed case must carry a valid
/// EIP-55 checksum.
pub fn validate_address(raw: &str) -> Result<Address, ChainError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);

    if digits.len() != 40 {
        return Err(ChainError::InvalidAddress(format!(
            "`{raw}` must be 40 hex characters (optionally 0x-prefixed)"
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ChainError::InvalidAddress(format!(
            "`{raw}` must contain only hex characters"
        )));
    }

    let address =
        Address::from_str(digits).map_err(|e| ChainError::InvalidAddress(e.to_string()))?;

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if checksummed[2..] != *digits {
            return Err(ChainError::InvalidAddress(format!(
                "`{raw}` has an invalid checksum"
            )));
        }
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn accepts_checksummed_and_single_case() {
        assert!(validate_address(CHECKSUMMED).is_ok());
        assert!(validate_address(&CHECKSUMMED.to_lowercase()).is_ok());
        assert!(validate_address("0x52908400098527886E0F7030069857D2E4169EE7").is_ok());
        assert!(validate_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
    }

    #[test]
    fn rejects_bad_checksum() {
        let err = validate_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD").unwrap_err();
        assert!(matches!(err, ChainError::InvalidAddress(_)));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "not-an-address",
            "0x",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaedff",
            "0xzaaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(validate_address(bad).is_err(), "expected `{bad}` to be rejected");
        }
    }

    #[test]
    fn parses_to_same_address_regardless_of_case() {
        let upper = validate_address(CHECKSUMMED).unwrap();
        let lower = validate_address(&CHECKSUMMED.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
    }
}
