// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RWA token contract integration.
//!
//! This module provides functionality for:
//! - Acquiring the connected wallet provider
//! - Binding the token contract interface to it
//! - Balance queries, transfers, purchases and property registration

pub mod address;
pub mod client;
pub mod contract;
pub mod error;
pub mod guard;
pub mod interactions;
pub mod types;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use address::validate_address;
pub use client::{ChainClient, RpcWalletSource, WalletHandle, WalletSource};
pub use contract::{RwaTokenContract, TokenContract, TokenContractProxy};
pub use error::{ChainError, WriteOp};
pub use guard::{InFlightPermit, InFlightRegistry};
pub use interactions::TokenInteractions;
pub use types::*;
pub use units::{format_amount, parse_amount};
