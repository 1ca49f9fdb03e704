// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-flight guard for state-changing contract calls.
//!
//! A write holds a permit keyed by (operation, sender) until it resolves. A
//! second identical write while the permit is held is rejected instead of
//! producing a duplicate on-chain transaction.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use alloy::primitives::Address;

use super::error::{ChainError, WriteOp};

type Key = (WriteOp, Address);

/// Registry of writes currently awaiting their receipt.
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    active: Arc<Mutex<HashSet<Key>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `op` from `sender`.
    pub fn try_begin(&self, op: WriteOp, sender: Address) -> Result<InFlightPermit, ChainError> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert((op, sender)) {
            return Err(ChainError::OperationInProgress(op));
        }
        Ok(InFlightPermit {
            registry: self.active.clone(),
            key: (op, sender),
        })
    }

    /// Whether a write for `op` from `sender` is pending.
    pub fn is_active(&self, op: WriteOp, sender: Address) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(op, sender))
    }
}

/// Releases its slot when dropped, on every exit path of the write.
pub struct InFlightPermit {
    registry: Arc<Mutex<HashSet<Key>>>,
    key: Key,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn second_identical_write_is_rejected() {
        let registry = InFlightRegistry::new();
        let _permit = registry.try_begin(WriteOp::BuyTokens, sender(1)).unwrap();

        let err = registry.try_begin(WriteOp::BuyTokens, sender(1)).err().unwrap();
        assert_eq!(err, ChainError::OperationInProgress(WriteOp::BuyTokens));
    }

    #[test]
    fn different_operation_or_sender_is_independent() {
        let registry = InFlightRegistry::new();
        let _a = registry.try_begin(WriteOp::BuyTokens, sender(1)).unwrap();

        assert!(registry.try_begin(WriteOp::Transfer, sender(1)).is_ok());
        assert!(registry.try_begin(WriteOp::BuyTokens, sender(2)).is_ok());
    }

    #[test]
    fn dropping_permit_releases_slot() {
        let registry = InFlightRegistry::new();
        let permit = registry.try_begin(WriteOp::CreateRealEstate, sender(3)).unwrap();
        assert!(registry.is_active(WriteOp::CreateRealEstate, sender(3)));

        drop(permit);
        assert!(!registry.is_active(WriteOp::CreateRealEstate, sender(3)));
        assert!(registry.try_begin(WriteOp::CreateRealEstate, sender(3)).is_ok());
    }
}
