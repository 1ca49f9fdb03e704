// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Estate Protocol - Real Estate Tokenization Service
//!
//! This crate wraps the RWA token contract behind an HTTP API and runs the
//! new property submission workflow. Transactions are signed by the connected
//! wallet provider; no keys are held here.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - RWA token contract integration
//! - `property` - Property drafts, image previews and submission
//! - `config` - Environment configuration

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod property;
pub mod state;
