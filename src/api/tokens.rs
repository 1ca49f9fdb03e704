// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RWA token endpoints.

use alloy::primitives::U256;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    blockchain::{ChainError, TokenBalance, TxReceipt, TOKEN_DECIMALS},
    error::ApiError,
    state::AppState,
};

/// Request to transfer tokens.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Sender address (the connected account)
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Amount in human-readable format (e.g., "1.5")
    pub amount: String,
}

/// Request to buy tokens.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuyTokensRequest {
    /// Buyer address (the connected account)
    pub from: String,
    /// Amount in human-readable format (e.g., "1.5")
    pub amount: String,
}

/// Request to register a tokenized property.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRealEstateRequest {
    /// Sender address (must be a valid Ethereum address)
    pub from: String,
    /// Property name
    pub name: String,
    /// Property location
    pub location: String,
    /// Total value as a base-10 integer, passed to the contract unchanged
    pub total_value: String,
}

/// Get the token balance of an account.
#[utoipa::path(
    get,
    path = "/v1/tokens/{address}/balance",
    tag = "Tokens",
    params(
        ("address" = String, Path, description = "Account address")
    ),
    responses(
        (status = 200, description = "Balance retrieved", body = TokenBalance),
        (status = 502, description = "Contract call failed"),
        (status = 503, description = "Wallet provider unavailable")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<TokenBalance>, ApiError> {
    let balance = state.tokens.get_balance(&address).await?;
    Ok(Json(TokenBalance {
        address,
        balance,
        decimals: TOKEN_DECIMALS,
    }))
}

/// Transfer tokens to another account.
#[utoipa::path(
    post,
    path = "/v1/tokens/transfer",
    tag = "Tokens",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer mined", body = TxReceipt),
        (status = 400, description = "Invalid amount"),
        (status = 409, description = "Rejected in wallet or already pending"),
        (status = 503, description = "Wallet provider unavailable")
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TxReceipt>, ApiError> {
    let receipt = state
        .tokens
        .transfer(&request.from, &request.to, &request.amount)
        .await?;
    Ok(Json(receipt))
}

/// Buy tokens for the connected account.
#[utoipa::path(
    post,
    path = "/v1/tokens/buy",
    tag = "Tokens",
    request_body = BuyTokensRequest,
    responses(
        (status = 200, description = "Purchase mined", body = TxReceipt),
        (status = 400, description = "Invalid amount"),
        (status = 409, description = "Rejected in wallet or already pending"),
        (status = 503, description = "Wallet provider unavailable")
    )
)]
pub async fn buy_tokens(
    State(state): State<AppState>,
    Json(request): Json<BuyTokensRequest>,
) -> Result<Json<TxReceipt>, ApiError> {
    let receipt = state.tokens.buy_tokens(&request.from, &request.amount).await?;
    Ok(Json(receipt))
}

/// Register a new tokenized property.
#[utoipa::path(
    post,
    path = "/v1/properties",
    tag = "Tokens",
    request_body = CreateRealEstateRequest,
    responses(
        (status = 201, description = "Property registered", body = TxReceipt),
        (status = 400, description = "Invalid sender address or total value"),
        (status = 409, description = "Rejected in wallet or already pending"),
        (status = 503, description = "Wallet provider unavailable")
    )
)]
pub async fn create_real_estate(
    State(state): State<AppState>,
    Json(request): Json<CreateRealEstateRequest>,
) -> Result<(StatusCode, Json<TxReceipt>), ApiError> {
    let total_value = parse_total_value(&request.total_value)?;

    let receipt = state
        .tokens
        .create_real_estate(&request.from, &request.name, &request.location, total_value)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

fn parse_total_value(raw: &str) -> Result<U256, ChainError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChainError::InvalidAmount(format!("`{raw}` is not a base-10 integer")));
    }
    U256::from_str_radix(digits, 10).map_err(|_| ChainError::InvalidAmount("Total value overflow".to_string()))
}
