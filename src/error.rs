// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::blockchain::ChainError;
use crate::property::{FormError, SessionError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_code: &'static str,
}

/// JSON error body.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// User-facing message
    error: String,
    /// Machine-readable code
    error_code: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}

impl From<ChainError> for ApiError {
    fn from(e: ChainError) -> Self {
        let status = match &e {
            ChainError::ProviderUnavailable | ChainError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChainError::InvalidAddress(_) | ChainError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            ChainError::OperationInProgress(_) | ChainError::UserRejected(_) => StatusCode::CONFLICT,
            ChainError::InsufficientFunds(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ChainError::ContractCall(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, e.error_code(), e.user_message())
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound => ApiError::not_found("Draft not found"),
            SessionError::Form(FormError::Busy) => {
                Self::new(StatusCode::CONFLICT, "submission_in_progress", FormError::Busy.to_string())
            }
            SessionError::Form(FormError::Closed) => {
                Self::new(StatusCode::CONFLICT, "form_closed", FormError::Closed.to_string())
            }
            SessionError::Form(FormError::Invalid(inner)) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_draft", inner.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.error_code.to_string(),
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::WriteOp;
    use crate::property::DraftError;
    use axum::body::to_bytes;

    #[test]
    fn not_found_sets_status_and_code() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.error_code, "not_found");
        assert_eq!(nf.message, "missing");
    }

    #[test]
    fn chain_errors_map_to_status() {
        let cases = [
            (ChainError::ProviderUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ChainError::InvalidAddress("x".into()), StatusCode::BAD_REQUEST),
            (ChainError::OperationInProgress(WriteOp::Transfer), StatusCode::CONFLICT),
            (ChainError::InsufficientFunds("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ChainError::ContractCall("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn session_errors_map_to_status() {
        assert_eq!(ApiError::from(SessionError::NotFound).status, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(SessionError::Form(FormError::Busy)).error_code,
            "submission_in_progress"
        );
        let invalid = ApiError::from(SessionError::Form(FormError::Invalid(DraftError::MissingField("title"))));
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.message, "`title` is required");
    }

    #[tokio::test]
    async fn into_response_hides_provider_detail() {
        let response = ApiError::from(ChainError::ContractCall("node panic at 0xdead".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "contract_call_error");
        assert!(!body["error"].as_str().unwrap().contains("0xdead"));
    }
}
