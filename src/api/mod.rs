// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::{TokenBalance, TxReceipt},
    error::ErrorBody,
    property::{DraftFields, DraftView, FieldChange, FormState, PreviewMeta, SubmissionResult, SubmitOutcome},
    state::AppState,
};

pub mod drafts;
pub mod health;
pub mod previews;
pub mod tokens;

/// Image uploads arrive base64-encoded in JSON.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/tokens/{address}/balance", get(tokens::get_balance))
        .route("/tokens/transfer", post(tokens::transfer))
        .route("/tokens/buy", post(tokens::buy_tokens))
        .route("/properties", post(tokens::create_real_estate))
        .route("/drafts", post(drafts::open_draft))
        .route(
            "/drafts/{draft_id}",
            get(drafts::get_draft)
                .patch(drafts::update_field)
                .delete(drafts::dismiss_draft),
        )
        .route("/drafts/{draft_id}/open", post(drafts::reopen_draft))
        .route("/drafts/{draft_id}/images", post(drafts::attach_images))
        .route(
            "/drafts/{draft_id}/images/{index}",
            delete(drafts::remove_image),
        )
        .route("/drafts/{draft_id}/submit", post(drafts::submit_draft))
        .route("/previews/{preview_id}", get(previews::get_preview))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        health::readiness,
        tokens::get_balance,
        tokens::transfer,
        tokens::buy_tokens,
        tokens::create_real_estate,
        drafts::open_draft,
        drafts::get_draft,
        drafts::update_field,
        drafts::dismiss_draft,
        drafts::reopen_draft,
        drafts::attach_images,
        drafts::remove_image,
        drafts::submit_draft,
        previews::get_preview
    ),
    components(
        schemas(
            TokenBalance,
            TxReceipt,
            tokens::TransferRequest,
            tokens::BuyTokensRequest,
            tokens::CreateRealEstateRequest,
            FieldChange,
            DraftFields,
            DraftView,
            FormState,
            PreviewMeta,
            SubmissionResult,
            SubmitOutcome,
            drafts::ImageUpload,
            drafts::AttachImagesRequest,
            drafts::SubmitDraftRequest,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Tokens", description = "RWA token contract operations"),
        (name = "Drafts", description = "New property submission forms")
    )
)]
struct ApiDoc;
