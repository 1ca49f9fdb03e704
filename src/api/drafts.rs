// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Property draft endpoints.
//!
//! Each draft is one open submission form. Edits are applied one field at a
//! time, images are uploaded base64-encoded and served back through
//! `/v1/previews/{preview_id}` until the draft drops them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64ct::{Base64, Encoding};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::ApiError,
    property::{DraftView, FieldChange, SelectedFile, SubmitOutcome},
    state::AppState,
};

/// One selected image.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type, must be an `image/*` type
    pub content_type: String,
    /// Standard base64 file content
    pub data: String,
}

/// Request to attach images to a draft.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttachImagesRequest {
    pub files: Vec<ImageUpload>,
}

/// Request to submit a draft.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitDraftRequest {
    /// Connected account that sends `createRealEstate`
    pub from: String,
}

impl ImageUpload {
    fn decode(self) -> Result<SelectedFile, ApiError> {
        if !self.content_type.starts_with("image/") {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_image",
                format!("`{}` is not an image type", self.content_type),
            ));
        }
        let bytes = Base64::decode_vec(self.data.trim()).map_err(|_| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_image",
                format!("`{}` is not valid base64", self.file_name),
            )
        })?;
        Ok(SelectedFile {
            file_name: self.file_name,
            content_type: self.content_type,
            bytes,
        })
    }
}

/// Open a new property draft.
#[utoipa::path(
    post,
    path = "/v1/drafts",
    tag = "Drafts",
    responses(
        (status = 201, description = "Draft opened", body = DraftView)
    )
)]
pub async fn open_draft(State(state): State<AppState>) -> (StatusCode, Json<DraftView>) {
    (StatusCode::CREATED, Json(state.drafts.open().await))
}

/// Get a draft.
#[utoipa::path(
    get,
    path = "/v1/drafts/{draft_id}",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Draft", body = DraftView),
        (status = 404, description = "Draft not found")
    )
)]
pub async fn get_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftView>, ApiError> {
    state
        .drafts
        .view(draft_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Draft not found"))
}

/// Apply a field change.
#[utoipa::path(
    patch,
    path = "/v1/drafts/{draft_id}",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    request_body = FieldChange,
    responses(
        (status = 200, description = "Field updated", body = DraftView),
        (status = 404, description = "Draft not found"),
        (status = 409, description = "A submission is in progress"),
        (status = 422, description = "Invalid field or value")
    )
)]
pub async fn update_field(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(change): Json<FieldChange>,
) -> Result<Json<DraftView>, ApiError> {
    Ok(Json(state.drafts.apply_change(draft_id, &change).await?))
}

/// Discard a draft, cancelling any pending submission.
#[utoipa::path(
    delete,
    path = "/v1/drafts/{draft_id}",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 204, description = "Draft dismissed"),
        (status = 404, description = "Draft not found")
    )
)]
pub async fn dismiss_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.drafts.dismiss(draft_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Draft not found"))
    }
}

/// Reopen a draft closed by a successful submission.
#[utoipa::path(
    post,
    path = "/v1/drafts/{draft_id}/open",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Draft reopened", body = DraftView),
        (status = 404, description = "Draft not found")
    )
)]
pub async fn reopen_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftView>, ApiError> {
    Ok(Json(state.drafts.reopen(draft_id).await?))
}

/// Append images to a draft.
#[utoipa::path(
    post,
    path = "/v1/drafts/{draft_id}/images",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    request_body = AttachImagesRequest,
    responses(
        (status = 200, description = "Images attached", body = DraftView),
        (status = 400, description = "Not an image or not base64"),
        (status = 404, description = "Draft not found"),
        (status = 409, description = "A submission is in progress")
    )
)]
pub async fn attach_images(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(request): Json<AttachImagesRequest>,
) -> Result<Json<DraftView>, ApiError> {
    let files = request
        .files
        .into_iter()
        .map(ImageUpload::decode)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(state.drafts.attach_images(draft_id, files).await?))
}

/// Remove one image by position.
#[utoipa::path(
    delete,
    path = "/v1/drafts/{draft_id}/images/{index}",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID"),
        ("index" = usize, Path, description = "Zero-based image position")
    ),
    responses(
        (status = 200, description = "Image removed", body = DraftView),
        (status = 404, description = "Draft not found"),
        (status = 409, description = "A submission is in progress"),
        (status = 422, description = "No image at that position")
    )
)]
pub async fn remove_image(
    State(state): State<AppState>,
    Path((draft_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<DraftView>, ApiError> {
    Ok(Json(state.drafts.remove_image(draft_id, index).await?))
}

/// Submit a draft as a new tokenized property.
///
/// A failed contract call is still a 200: the outcome carries the failure
/// message and the draft is kept for a retry.
#[utoipa::path(
    post,
    path = "/v1/drafts/{draft_id}/submit",
    tag = "Drafts",
    params(
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    request_body = SubmitDraftRequest,
    responses(
        (status = 200, description = "Submission settled", body = SubmitOutcome),
        (status = 404, description = "Draft not found"),
        (status = 409, description = "Already submitting or form closed"),
        (status = 422, description = "Draft incomplete")
    )
)]
pub async fn submit_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(request): Json<SubmitDraftRequest>,
) -> Result<Json<SubmitOutcome>, ApiError> {
    let outcome = state
        .drafts
        .submit(draft_id, &request.from, &*state.tokens)
        .await?;
    Ok(Json(outcome))
}
