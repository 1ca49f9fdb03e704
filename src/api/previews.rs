// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Serve a live image preview.
///
/// Previews disappear once their draft removes the image, resets after a
/// successful submission or is dismissed.
#[utoipa::path(
    get,
    path = "/v1/previews/{preview_id}",
    tag = "Drafts",
    params(
        ("preview_id" = Uuid, Path, description = "Preview ID")
    ),
    responses(
        (status = 200, description = "Image bytes with the uploaded content type"),
        (status = 404, description = "Preview revoked or unknown")
    )
)]
pub async fn get_preview(
    State(state): State<AppState>,
    Path(preview_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let blob = state
        .previews()
        .get(&preview_id)
        .ok_or_else(|| ApiError::not_found("Preview not found"))?;

    Ok((
        [(header::CONTENT_TYPE, blob.content_type)],
        Bytes::copy_from_slice(&blob.bytes),
    ))
}
