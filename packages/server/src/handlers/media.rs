use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use raffle_common::media::MediaUpload;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, CAMPAIGN_CUSTOMIZE, RAFFLE_MANAGE};
use crate::models::media::MediaResponse;
use crate::state::AppState;

/// Multipart framing on top of the configured file limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn media_upload_body_limit(max_upload_bytes: u64) -> DefaultBodyLimit {
    let max = usize::try_from(max_upload_bytes).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(max.saturating_add(MULTIPART_OVERHEAD))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {e}"))
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload campaign media",
    description = "Stores an image or video from the `file` multipart field and returns a stable \
        URL to reference from raffles and customizations. Identical files get the same URL. \
        Requires `campaign:customize` or `raffle:manage`.",
    request_body(content_type = "multipart/form-data", description = "Single `file` field"),
    responses(
        (status = 201, description = "Stored", body = MediaResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 413, description = "Payload too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    if !auth_user.has_permission(CAMPAIGN_CUSTOMIZE) && !auth_user.has_permission(RAFFLE_MANAGE) {
        return Err(AppError::PermissionDenied);
    }

    let mut upload: Option<MediaUpload> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .filter(|ct| *ct != "application/octet-stream")
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&filename)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        upload = Some(MediaUpload {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let stored = state.media.store(upload).await?;
    tracing::debug!(url = %stored.url, size = stored.size, "Media stored");

    Ok((StatusCode::CREATED, Json(MediaResponse::from(stored))))
}
