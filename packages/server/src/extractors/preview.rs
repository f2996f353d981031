use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const PREVIEW_HEADER: &str = "x-campaign-preview";

fn is_preview(parts: &Parts) -> bool {
    parts
        .headers
        .get(PREVIEW_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
}

/// Marker for requests allowed to create entries or winners.
///
/// Rejects any request tagged with `X-Campaign-Preview: true`.
pub struct LiveRequest;

impl<S> FromRequestParts<S> for LiveRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if is_preview(parts) {
            tracing::debug!(uri = %parts.uri, "Refusing write on preview request");
            return Err(AppError::PreviewReadOnly);
        }
        Ok(LiveRequest)
    }
}
