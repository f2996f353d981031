use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use raffle_common::media::MediaError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::campaign::{CampaignError, ErrorKind};

/// Seconds a client should wait after a `CONTENTION` response.
const CONTENTION_RETRY_AFTER: u64 = 1;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `PERMISSION_DENIED`, `PREVIEW_READ_ONLY`, `NOT_FOUND`,
    /// `TENANT_NOT_FOUND`, `RAFFLE_NOT_STARTED`, `TERMS_NOT_ACCEPTED`,
    /// `ENTRY_NOT_ELIGIBLE`, `CONTENTION`, `INTERNAL_ERROR`.
    #[schema(example = "RAFFLE_ENDED")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "raffle ended at 2025-01-31 23:59:59 UTC")]
    pub message: String,
    /// For lifecycle errors, the window boundary that was crossed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<DateTime<Utc>>,
}

impl ErrorBody {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            boundary: None,
        }
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    PermissionDenied,
    /// A write was attempted on a preview-tagged request.
    PreviewReadOnly,
    PayloadTooLarge(String),
    Campaign(CampaignError),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", msg),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_MISSING", "Authentication required"),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_INVALID", "Invalid or expired token"),
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody::new("PERMISSION_DENIED", "Insufficient permissions"),
            ),
            AppError::PreviewReadOnly => (
                StatusCode::FORBIDDEN,
                ErrorBody::new(
                    "PREVIEW_READ_ONLY",
                    "Preview requests cannot create entries or winners",
                ),
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::new("PAYLOAD_TOO_LARGE", msg),
            ),
            AppError::Campaign(err) => campaign_status_and_body(err),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "An unexpected error occurred"),
                )
            }
        }
    }
}

fn campaign_status_and_body(err: CampaignError) -> (StatusCode, ErrorBody) {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Lifecycle | ErrorKind::Eligibility => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Transient if matches!(err, CampaignError::Contention) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorKind::Transient => {
            tracing::error!(error = %err, "Storage error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("INTERNAL_ERROR", "An unexpected error occurred"),
            );
        }
    };
    tracing::debug!(code = err.code(), error = %err, "Campaign request refused");
    (
        status,
        ErrorBody {
            code: err.code(),
            message: err.to_string(),
            boundary: err.boundary(),
        },
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retry_after = matches!(self, AppError::Campaign(CampaignError::Contention))
            .then_some(CONTENTION_RETRY_AFTER);

        let (status, body) = self.status_and_body();

        if let Some(seconds) = retry_after {
            (status, [("Retry-After", seconds.to_string())], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<CampaignError> for AppError {
    fn from(err: CampaignError) -> Self {
        AppError::Campaign(err)
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnsupportedType(_) | MediaError::Empty => AppError::Validation(err.to_string()),
            MediaError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            MediaError::Io(e) => AppError::Internal(format!("media store: {e}")),
        }
    }
}
