use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::campaign::operator_context;
use crate::campaign::selection::SelectionService;
use crate::entity::winner;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, WINNER_SELECT};
use crate::extractors::json::AppJson;
use crate::extractors::preview::LiveRequest;
use crate::models::winner::{SelectWinnerRequest, WinnerListResponse, WinnerResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{tenant}/{raffle_id}/winners",
    tag = "Winners",
    operation_id = "selectWinner",
    summary = "Select a winner",
    description = "Commits one winner once the raffle has ended. `random` draws uniformly from the \
        entries that have not won yet; `manual` awards the given `entry_id`, which must still be \
        eligible. Call again to draw further winners. Requires `winner:select`. Requests tagged \
        `X-Campaign-Preview: true` are refused.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    request_body = SelectWinnerRequest,
    responses(
        (status = 201, description = "Winner committed", body = WinnerResponse),
        (status = 400, description = "INVALID_FIELD, VALIDATION_ERROR", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "PERMISSION_DENIED, PREVIEW_READ_ONLY", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
        (status = 409, description = "RAFFLE_STILL_ACTIVE, NO_ELIGIBLE_ENTRIES, ENTRY_NOT_ELIGIBLE", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, _live, payload), fields(tenant = %tenant, raffle_id, method = %payload.method))]
pub async fn select_winner(
    _live: LiveRequest,
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
    AppJson(payload): AppJson<SelectWinnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission(WINNER_SELECT)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;

    let model = SelectionService::new(&state.db, state.config.campaign.selection_backoff())
        .select(&ctx, payload.into(), state.notifier.clone(), chrono::Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(WinnerResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}/winners",
    tag = "Winners",
    operation_id = "listWinners",
    summary = "List winners",
    description = "Winners of the campaign in selection order. Requires `winner:select`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    responses(
        (status = 200, description = "Winners", body = WinnerListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(tenant = %tenant, raffle_id))]
pub async fn list_winners(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
) -> Result<Json<WinnerListResponse>, AppError> {
    auth_user.require_permission(WINNER_SELECT)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;

    let data = winner::Entity::find()
        .filter(winner::Column::TenantId.eq(ctx.tenant.id.as_str()))
        .filter(winner::Column::RaffleId.eq(raffle_id))
        .order_by_asc(winner::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(WinnerResponse::from)
        .collect();

    Ok(Json(WinnerListResponse { data }))
}
