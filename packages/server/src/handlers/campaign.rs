use axum::Json;
use axum::extract::{Path, Query, State};
use raffle_common::Customizations;
use sea_orm::*;
use tracing::instrument;

use crate::campaign::selection::eligible_pool_size;
use crate::campaign::store::{CampaignContext, save_customizations};
use crate::campaign::tenant::resolve_tenant;
use crate::entity::{entry, winner};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, CAMPAIGN_CUSTOMIZE, CAMPAIGN_VIEW_ENTRIES, WINNER_SELECT};
use crate::extractors::json::AppJson;
use crate::models::campaign::CustomizationsResponse;
use crate::models::entry::{EntryListResponse, EntryResponse};
use crate::models::shared::{PageQuery, Pagination};
use crate::models::winner::PoolResponse;
use crate::state::AppState;

/// Load a campaign on behalf of an operator, enforcing their tenant scope.
pub(crate) async fn operator_context(
    state: &AppState,
    auth_user: &AuthUser,
    tenant: &str,
    raffle_id: i32,
) -> Result<CampaignContext, AppError> {
    let resolution = resolve_tenant(&state.db, tenant).await?;
    auth_user.require_tenant_access(&resolution.tenant, tenant)?;
    Ok(CampaignContext::load_for(&state.db, resolution.tenant, raffle_id).await?)
}

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}/customizations",
    tag = "Campaigns",
    operation_id = "getCustomizations",
    summary = "Get campaign customizations",
    description = "Returns the stored customizations of the tenant's active campaign. Requires `campaign:customize`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    responses(
        (status = 200, description = "Customizations", body = CustomizationsResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(tenant = %tenant, raffle_id))]
pub async fn get_customizations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
) -> Result<Json<CustomizationsResponse>, AppError> {
    auth_user.require_permission(CAMPAIGN_CUSTOMIZE)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;
    Ok(Json(ctx.assignment.into()))
}

#[utoipa::path(
    put,
    path = "/{tenant}/{raffle_id}/customizations",
    tag = "Campaigns",
    operation_id = "replaceCustomizations",
    summary = "Replace campaign customizations",
    description = "Validates and stores the full customization set: at most 10 media items, at most \
        5 questions with unique ids, options only (and always) on select questions, colours as \
        `#RGB` or `#RRGGBB`. Requires `campaign:customize`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    request_body = Customizations,
    responses(
        (status = 200, description = "Stored customizations", body = CustomizationsResponse),
        (status = 400, description = "INVALID_CUSTOMIZATION, VALIDATION_ERROR", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(tenant = %tenant, raffle_id))]
pub async fn put_customizations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
    AppJson(payload): AppJson<Customizations>,
) -> Result<Json<CustomizationsResponse>, AppError> {
    auth_user.require_permission(CAMPAIGN_CUSTOMIZE)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;
    let model = save_customizations(&state.db, ctx.assignment, &payload).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}/entries",
    tag = "Campaigns",
    operation_id = "listEntries",
    summary = "List campaign entries",
    description = "Entries of the campaign in submission order. Requires `campaign:view_entries`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Entries", body = EntryListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(tenant = %tenant, raffle_id))]
pub async fn list_entries(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<EntryListResponse>, AppError> {
    auth_user.require_permission(CAMPAIGN_VIEW_ENTRIES)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;
    let (page, per_page) = query.resolve();

    let select = entry::Entity::find()
        .filter(entry::Column::TenantId.eq(ctx.tenant.id.as_str()))
        .filter(entry::Column::RaffleId.eq(raffle_id));
    let total = select.clone().count(&state.db).await?;

    let data = select
        .order_by_asc(entry::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(EntryResponse::from)
        .collect();

    Ok(Json(EntryListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}/pool",
    tag = "Campaigns",
    operation_id = "getEligiblePool",
    summary = "Eligible pool status",
    description = "Current phase and how many entries can still win. Requires `winner:select`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    responses(
        (status = 200, description = "Pool status", body = PoolResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(tenant = %tenant, raffle_id))]
pub async fn pool_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
) -> Result<Json<PoolResponse>, AppError> {
    auth_user.require_permission(WINNER_SELECT)?;
    let ctx = operator_context(&state, &auth_user, &tenant, raffle_id).await?;
    let tenant_id = ctx.tenant.id.as_str();

    let eligible_entries = eligible_pool_size(&state.db, tenant_id, raffle_id).await?;
    let total_entries = entry::Entity::find()
        .filter(entry::Column::TenantId.eq(tenant_id))
        .filter(entry::Column::RaffleId.eq(raffle_id))
        .count(&state.db)
        .await?;
    let winners = winner::Entity::find()
        .filter(winner::Column::TenantId.eq(tenant_id))
        .filter(winner::Column::RaffleId.eq(raffle_id))
        .count(&state.db)
        .await?;

    Ok(Json(PoolResponse {
        tenant_id: tenant_id.to_string(),
        raffle_id,
        phase: ctx.raffle.window().phase_at(chrono::Utc::now()),
        eligible_entries,
        total_entries,
        winners,
    }))
}
