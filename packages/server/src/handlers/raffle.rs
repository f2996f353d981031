use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::campaign::store::{assign_raffle as assign, deactivate_assignment, find_raffle};
use crate::campaign::tenant::resolve_tenant;
use crate::entity::raffle;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, RAFFLE_MANAGE};
use crate::extractors::json::AppJson;
use crate::models::raffle::*;
use crate::models::shared::{PageQuery, Pagination};
use crate::state::AppState;

fn image_list(images: Vec<String>) -> serde_json::Value {
    serde_json::Value::Array(
        images
            .into_iter()
            .map(|u| serde_json::Value::String(u.trim().to_string()))
            .collect(),
    )
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Raffles",
    operation_id = "createRaffle",
    summary = "Create a raffle template",
    description = "Creates a raffle template that can then be assigned to tenants. Requires `raffle:manage`.",
    request_body = CreateRaffleRequest,
    responses(
        (status = 201, description = "Raffle created", body = RaffleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_raffle(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRaffleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    validate_create_raffle(&payload)?;

    let now = chrono::Utc::now();
    let model = raffle::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        cover_image: Set(payload.cover_image.filter(|u| !u.trim().is_empty())),
        prize_images: Set(image_list(payload.prize_images)),
        main_image_index: Set(payload.main_image_index),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(RaffleResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Raffles",
    operation_id = "listRaffles",
    summary = "List raffle templates",
    description = "Newest first. Requires `raffle:manage`.",
    params(PageQuery),
    responses(
        (status = 200, description = "Raffles", body = RaffleListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_raffles(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RaffleListResponse>, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    let (page, per_page) = query.resolve();

    let total = raffle::Entity::find().count(&state.db).await?;
    let data = raffle::Entity::find()
        .order_by_desc(raffle::Column::CreatedAt)
        .order_by_desc(raffle::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(RaffleResponse::from)
        .collect();

    Ok(Json(RaffleListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Raffles",
    operation_id = "getRaffle",
    summary = "Get a raffle template",
    params(("id" = i32, Path, description = "Raffle ID")),
    responses(
        (status = 200, description = "Raffle", body = RaffleResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "RAFFLE_NOT_FOUND", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_raffle(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RaffleResponse>, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    Ok(Json(find_raffle(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Raffles",
    operation_id = "updateRaffle",
    summary = "Update a raffle template",
    description = "Partial update. Changing the window immediately changes the lifecycle phase of \
        every campaign running the raffle. Requires `raffle:manage`.",
    params(("id" = i32, Path, description = "Raffle ID")),
    request_body = UpdateRaffleRequest,
    responses(
        (status = 200, description = "Raffle updated", body = RaffleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "RAFFLE_NOT_FOUND", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_raffle(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRaffleRequest>,
) -> Result<Json<RaffleResponse>, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    let existing = find_raffle(&state.db, id).await?;
    validate_update_raffle(&payload, &existing)?;

    let mut active: raffle::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(cover_image) = payload.cover_image {
        active.cover_image = Set(cover_image.filter(|u| !u.trim().is_empty()));
    }
    if let Some(prize_images) = payload.prize_images {
        active.prize_images = Set(image_list(prize_images));
    }
    if let Some(main_image_index) = payload.main_image_index {
        active.main_image_index = Set(main_image_index);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/assignments",
    tag = "Raffles",
    operation_id = "assignRaffle",
    summary = "Assign a raffle to a tenant",
    description = "Creates the tenant's campaign for this raffle, or reactivates it if it was \
        deactivated (keeping its customizations). Requires `raffle:manage`.",
    params(("id" = i32, Path, description = "Raffle ID")),
    request_body = AssignRaffleRequest,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentResponse),
        (status = 200, description = "Assignment already existed and is active", body = AssignmentResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, tenant = %payload.tenant))]
pub async fn assign_raffle(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<AssignRaffleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    let resolution = resolve_tenant(&state.db, &payload.tenant).await?;
    auth_user.require_tenant_access(&resolution.tenant, &payload.tenant)?;
    find_raffle(&state.db, id).await?;

    let (model, created) = assign(&state.db, &resolution.tenant.id, id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(AssignmentResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}/assignments/{tenant}",
    tag = "Raffles",
    operation_id = "unassignRaffle",
    summary = "Deactivate a tenant's campaign",
    description = "Soft-deactivates the assignment. Entries and winners are kept, and the public \
        page starts answering RAFFLE_NOT_ASSIGNED. Requires `raffle:manage`.",
    params(
        ("id" = i32, Path, description = "Raffle ID"),
        ("tenant" = String, Path, description = "Tenant identifier"),
    ),
    responses(
        (status = 200, description = "Assignment deactivated", body = AssignmentResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, tenant = %tenant))]
pub async fn unassign_raffle(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, tenant)): Path<(i32, String)>,
) -> Result<Json<AssignmentResponse>, AppError> {
    auth_user.require_permission(RAFFLE_MANAGE)?;
    let resolution = resolve_tenant(&state.db, &tenant).await?;
    auth_user.require_tenant_access(&resolution.tenant, &tenant)?;

    let model = deactivate_assignment(&state.db, &resolution.tenant.id, id).await?;
    Ok(Json(model.into()))
}
