use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use raffle_common::Customizations;
use tracing::instrument;

use crate::campaign::admission::AdmissionService;
use crate::campaign::gate::require_viewable;
use crate::campaign::presentation::resolve_page;
use crate::campaign::store::{CampaignContext, find_assignment, find_raffle};
use crate::campaign::tenant::resolve_tenant;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, CAMPAIGN_PREVIEW};
use crate::extractors::json::AppJson;
use crate::extractors::preview::{LiveRequest, PREVIEW_HEADER};
use crate::models::entry::{SubmitEntryRequest, SubmitEntryResponse};
use crate::models::page::{PageMode, PageResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}",
    tag = "Pages",
    operation_id = "getCampaignPage",
    summary = "Public campaign page",
    description = "Resolves the tenant identifier (native id, 24-hex object id or email) and returns \
        the page view model of its active campaign for the raffle. Only served while the raffle \
        is active; use the preview endpoints to see a page outside its window.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    responses(
        (status = 200, description = "Page view model", body = PageResponse),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
        (status = 409, description = "RAFFLE_NOT_STARTED, RAFFLE_ENDED", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tenant = %tenant, raffle_id))]
pub async fn get_page(
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
) -> Result<Json<PageResponse>, AppError> {
    let ctx = CampaignContext::load(&state.db, &tenant, raffle_id).await?;
    let now = chrono::Utc::now();
    require_viewable(&ctx.raffle.window(), now)?;

    let page = resolve_page(
        &ctx.tenant,
        &ctx.raffle,
        &ctx.customizations,
        &state.config.campaign.default_brand_color,
        now,
    );
    Ok(Json(PageResponse {
        mode: PageMode::Live,
        page,
    }))
}

#[utoipa::path(
    post,
    path = "/{tenant}/{raffle_id}/entries",
    tag = "Pages",
    operation_id = "submitEntry",
    summary = "Enter a raffle",
    description = "Admits one entry while the raffle is active and returns its ticket number. \
        Checks run in order and the first failure is returned: lifecycle, terms, contact fields, \
        required answers, select options. Requests tagged `X-Campaign-Preview: true` are refused.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    request_body = SubmitEntryRequest,
    responses(
        (status = 201, description = "Entry admitted", body = SubmitEntryResponse),
        (status = 400, description = "TERMS_NOT_ACCEPTED, INVALID_FIELD, MISSING_REQUIRED_ANSWER, INVALID_ANSWER_OPTION, VALIDATION_ERROR", body = ErrorBody),
        (status = 403, description = "PREVIEW_READ_ONLY", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND, RAFFLE_NOT_ASSIGNED", body = ErrorBody),
        (status = 409, description = "RAFFLE_NOT_STARTED, RAFFLE_ENDED", body = ErrorBody),
        (status = 503, description = "CONTENTION", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _live, payload), fields(tenant = %tenant, raffle_id))]
pub async fn submit_entry(
    _live: LiveRequest,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
    AppJson(payload): AppJson<SubmitEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = CampaignContext::load(&state.db, &tenant, raffle_id).await?;
    let campaign = &state.config.campaign;
    let entry = AdmissionService::new(&state.db, campaign.ticket_format(), campaign.ticket_retry())
        .submit(&ctx, payload.into(), state.notifier.clone(), chrono::Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitEntryResponse {
            ticket_number: entry.ticket_number,
            redirect_url: ctx.customizations.redirect_url.clone(),
        }),
    ))
}

async fn render_preview(
    state: &AppState,
    auth_user: &AuthUser,
    tenant: &str,
    raffle_id: i32,
    draft: Option<Customizations>,
) -> Result<PageResponse, AppError> {
    auth_user.require_permission(CAMPAIGN_PREVIEW)?;
    let resolution = resolve_tenant(&state.db, tenant).await?;
    auth_user.require_tenant_access(&resolution.tenant, tenant)?;
    let raffle = find_raffle(&state.db, raffle_id).await?;

    let customizations = match draft {
        Some(draft) => {
            draft
                .validate()
                .map_err(crate::campaign::CampaignError::from)?;
            draft
        }
        None => match find_assignment(&state.db, &resolution.tenant.id, raffle_id).await? {
            Some(assignment) if assignment.is_active => assignment.customizations(),
            _ => Customizations::preview_placeholder(),
        },
    };

    let page = resolve_page(
        &resolution.tenant,
        &raffle,
        &customizations,
        &state.config.campaign.default_brand_color,
        chrono::Utc::now(),
    );
    Ok(PageResponse {
        mode: PageMode::Preview,
        page,
    })
}

#[utoipa::path(
    get,
    path = "/{tenant}/{raffle_id}",
    tag = "Preview",
    operation_id = "previewCampaignPage",
    summary = "Preview a campaign page",
    description = "Renders the page with the tenant's stored customizations, or placeholder \
        customizations when the raffle is not assigned to the tenant. The lifecycle window is \
        not enforced. Requires `campaign:preview`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    responses(
        (status = 200, description = "Preview page view model", body = PageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(tenant = %tenant, raffle_id))]
pub async fn preview_page(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let page = render_preview(&state, &auth_user, &tenant, raffle_id, None).await?;
    Ok(([(PREVIEW_HEADER, "true")], Json(page)))
}

#[utoipa::path(
    post,
    path = "/{tenant}/{raffle_id}",
    tag = "Preview",
    operation_id = "previewCampaignDraft",
    summary = "Preview unsaved customizations",
    description = "Renders the page with the customizations in the request body without storing \
        them. Requires `campaign:preview`.",
    params(
        ("tenant" = String, Path, description = "Tenant identifier"),
        ("raffle_id" = i32, Path, description = "Raffle ID"),
    ),
    request_body = Customizations,
    responses(
        (status = 200, description = "Preview page view model", body = PageResponse),
        (status = 400, description = "INVALID_CUSTOMIZATION, VALIDATION_ERROR", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "TENANT_NOT_FOUND, RAFFLE_NOT_FOUND", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, draft), fields(tenant = %tenant, raffle_id))]
pub async fn preview_draft(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((tenant, raffle_id)): Path<(String, i32)>,
    AppJson(draft): AppJson<Customizations>,
) -> Result<impl IntoResponse, AppError> {
    let page = render_preview(&state, &auth_user, &tenant, raffle_id, Some(draft)).await?;
    Ok(([(PREVIEW_HEADER, "true")], Json(page)))
}
