use axum::{extract::FromRequestParts, http::request::Parts};

use crate::entity::tenant;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

pub const RAFFLE_MANAGE: &str = "raffle:manage";
pub const CAMPAIGN_CUSTOMIZE: &str = "campaign:customize";
pub const CAMPAIGN_PREVIEW: &str = "campaign:preview";
pub const CAMPAIGN_VIEW_ENTRIES: &str = "campaign:view_entries";
pub const WINNER_SELECT: &str = "winner:select";

/// Authenticated operator extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
/// Permission checks happen via `require_permission()` in the handler body.
pub struct AuthUser {
    pub subject: String,
    pub role: String,
    pub permissions: Vec<String>,
    /// Set for tenant staff; platform operators may act on any tenant.
    pub tenant_id: Option<String>,
}

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Returns `Ok(())` if the user has the given permission, `Err(PermissionDenied)` otherwise.
    pub fn require_permission(&self, permission: &str) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Tenant-scoped operators only see their own tenant. A mismatch looks
    /// exactly like an unknown tenant.
    pub fn require_tenant_access(&self, tenant: &tenant::Model, identifier: &str) -> Result<(), AppError> {
        match &self.tenant_id {
            Some(scope) if scope != &tenant.id => {
                tracing::debug!(scope, tenant_id = %tenant.id, "Operator outside tenant scope");
                Err(crate::campaign::CampaignError::TenantNotFound(identifier.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims =
            jwt::verify(token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            subject: claims.sub,
            role: claims.role,
            permissions: claims.permissions,
            tenant_id: claims.tenant_id,
        })
    }
}
