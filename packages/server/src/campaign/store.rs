use raffle_common::Customizations;
use sea_orm::*;

use crate::entity::{campaign, raffle, tenant};

use super::CampaignError;
use super::tenant::{Resolution, resolve_tenant};

pub async fn find_raffle<C: ConnectionTrait>(db: &C, id: i32) -> Result<raffle::Model, CampaignError> {
    raffle::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CampaignError::RaffleNotFound(id))
}

/// The tenant's assignment for a raffle, active or not.
pub async fn find_assignment<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<Option<campaign::Model>, DbErr> {
    campaign::Entity::find()
        .filter(campaign::Column::TenantId.eq(tenant_id))
        .filter(campaign::Column::RaffleId.eq(raffle_id))
        .one(db)
        .await
}

pub async fn find_active_assignment<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<campaign::Model, CampaignError> {
    find_assignment(db, tenant_id, raffle_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| CampaignError::RaffleNotAssigned {
            tenant_id: tenant_id.to_string(),
            raffle_id,
        })
}

/// Everything a campaign request needs: who, what, and how it is branded.
#[derive(Debug, Clone)]
pub struct CampaignContext {
    pub tenant: tenant::Model,
    pub raffle: raffle::Model,
    pub assignment: campaign::Model,
    pub customizations: Customizations,
}

impl CampaignContext {
    /// Resolve the tenant, then the raffle, then the active assignment.
    pub async fn load<C: ConnectionTrait>(
        db: &C,
        tenant_identifier: &str,
        raffle_id: i32,
    ) -> Result<Self, CampaignError> {
        let Resolution { tenant, .. } = resolve_tenant(db, tenant_identifier).await?;
        Self::load_for(db, tenant, raffle_id).await
    }

    pub async fn load_for<C: ConnectionTrait>(
        db: &C,
        tenant: tenant::Model,
        raffle_id: i32,
    ) -> Result<Self, CampaignError> {
        let raffle = find_raffle(db, raffle_id).await?;
        let assignment = find_active_assignment(db, &tenant.id, raffle_id).await?;
        let customizations = assignment.customizations();
        Ok(Self {
            tenant,
            raffle,
            assignment,
            customizations,
        })
    }
}

/// Replace an assignment's customizations after validating them.
pub async fn save_customizations<C: ConnectionTrait>(
    db: &C,
    assignment: campaign::Model,
    customizations: &Customizations,
) -> Result<campaign::Model, CampaignError> {
    customizations.validate()?;
    let value = serde_json::to_value(customizations)
        .map_err(|e| DbErr::Custom(format!("serialize customizations: {e}")))?;

    let mut active: campaign::ActiveModel = assignment.into();
    active.customizations = Set(value);
    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Assign a raffle to a tenant, reactivating an earlier assignment if one exists.
///
/// Returns the assignment and whether it was newly created.
pub async fn assign_raffle<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<(campaign::Model, bool), CampaignError> {
    let now = chrono::Utc::now();
    if let Some(existing) = find_assignment(db, tenant_id, raffle_id).await? {
        if existing.is_active {
            return Ok((existing, false));
        }
        let mut active: campaign::ActiveModel = existing.into();
        active.is_active = Set(true);
        active.updated_at = Set(now);
        return Ok((active.update(db).await?, false));
    }

    let model = campaign::ActiveModel {
        tenant_id: Set(tenant_id.to_string()),
        raffle_id: Set(raffle_id),
        is_active: Set(true),
        customizations: Set(serde_json::json!({})),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((model, true))
}

/// Soft-deactivate an assignment. Its entries and winners are kept.
pub async fn deactivate_assignment<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<campaign::Model, CampaignError> {
    let existing = find_active_assignment(db, tenant_id, raffle_id).await?;
    let mut active: campaign::ActiveModel = existing.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}
