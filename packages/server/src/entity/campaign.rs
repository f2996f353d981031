use raffle_common::Customizations;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// "This tenant may run this raffle", with the tenant's customizations.
///
/// Assignments are deactivated, never deleted, so historical entries stay
/// attributable.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_assignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "tenant_raffle")]
    pub tenant_id: String,
    #[sea_orm(unique_key = "tenant_raffle")]
    pub raffle_id: i32,

    #[sea_orm(belongs_to, from = "tenant_id", to = "id")]
    pub tenant: HasOne<super::tenant::Entity>,
    #[sea_orm(belongs_to, from = "raffle_id", to = "id")]
    pub raffle: HasOne<super::raffle::Entity>,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    /// `Customizations` as JSON.
    #[sea_orm(column_type = "JsonBinary")]
    pub customizations: serde_json::Value,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Stored customizations; a row that fails to decode renders as defaults.
    pub fn customizations(&self) -> Customizations {
        serde_json::from_value(self.customizations.clone()).unwrap_or_else(|e| {
            tracing::warn!(
                assignment_id = self.id,
                error = %e,
                "Stored customizations do not decode, using defaults"
            );
            Customizations::default()
        })
    }
}

impl ActiveModelBehavior for ActiveModel {}
