use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role of businesses that run campaigns.
pub const TENANT_ROLE: &str = "business";

/// A business account.
///
/// Older accounts are only reachable through `id`; accounts migrated from the
/// legacy document store also carry their 24-hex `object_id`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenant")]
pub struct Model {
    /// Native key in its original string form.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Lowercase 24-hex object id, when the account was migrated.
    #[sea_orm(unique)]
    pub object_id: Option<String>,

    #[sea_orm(unique)]
    pub email: String,

    pub name: String,

    #[sea_orm(indexed)]
    pub role: String,

    pub logo: Option<String>,
    pub brand_color: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
