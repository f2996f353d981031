use chrono::{DateTime, Utc};
use raffle_common::Customizations;
use serde::Serialize;

use crate::entity::campaign;

#[derive(Serialize, utoipa::ToSchema)]
pub struct CustomizationsResponse {
    pub tenant_id: String,
    pub raffle_id: i32,
    pub customizations: Customizations,
    pub updated_at: DateTime<Utc>,
}

impl From<campaign::Model> for CustomizationsResponse {
    fn from(m: campaign::Model) -> Self {
        let customizations = m.customizations();
        Self {
            tenant_id: m.tenant_id,
            raffle_id: m.raffle_id,
            customizations,
            updated_at: m.updated_at,
        }
    }
}
