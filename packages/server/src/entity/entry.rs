use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One participant submission. Never updated after insert.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tenant_id: String,
    pub raffle_id: i32,
    #[sea_orm(belongs_to, from = "tenant_id", to = "id")]
    pub tenant: HasOne<super::tenant::Entity>,
    #[sea_orm(belongs_to, from = "raffle_id", to = "id")]
    pub raffle: HasOne<super::raffle::Entity>,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Answers keyed by custom question id, as a JSON object of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub answers: serde_json::Value,

    pub agreed_to_terms: bool,
    pub agreed_to_marketing: bool,

    #[sea_orm(unique)]
    pub ticket_number: String,

    pub submitted_at: DateTimeUtc,
}

impl Model {
    pub fn answer_map(&self) -> raffle_common::Answers {
        serde_json::from_value(self.answers.clone()).unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
