use raffle_common::SelectionMethod;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A selection outcome.
///
/// `(tenant_id, raffle_id, entry_id)` is unique: this constraint is what keeps
/// two concurrent selections from both winning the same entry.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "winner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "raffle_entry")]
    pub tenant_id: String,
    #[sea_orm(unique_key = "raffle_entry")]
    pub raffle_id: i32,
    #[sea_orm(unique_key = "raffle_entry")]
    pub entry_id: i32,
    #[sea_orm(belongs_to, from = "entry_id", to = "id")]
    pub entry: HasOne<super::entry::Entity>,

    /// Copy of the entry's ticket number.
    pub ticket_number: String,
    pub selection_method: SelectionMethod,

    #[sea_orm(column_type = "Text", nullable)]
    pub prize_description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub selected_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
