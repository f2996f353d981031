use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin-authored raffle template, shared by every tenant it is assigned to.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raffle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Entries open at this instant (inclusive).
    pub start_date: DateTimeUtc,
    /// Entries close after this instant (inclusive).
    pub end_date: DateTimeUtc,

    pub cover_image: Option<String>,
    /// Ordered prize image URLs as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub prize_images: serde_json::Value,
    #[sea_orm(default_value = 0)]
    pub main_image_index: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    pub fn window(&self) -> raffle_common::RaffleWindow {
        raffle_common::RaffleWindow::new(self.start_date, self.end_date)
    }

    pub fn prize_image_list(&self) -> Vec<String> {
        serde_json::from_value(self.prize_images.clone()).unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
