use chrono::{DateTime, Utc};
use raffle_common::Customizations;
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, double_option, validate_title};
use crate::entity::{campaign, raffle};
use crate::error::AppError;

pub const MAX_PRIZE_IMAGES: usize = 20;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRaffleRequest {
    #[schema(example = "A Year of Coffee")]
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub prize_images: Vec<String>,
    #[serde(default)]
    pub main_image_index: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRaffleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// `null` clears the cover image.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cover_image: Option<Option<String>>,
    pub prize_images: Option<Vec<String>>,
    pub main_image_index: Option<i32>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AssignRaffleRequest {
    /// Tenant identifier in any of its accepted forms.
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub tenant: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RaffleResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cover_image: Option<String>,
    pub prize_images: Vec<String>,
    pub main_image_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<raffle::Model> for RaffleResponse {
    fn from(m: raffle::Model) -> Self {
        let prize_images = m.prize_image_list();
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            start_date: m.start_date,
            end_date: m.end_date,
            cover_image: m.cover_image,
            prize_images,
            main_image_index: m.main_image_index,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RaffleListResponse {
    pub data: Vec<RaffleResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssignmentResponse {
    pub id: i32,
    pub tenant_id: String,
    pub raffle_id: i32,
    pub is_active: bool,
    pub customizations: Customizations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<campaign::Model> for AssignmentResponse {
    fn from(m: campaign::Model) -> Self {
        let customizations = m.customizations();
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            raffle_id: m.raffle_id,
            is_active: m.is_active,
            customizations,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation("end_date must be after start_date".into()));
    }
    Ok(())
}

fn validate_images(images: &[String], main_image_index: i32) -> Result<(), AppError> {
    if images.len() > MAX_PRIZE_IMAGES {
        return Err(AppError::Validation(format!(
            "At most {MAX_PRIZE_IMAGES} prize images are allowed"
        )));
    }
    if images.iter().any(|u| u.trim().is_empty()) {
        return Err(AppError::Validation("Prize image URLs must not be empty".into()));
    }
    if main_image_index < 0 {
        return Err(AppError::Validation("main_image_index must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_raffle(req: &CreateRaffleRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_window(req.start_date, req.end_date)?;
    validate_images(&req.prize_images, req.main_image_index)
}

/// Validate an update against the raffle it will be applied to.
pub fn validate_update_raffle(req: &UpdateRaffleRequest, current: &raffle::Model) -> Result<(), AppError> {
    if *req == UpdateRaffleRequest::default() {
        return Err(AppError::Validation("At least one field must be provided".into()));
    }
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    validate_window(
        req.start_date.unwrap_or(current.start_date),
        req.end_date.unwrap_or(current.end_date),
    )?;
    if req.prize_images.is_some() || req.main_image_index.is_some() {
        let images = req
            .prize_images
            .clone()
            .unwrap_or_else(|| current.prize_image_list());
        validate_images(&images, req.main_image_index.unwrap_or(current.main_image_index))?;
    }
    Ok(())
}
