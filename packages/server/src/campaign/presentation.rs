use chrono::{DateTime, Utc};
use raffle_common::{CustomQuestion, Customizations, MediaItem, RafflePhase};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{raffle, tenant};

pub const DEFAULT_TEMPLATE: &str = "classic";

/// Hero media of a campaign page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMedia {
    /// The tenant's own gallery.
    Gallery { items: Vec<MediaItem> },
    /// A single cover image, optionally with the tenant logo on top.
    Cover {
        image: Option<String>,
        logo_overlay: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageBranding {
    #[schema(example = "#2563EB")]
    pub primary_color: String,
    pub logo: Option<String>,
    #[schema(example = "classic")]
    pub template: String,
    pub background_video: Option<String>,
}

/// Everything a campaign page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageView {
    pub tenant_id: String,
    pub tenant_name: String,
    pub raffle_id: i32,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub phase: RafflePhase,
    pub branding: PageBranding,
    pub media: PageMedia,
    pub prize_images: Vec<String>,
    pub main_image: Option<String>,
    pub redirect_url: Option<String>,
    pub questions: Vec<CustomQuestion>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn default_description(raffle: &raffle::Model) -> String {
    format!(
        "Enter for your chance to win {}! Entries close on {}.",
        raffle.title,
        raffle.end_date.format("%B %-d, %Y")
    )
}

/// Merge the raffle template, the tenant account and the campaign's
/// customizations into a page. Preview drafts go through here unchanged.
pub fn resolve_page(
    tenant: &tenant::Model,
    raffle: &raffle::Model,
    customizations: &Customizations,
    fallback_color: &str,
    now: DateTime<Utc>,
) -> PageView {
    let description =
        non_blank(&customizations.custom_description).unwrap_or_else(|| default_description(raffle));

    let logo = non_blank(&customizations.logo).or_else(|| non_blank(&tenant.logo));

    let media = if customizations.additional_media.is_empty() {
        PageMedia::Cover {
            image: non_blank(&customizations.cover_photo).or_else(|| non_blank(&raffle.cover_image)),
            logo_overlay: logo.clone(),
        }
    } else {
        PageMedia::Gallery {
            items: customizations.additional_media.clone(),
        }
    };

    let primary_color = non_blank(&customizations.primary_color)
        .or_else(|| non_blank(&tenant.brand_color))
        .unwrap_or_else(|| fallback_color.to_string());

    let prize_images = raffle.prize_image_list();
    let main_image = if prize_images.is_empty() {
        None
    } else {
        let idx = usize::try_from(raffle.main_image_index)
            .unwrap_or(0)
            .min(prize_images.len() - 1);
        Some(prize_images[idx].clone())
    };

    PageView {
        tenant_id: tenant.id.clone(),
        tenant_name: tenant.name.clone(),
        raffle_id: raffle.id,
        title: raffle.title.clone(),
        description,
        starts_at: raffle.start_date,
        ends_at: raffle.end_date,
        phase: raffle.window().phase_at(now),
        branding: PageBranding {
            primary_color,
            logo,
            template: non_blank(&customizations.template).unwrap_or_else(|| DEFAULT_TEMPLATE.into()),
            background_video: non_blank(&customizations.background_video),
        },
        media,
        prize_images,
        main_image,
        redirect_url: non_blank(&customizations.redirect_url),
        questions: customizations.custom_questions.clone(),
    }
}
