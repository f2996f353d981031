use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::question::{CustomQuestion, QuestionError, QuestionType};

pub const MAX_ADDITIONAL_MEDIA: usize = 10;
pub const MAX_CUSTOM_QUESTIONS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One item of the tenant's gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaItem {
    /// URL returned by the media store.
    pub url: String,
    pub kind: MediaKind,
}

/// Tenant-specific branding and questions for one campaign.
///
/// Every field is optional; the presentation layer fills the gaps from the
/// raffle template and the tenant account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Customizations {
    pub logo: Option<String>,
    /// `#RGB` or `#RRGGBB`.
    #[schema(example = "#E11D48")]
    pub primary_color: Option<String>,
    /// Where to send entrants after a successful submission.
    pub redirect_url: Option<String>,
    /// Template variant name.
    #[schema(example = "classic")]
    pub template: Option<String>,
    pub cover_photo: Option<String>,
    pub background_video: Option<String>,
    pub custom_description: Option<String>,
    pub additional_media: Vec<MediaItem>,
    pub custom_questions: Vec<CustomQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomizationError {
    #[error("at most 10 additional media items are allowed")]
    TooManyMedia,
    #[error("at most 5 custom questions are allowed")]
    TooManyQuestions,
    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("primary color must look like #RGB or #RRGGBB")]
    InvalidColor,
    #[error("{0} must be a non-empty URL")]
    BlankUrl(&'static str),
}

impl Customizations {
    pub fn validate(&self) -> Result<(), CustomizationError> {
        if self.additional_media.len() > MAX_ADDITIONAL_MEDIA {
            return Err(CustomizationError::TooManyMedia);
        }
        if self.custom_questions.len() > MAX_CUSTOM_QUESTIONS {
            return Err(CustomizationError::TooManyQuestions);
        }

        let mut seen = HashSet::new();
        for question in &self.custom_questions {
            question.validate()?;
            if !seen.insert(question.id.as_str()) {
                return Err(CustomizationError::DuplicateQuestionId(question.id.clone()));
            }
        }

        if let Some(color) = &self.primary_color
            && !is_hex_color(color)
        {
            return Err(CustomizationError::InvalidColor);
        }

        let urls = [
            ("logo", &self.logo),
            ("redirect_url", &self.redirect_url),
            ("cover_photo", &self.cover_photo),
            ("background_video", &self.background_video),
        ];
        for (name, url) in urls {
            if url.as_deref().is_some_and(|u| u.trim().is_empty()) {
                return Err(CustomizationError::BlankUrl(name));
            }
        }
        if self.additional_media.iter().any(|m| m.url.trim().is_empty()) {
            return Err(CustomizationError::BlankUrl("additional_media"));
        }

        Ok(())
    }

    /// Synthetic customizations used when an operator previews a campaign
    /// the tenant has not configured yet.
    pub fn preview_placeholder() -> Self {
        Self {
            logo: None,
            primary_color: None,
            redirect_url: None,
            template: Some("classic".into()),
            cover_photo: None,
            background_video: None,
            custom_description: None,
            additional_media: Vec::new(),
            custom_questions: vec![CustomQuestion {
                id: "preview-question".into(),
                question_text: "How did you hear about us?".into(),
                question_type: QuestionType::Text,
                options: Vec::new(),
                required: false,
            }],
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
