use chrono::{DateTime, Utc};
use raffle_common::customization::CustomizationError;
use raffle_common::question::AnswerError;
use sea_orm::DbErr;

/// Taxonomy class of a [`CampaignError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Lifecycle,
    Validation,
    Eligibility,
    /// Worth retrying from the caller's side.
    Transient,
}

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("tenant '{0}' not found")]
    TenantNotFound(String),
    #[error("raffle {0} not found")]
    RaffleNotFound(i32),
    #[error("raffle {raffle_id} is not available for tenant '{tenant_id}'")]
    RaffleNotAssigned { tenant_id: String, raffle_id: i32 },

    #[error("raffle has not started yet, entries open at {starts_at}")]
    RaffleNotStarted { starts_at: DateTime<Utc> },
    #[error("raffle is still running until {ends_at}")]
    RaffleStillActive { ends_at: DateTime<Utc> },
    #[error("raffle ended at {ended_at}")]
    RaffleEnded { ended_at: DateTime<Utc> },

    #[error("the terms and conditions must be accepted")]
    TermsNotAccepted,
    #[error("{field} {reason}")]
    InvalidField { field: &'static str, reason: &'static str },
    #[error("question '{question_id}' requires an answer")]
    MissingRequiredAnswer { question_id: String },
    #[error("answer to question '{question_id}' is not one of its options")]
    InvalidAnswerOption { question_id: String },
    #[error("invalid customizations: {0}")]
    InvalidCustomization(#[from] CustomizationError),

    #[error("no eligible entries remain")]
    NoEligibleEntries,
    #[error("entry {0} is not eligible for selection")]
    EntryNotEligible(i32),

    #[error("too many concurrent writes, try again")]
    Contention,
    #[error(transparent)]
    Storage(#[from] DbErr),
}

impl From<AnswerError> for CampaignError {
    fn from(err: AnswerError) -> Self {
        match err {
            AnswerError::MissingRequiredAnswer { question_id } => {
                Self::MissingRequiredAnswer { question_id }
            }
            AnswerError::InvalidAnswerOption { question_id, .. } => {
                Self::InvalidAnswerOption { question_id }
            }
        }
    }
}

impl CampaignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TenantNotFound(_) | Self::RaffleNotFound(_) | Self::RaffleNotAssigned { .. } => {
                ErrorKind::NotFound
            }
            Self::RaffleNotStarted { .. }
            | Self::RaffleStillActive { .. }
            | Self::RaffleEnded { .. } => ErrorKind::Lifecycle,
            Self::TermsNotAccepted
            | Self::InvalidField { .. }
            | Self::MissingRequiredAnswer { .. }
            | Self::InvalidAnswerOption { .. }
            | Self::InvalidCustomization(_) => ErrorKind::Validation,
            Self::NoEligibleEntries | Self::EntryNotEligible(_) => ErrorKind::Eligibility,
            Self::Contention | Self::Storage(_) => ErrorKind::Transient,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TenantNotFound(_) => "TENANT_NOT_FOUND",
            Self::RaffleNotFound(_) => "RAFFLE_NOT_FOUND",
            Self::RaffleNotAssigned { .. } => "RAFFLE_NOT_ASSIGNED",
            Self::RaffleNotStarted { .. } => "RAFFLE_NOT_STARTED",
            Self::RaffleStillActive { .. } => "RAFFLE_STILL_ACTIVE",
            Self::RaffleEnded { .. } => "RAFFLE_ENDED",
            Self::TermsNotAccepted => "TERMS_NOT_ACCEPTED",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::MissingRequiredAnswer { .. } => "MISSING_REQUIRED_ANSWER",
            Self::InvalidAnswerOption { .. } => "INVALID_ANSWER_OPTION",
            Self::InvalidCustomization(_) => "INVALID_CUSTOMIZATION",
            Self::NoEligibleEntries => "NO_ELIGIBLE_ENTRIES",
            Self::EntryNotEligible(_) => "ENTRY_NOT_ELIGIBLE",
            Self::Contention => "CONTENTION",
            Self::Storage(_) => "INTERNAL_ERROR",
        }
    }

    /// The window boundary a lifecycle error refers to.
    pub fn boundary(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::RaffleNotStarted { starts_at } => Some(*starts_at),
            Self::RaffleStillActive { ends_at } => Some(*ends_at),
            Self::RaffleEnded { ended_at } => Some(*ended_at),
            _ => None,
        }
    }
}
