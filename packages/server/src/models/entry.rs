use chrono::{DateTime, Utc};
use raffle_common::Answers;
use serde::{Deserialize, Serialize};

use super::shared::Pagination;
use crate::campaign::admission::EntrySubmission;
use crate::entity::entry;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmitEntryRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Answers keyed by custom question id.
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub agreed_to_terms: bool,
    #[serde(default)]
    pub agreed_to_marketing: bool,
}

impl From<SubmitEntryRequest> for EntrySubmission {
    fn from(req: SubmitEntryRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            answers: req.answers,
            agreed_to_terms: req.agreed_to_terms,
            agreed_to_marketing: req.agreed_to_marketing,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitEntryResponse {
    #[schema(example = "RAF-2025-483920")]
    pub ticket_number: String,
    /// Where the page should send the entrant next, if the tenant set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryResponse {
    pub id: i32,
    pub tenant_id: String,
    pub raffle_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub answers: Answers,
    pub agreed_to_terms: bool,
    pub agreed_to_marketing: bool,
    pub ticket_number: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<entry::Model> for EntryResponse {
    fn from(m: entry::Model) -> Self {
        let answers = m.answer_map();
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            raffle_id: m.raffle_id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            answers,
            agreed_to_terms: m.agreed_to_terms,
            agreed_to_marketing: m.agreed_to_marketing,
            ticket_number: m.ticket_number,
            submitted_at: m.submitted_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryListResponse {
    pub data: Vec<EntryResponse>,
    pub pagination: Pagination,
}
