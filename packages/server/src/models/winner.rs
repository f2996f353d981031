use chrono::{DateTime, Utc};
use raffle_common::{RafflePhase, SelectionMethod};
use serde::{Deserialize, Serialize};

use crate::campaign::selection::SelectionRequest;
use crate::entity::winner;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SelectWinnerRequest {
    pub method: SelectionMethod,
    /// Entry to award. Required for `manual`, rejected for `random`.
    pub entry_id: Option<i32>,
    #[schema(example = "Gift card worth $100")]
    pub prize_description: Option<String>,
    pub notes: Option<String>,
}

impl From<SelectWinnerRequest> for SelectionRequest {
    fn from(req: SelectWinnerRequest) -> Self {
        Self {
            method: req.method,
            entry_id: req.entry_id,
            prize_description: req.prize_description,
            notes: req.notes,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WinnerResponse {
    pub id: i32,
    pub tenant_id: String,
    pub raffle_id: i32,
    pub entry_id: i32,
    pub ticket_number: String,
    pub selection_method: SelectionMethod,
    pub prize_description: Option<String>,
    pub notes: Option<String>,
    pub selected_at: DateTime<Utc>,
}

impl From<winner::Model> for WinnerResponse {
    fn from(m: winner::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            raffle_id: m.raffle_id,
            entry_id: m.entry_id,
            ticket_number: m.ticket_number,
            selection_method: m.selection_method,
            prize_description: m.prize_description,
            notes: m.notes,
            selected_at: m.selected_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WinnerListResponse {
    pub data: Vec<WinnerResponse>,
}

/// Selection readiness of a campaign.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PoolResponse {
    pub tenant_id: String,
    pub raffle_id: i32,
    pub phase: RafflePhase,
    /// Entries that have not won yet.
    pub eligible_entries: u64,
    pub total_entries: u64,
    pub winners: u64,
}
