//! Winner selection.
//!
//! The eligible pool is recomputed on every attempt. The unique key on
//! `winner(tenant_id, raffle_id, entry_id)` is the only thing that decides a
//! race: whoever inserts first wins the entry, and a random draw that loses
//! simply draws again from the smaller pool.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use raffle_common::SelectionMethod;
use raffle_common::retry::RetryPolicy;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::{debug, warn};

use crate::entity::{entry, winner};

use super::CampaignError;
use super::gate::require_drawable;
use super::notifier::{Notifier, dispatch_winner_notification};
use super::store::CampaignContext;

#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub method: SelectionMethod,
    /// Required for manual selection, rejected for random.
    pub entry_id: Option<i32>,
    pub prize_description: Option<String>,
    pub notes: Option<String>,
}

fn pool_query(tenant_id: &str, raffle_id: i32) -> Select<entry::Entity> {
    entry::Entity::find()
        .filter(entry::Column::TenantId.eq(tenant_id))
        .filter(entry::Column::RaffleId.eq(raffle_id))
        .filter(
            entry::Column::Id.not_in_subquery(
                SeaQuery::select()
                    .column(winner::Column::EntryId)
                    .from(winner::Entity)
                    .and_where(winner::Column::TenantId.eq(tenant_id))
                    .and_where(winner::Column::RaffleId.eq(raffle_id))
                    .to_owned(),
            ),
        )
}

/// Ids of entries that have not won yet, in submission order.
pub async fn eligible_entry_ids<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<Vec<i32>, DbErr> {
    pool_query(tenant_id, raffle_id)
        .select_only()
        .column(entry::Column::Id)
        .order_by_asc(entry::Column::Id)
        .into_tuple()
        .all(db)
        .await
}

pub async fn eligible_pool_size<C: ConnectionTrait>(
    db: &C,
    tenant_id: &str,
    raffle_id: i32,
) -> Result<u64, DbErr> {
    pool_query(tenant_id, raffle_id).count(db).await
}

/// Choose an entry id from the pool.
///
/// Random draws are uniform over the pool. Manual picks must be pool members.
pub fn pick<R: Rng + ?Sized>(
    method: SelectionMethod,
    pool: &[i32],
    requested: Option<i32>,
    rng: &mut R,
) -> Result<i32, CampaignError> {
    if pool.is_empty() {
        return Err(CampaignError::NoEligibleEntries);
    }
    match (method, requested) {
        (SelectionMethod::Random, _) => Ok(pool[rng.random_range(0..pool.len())]),
        (SelectionMethod::Manual, Some(id)) if pool.contains(&id) => Ok(id),
        (SelectionMethod::Manual, Some(id)) => Err(CampaignError::EntryNotEligible(id)),
        (SelectionMethod::Manual, None) => Err(CampaignError::InvalidField {
            field: "entry_id",
            reason: "is required for manual selection",
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct SelectionService<'a, C: ConnectionTrait> {
    conn: &'a C,
    backoff: RetryPolicy,
}

impl<'a, C: ConnectionTrait> SelectionService<'a, C> {
    /// Only the delays of `backoff` apply; lost random draws redraw until
    /// the pool is empty.
    pub fn new(conn: &'a C, backoff: RetryPolicy) -> Self {
        Self { conn, backoff }
    }

    /// Commit one winner for the campaign, then notify them in the background.
    pub async fn select(
        &self,
        ctx: &CampaignContext,
        request: SelectionRequest,
        notifier: Arc<dyn Notifier>,
        now: DateTime<Utc>,
    ) -> Result<winner::Model, CampaignError> {
        require_drawable(&ctx.raffle.window(), now)?;
        if request.method == SelectionMethod::Random && request.entry_id.is_some() {
            return Err(CampaignError::InvalidField {
                field: "entry_id",
                reason: "only applies to manual selection",
            });
        }

        let tenant_id = ctx.tenant.id.as_str();
        let raffle_id = ctx.raffle.id;
        let prize_description = non_blank(request.prize_description);
        let notes = non_blank(request.notes);

        // Every lost race means another winner was committed, so the pool
        // shrinks on each redraw and the loop ends once it is empty.
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let pool = eligible_entry_ids(self.conn, tenant_id, raffle_id).await?;
            let chosen = pick(request.method, &pool, request.entry_id, &mut rand::rng())?;

            let entry = entry::Entity::find_by_id(chosen)
                .one(self.conn)
                .await?
                .ok_or(CampaignError::EntryNotEligible(chosen))?;

            let model = winner::ActiveModel {
                tenant_id: Set(tenant_id.to_string()),
                raffle_id: Set(raffle_id),
                entry_id: Set(entry.id),
                ticket_number: Set(entry.ticket_number.clone()),
                selection_method: Set(request.method),
                prize_description: Set(prize_description.clone()),
                notes: Set(notes.clone()),
                selected_at: Set(now),
                ..Default::default()
            };

            match model.insert(self.conn).await {
                Ok(winner) => {
                    debug!(
                        winner_id = winner.id,
                        entry_id = entry.id,
                        method = %request.method,
                        attempt,
                        "Winner selected"
                    );
                    dispatch_winner_notification(
                        notifier,
                        winner.clone(),
                        entry,
                        ctx.raffle.clone(),
                        ctx.tenant.clone(),
                    );
                    return Ok(winner);
                }
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    if request.method == SelectionMethod::Manual {
                        return Err(CampaignError::EntryNotEligible(entry.id));
                    }
                    warn!(attempt, entry_id = entry.id, "Lost selection race, redrawing");
                    let step = u8::try_from(attempt).unwrap_or(u8::MAX);
                    tokio::time::sleep(self.backoff.delay_after(step)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
