use std::sync::Arc;

use chrono::{DateTime, Utc};
use raffle_common::contact::is_valid_email;
use raffle_common::question::check_answers;
use raffle_common::retry::RetryPolicy;
use raffle_common::{Answers, CustomQuestion, RaffleWindow, TicketFormat};
use sea_orm::*;
use tracing::{debug, warn};

use crate::entity::entry;

use super::CampaignError;
use super::gate::require_accepting_entries;
use super::notifier::{Notifier, dispatch_entry_confirmation};
use super::store::CampaignContext;

pub const MAX_NAME_LEN: usize = 100;

/// What a participant submits on the public page.
#[derive(Debug, Clone)]
pub struct EntrySubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub answers: Answers,
    pub agreed_to_terms: bool,
    pub agreed_to_marketing: bool,
}

/// A submission that passed every precondition, normalised for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub answers: Answers,
    pub agreed_to_marketing: bool,
}

fn require_name(field: &'static str, value: &str) -> Result<String, CampaignError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CampaignError::InvalidField {
            field,
            reason: "must not be empty",
        });
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(CampaignError::InvalidField {
            field,
            reason: "must be at most 100 characters",
        });
    }
    Ok(value.to_string())
}

/// Check a submission. The first failing precondition wins, in this order:
/// lifecycle, terms, contact fields, required answers, select options.
pub fn check_submission(
    window: &RaffleWindow,
    questions: &[CustomQuestion],
    submission: &EntrySubmission,
    now: DateTime<Utc>,
) -> Result<AdmittedEntry, CampaignError> {
    require_accepting_entries(window, now)?;

    if !submission.agreed_to_terms {
        return Err(CampaignError::TermsNotAccepted);
    }

    let first_name = require_name("first_name", &submission.first_name)?;
    let last_name = require_name("last_name", &submission.last_name)?;
    let email = submission.email.trim();
    if email.is_empty() {
        return Err(CampaignError::InvalidField {
            field: "email",
            reason: "must not be empty",
        });
    }
    if !is_valid_email(email) {
        return Err(CampaignError::InvalidField {
            field: "email",
            reason: "is not a valid email address",
        });
    }

    let answers = check_answers(questions, &submission.answers)?;

    Ok(AdmittedEntry {
        first_name,
        last_name,
        email: email.to_string(),
        answers,
        agreed_to_marketing: submission.agreed_to_marketing,
    })
}

pub struct AdmissionService<'a, C: ConnectionTrait> {
    conn: &'a C,
    tickets: TicketFormat,
    retry: RetryPolicy,
}

impl<'a, C: ConnectionTrait> AdmissionService<'a, C> {
    pub fn new(conn: &'a C, tickets: TicketFormat, retry: RetryPolicy) -> Self {
        Self {
            conn,
            tickets,
            retry,
        }
    }

    /// Validate and persist an entry, then send the confirmation in the
    /// background.
    pub async fn submit(
        &self,
        ctx: &CampaignContext,
        submission: EntrySubmission,
        notifier: Arc<dyn Notifier>,
        now: DateTime<Utc>,
    ) -> Result<entry::Model, CampaignError> {
        let admitted = check_submission(
            &ctx.raffle.window(),
            &ctx.customizations.custom_questions,
            &submission,
            now,
        )?;

        let entry = self.insert_with_ticket(ctx, admitted, now).await?;
        debug!(
            entry_id = entry.id,
            ticket_number = %entry.ticket_number,
            "Entry admitted"
        );

        dispatch_entry_confirmation(
            notifier,
            entry.clone(),
            ctx.raffle.clone(),
            ctx.tenant.clone(),
        );
        Ok(entry)
    }

    /// Insert with a fresh ticket number, re-rolling when it collides.
    async fn insert_with_ticket(
        &self,
        ctx: &CampaignContext,
        admitted: AdmittedEntry,
        now: DateTime<Utc>,
    ) -> Result<entry::Model, CampaignError> {
        let answers: serde_json::Map<String, serde_json::Value> = admitted
            .answers
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();

        for attempt in self.retry.attempts() {
            let ticket_number = self.tickets.generate(now);
            let model = entry::ActiveModel {
                tenant_id: Set(ctx.tenant.id.clone()),
                raffle_id: Set(ctx.raffle.id),
                first_name: Set(admitted.first_name.clone()),
                last_name: Set(admitted.last_name.clone()),
                email: Set(admitted.email.clone()),
                answers: Set(serde_json::Value::Object(answers.clone())),
                agreed_to_terms: Set(true),
                agreed_to_marketing: Set(admitted.agreed_to_marketing),
                ticket_number: Set(ticket_number.clone()),
                submitted_at: Set(now),
                ..Default::default()
            };

            match model.insert(self.conn).await {
                Ok(entry) => return Ok(entry),
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    warn!(attempt, %ticket_number, "Ticket number collision");
                    if self.retry.is_last(attempt) {
                        break;
                    }
                    tokio::time::sleep(self.retry.delay_after(attempt)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CampaignError::Contention)
    }
}
