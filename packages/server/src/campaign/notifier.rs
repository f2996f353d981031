use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::entity::{entry, raffle, tenant, winner};

/// Outbound participant email.
///
/// Implementations may fail; callers go through [`dispatch_entry_confirmation`]
/// and [`dispatch_winner_notification`], which run them detached and only log
/// failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_entry_confirmation(
        &self,
        entry: &entry::Model,
        raffle: &raffle::Model,
        tenant: &tenant::Model,
    ) -> anyhow::Result<()>;

    async fn send_winner_notification(
        &self,
        winner: &winner::Model,
        entry: &entry::Model,
        raffle: &raffle::Model,
        tenant: &tenant::Model,
    ) -> anyhow::Result<()>;
}

/// Writes notifications to the log instead of sending mail.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_entry_confirmation(
        &self,
        entry: &entry::Model,
        raffle: &raffle::Model,
        tenant: &tenant::Model,
    ) -> anyhow::Result<()> {
        info!(
            to = %entry.email,
            ticket_number = %entry.ticket_number,
            raffle = %raffle.title,
            tenant = %tenant.name,
            brand_color = tenant.brand_color.as_deref().unwrap_or_default(),
            "Entry confirmation"
        );
        Ok(())
    }

    async fn send_winner_notification(
        &self,
        winner: &winner::Model,
        entry: &entry::Model,
        raffle: &raffle::Model,
        tenant: &tenant::Model,
    ) -> anyhow::Result<()> {
        info!(
            to = %entry.email,
            ticket_number = %winner.ticket_number,
            prize = winner.prize_description.as_deref().unwrap_or_default(),
            raffle = %raffle.title,
            tenant = %tenant.name,
            "Winner notification"
        );
        Ok(())
    }
}

/// Send an entry confirmation in the background.
pub fn dispatch_entry_confirmation(
    notifier: Arc<dyn Notifier>,
    entry: entry::Model,
    raffle: raffle::Model,
    tenant: tenant::Model,
) {
    tokio::spawn(async move {
        if let Err(e) = notifier
            .send_entry_confirmation(&entry, &raffle, &tenant)
            .await
        {
            warn!(
                entry_id = entry.id,
                ticket_number = %entry.ticket_number,
                error = %e,
                "Failed to send entry confirmation"
            );
        }
    });
}

/// Send a winner notification in the background.
pub fn dispatch_winner_notification(
    notifier: Arc<dyn Notifier>,
    winner: winner::Model,
    entry: entry::Model,
    raffle: raffle::Model,
    tenant: tenant::Model,
) {
    tokio::spawn(async move {
        if let Err(e) = notifier
            .send_winner_notification(&winner, &entry, &raffle, &tenant)
            .await
        {
            warn!(
                winner_id = winner.id,
                entry_id = entry.id,
                error = %e,
                "Failed to send winner notification"
            );
        }
    });
}
