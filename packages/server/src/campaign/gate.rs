//! Lifecycle checks. The phase is always derived from the wall clock, so
//! callers pass `now` explicitly.

use chrono::{DateTime, Utc};
use raffle_common::{RafflePhase, RaffleWindow};

use super::CampaignError;

fn require_active(window: &RaffleWindow, now: DateTime<Utc>) -> Result<(), CampaignError> {
    match window.phase_at(now) {
        RafflePhase::Active => Ok(()),
        RafflePhase::Pending => Err(CampaignError::RaffleNotStarted {
            starts_at: window.starts_at,
        }),
        RafflePhase::Ended => Err(CampaignError::RaffleEnded {
            ended_at: window.ends_at,
        }),
    }
}

/// The public page is only served while the raffle is active. Previews skip this.
pub fn require_viewable(window: &RaffleWindow, now: DateTime<Utc>) -> Result<(), CampaignError> {
    require_active(window, now)
}

/// Entries are only admitted while the raffle is active.
pub fn require_accepting_entries(window: &RaffleWindow, now: DateTime<Utc>) -> Result<(), CampaignError> {
    require_active(window, now)
}

/// Winners can only be drawn once the window has closed.
pub fn require_drawable(window: &RaffleWindow, now: DateTime<Utc>) -> Result<(), CampaignError> {
    if window.phase_at(now).allows_selection() {
        Ok(())
    } else {
        Err(CampaignError::RaffleStillActive {
            ends_at: window.ends_at,
        })
    }
}
