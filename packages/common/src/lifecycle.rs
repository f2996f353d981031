use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The configured entry window of a raffle. Both bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleWindow {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl RaffleWindow {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self { starts_at, ends_at }
    }

    /// Derive the lifecycle phase at `now`.
    pub fn phase_at(&self, now: DateTime<Utc>) -> RafflePhase {
        if now < self.starts_at {
            RafflePhase::Pending
        } else if now > self.ends_at {
            RafflePhase::Ended
        } else {
            RafflePhase::Active
        }
    }
}

/// Lifecycle phase of a raffle.
///
/// Nothing about the phase is persisted: it is always recomputed from the
/// wall clock and the raffle's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RafflePhase {
    /// The window has not opened yet.
    Pending,
    /// Entries are being accepted.
    Active,
    /// The window has closed; winners may be drawn.
    Ended,
}

impl RafflePhase {
    pub const ALL: &'static [RafflePhase] = &[Self::Pending, Self::Active, Self::Ended];

    pub fn accepts_entries(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn allows_selection(&self) -> bool {
        matches!(self, Self::Ended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for RafflePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid raffle phase '{0}'")]
pub struct ParsePhaseError(String);

impl FromStr for RafflePhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(ParsePhaseError(other.to_string())),
        }
    }
}
