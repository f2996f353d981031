use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

/// Number of random digits at the end of a ticket number.
pub const TICKET_SUFFIX_DIGITS: usize = 6;

const SUFFIX_MIN: u32 = 100_000;
const SUFFIX_MAX: u32 = 999_999;

/// Human-readable ticket numbers of the form `{PREFIX}-{YEAR}-{NNNNNN}`,
/// e.g. `RAF-2025-483920`.
///
/// The suffix never starts with a zero, so each prefix and year pair has
/// 900,000 possible tickets. Uniqueness is enforced by storage; callers
/// re-roll on collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFormat {
    prefix: String,
}

impl TicketFormat {
    /// The prefix is upper-cased; it must be 1-8 ASCII alphanumerics.
    pub fn new(prefix: &str) -> Option<Self> {
        let prefix = prefix.trim();
        if prefix.is_empty()
            || prefix.len() > 8
            || !prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(Self {
            prefix: prefix.to_ascii_uppercase(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a ticket for the year of `now` using the thread RNG.
    pub fn generate(&self, now: DateTime<Utc>) -> String {
        self.generate_with(now.year(), &mut rand::rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, year: i32, rng: &mut R) -> String {
        let suffix = rng.random_range(SUFFIX_MIN..=SUFFIX_MAX);
        format!("{}-{}-{}", self.prefix, year, suffix)
    }

    /// Whether `ticket` was produced by this format.
    pub fn matches(&self, ticket: &str) -> bool {
        let mut parts = ticket.splitn(3, '-');
        let (Some(prefix), Some(year), Some(suffix)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        prefix == self.prefix
            && year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && suffix.len() == TICKET_SUFFIX_DIGITS
            && suffix.chars().all(|c| c.is_ascii_digit())
            && !suffix.starts_with('0')
    }
}

impl Default for TicketFormat {
    fn default() -> Self {
        Self {
            prefix: "RAF".into(),
        }
    }
}
