use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

/// Bounded retry with exponential backoff, used where a storage uniqueness
/// constraint turns a lost race into a retryable conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u8,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u8, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Attempt numbers `1..=max_attempts`.
    pub fn attempts(&self) -> RangeInclusive<u8> {
        1..=self.max_attempts
    }

    pub fn is_last(&self, attempt: u8) -> bool {
        attempt >= self.max_attempts
    }

    /// Delay to wait after the failed `attempt` (1-based).
    ///
    /// `min(base * 2^(attempt-1) + jitter, max)` with 0-25% jitter.
    pub fn delay_after(&self, attempt: u8) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let factor = 2u64.saturating_pow(u32::from(attempt - 1));
        let delay = self.base_delay_ms.saturating_mul(factor);
        let jitter = if delay >= 4 {
            rand::rng().random_range(0..=delay / 4)
        } else {
            0
        };

        Duration::from_millis(delay.saturating_add(jitter).min(self.max_delay_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, 10, 200)
    }
}
