// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff with jitter for channel retries (SPEC_FULL §4.5
//! "Retry"). The shape (multiply-by-two per attempt, cap, jitter drawn up
//! to half the delay) follows the pattern external HTTP health-check
//! retriers use; the growth itself is made genuinely exponential rather
//! than the constant-delay variant that pattern sometimes ships with.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub base: Duration,
    /// Total time budget since the first attempt; once exceeded, stop retrying.
    pub expire: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { base: Duration::from_secs(60), expire: Duration::from_secs(3600) }
    }
}

impl RetryPolicy {
    pub fn should_retry(&self, elapsed: Duration) -> bool {
        elapsed < self.expire
    }

    /// Delay before attempt number `attempt` (0-indexed: the delay before
    /// the *first* retry, i.e. after the initial attempt fails).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        delay_with_jitter(self.base, attempt)
    }
}

fn delay_with_jitter(base: Duration, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.min(20));
    let capped_ms = base.as_millis().min(u128::from(u64::MAX)) as u64;
    let scaled_ms = capped_ms.saturating_mul(factor);
    let jitter_ms = if scaled_ms == 0 { 0 } else { rand::random::<u64>() % (scaled_ms / 2 + 1) };
    Duration::from_millis(scaled_ms.saturating_add(jitter_ms))
}

/// `Retry-After` on a 429 always wins over the computed backoff when present.
pub fn delay_for_rate_limit(policy: &RetryPolicy, attempt: u32, retry_after: Option<Duration>) -> Duration {
    retry_after.unwrap_or_else(|| policy.delay_for_attempt(attempt))
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
