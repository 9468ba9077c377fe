use std::time::{Duration, Instant};

use dashmap::DashMap;

const WINDOW_SECS: u64 = 15 * 60;
const SEND_LIMIT: u32 = 5;
const VERIFY_FAILURE_LIMIT: u32 = 10;

/// Per-email limiter on reset-code issuance using a sliding window.
/// Callers pass already-normalized email addresses.
pub struct SendCodeRateLimiter {
    /// email -> (count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl SendCodeRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if an issuance is allowed and count it. Returns Ok(()) or Err
    /// with retry-after seconds. 5 issuances per 15 minutes.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let window = Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_string()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= SEND_LIMIT {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(WINDOW_SECS.saturating_sub(elapsed));
        }

        *count += 1;
        Ok(())
    }

    /// Remove stale entries older than the given duration.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

/// Per-email brute force limiter on verification attempts. A 6-digit code
/// space is small enough that unthrottled guessing is viable.
pub struct VerifyRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl VerifyRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if a verification attempt is allowed. 10 failures per 15 minutes.
    /// Does NOT increment the counter — call `record_failure()` on a rejected
    /// code.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let window = Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();

        let entry = self.entries.get(email);
        let Some(entry) = entry else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > window {
            return Ok(());
        }

        if *count >= VERIFY_FAILURE_LIMIT {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(WINDOW_SECS.saturating_sub(elapsed));
        }

        Ok(())
    }

    /// Record a rejected verification attempt for the given email.
    pub fn record_failure(&self, email: &str) {
        let window = Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_string()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}
