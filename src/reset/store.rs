use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::one::RefMut;

use crate::clock::Clock;
use crate::models::ResetToken;

use super::code;

/// How long an issued code stays valid.
const CODE_TTL_MINUTES: i64 = 15;

/// In-memory store holding at most one reset token per email.
/// Issuing again for the same email supersedes the previous token.
pub struct ResetCodeStore {
    entries: DashMap<String, ResetToken>,
    clock: Arc<dyn Clock>,
}

impl ResetCodeStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Issue a fresh token for `email`. Any existing token for that email
    /// becomes invalid immediately, even if unexpired.
    pub fn issue(&self, email: &str) -> ResetToken {
        let now = self.clock.now();
        let token = ResetToken {
            email: email.to_string(),
            code: code::generate(),
            issued_at: now,
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
            used: false,
        };
        self.entries.insert(email.to_string(), token.clone());
        token
    }

    pub fn lookup(&self, email: &str) -> Option<ResetToken> {
        self.entries.get(email).map(|entry| entry.clone())
    }

    /// Mark the current token for `email` as used; no-op if none exists.
    pub fn mark_used(&self, email: &str) {
        if let Some(mut entry) = self.entries.get_mut(email) {
            entry.used = true;
        }
    }

    pub fn delete(&self, email: &str) {
        self.entries.remove(email);
    }

    /// Locked mutable access to the current token. The returned guard holds
    /// the entry lock, so a read-check-write sequence against it is atomic
    /// with respect to other calls for the same email. Do not call other
    /// store methods for this email while the guard is alive.
    pub(crate) fn entry_mut(&self, email: &str) -> Option<RefMut<'_, String, ResetToken>> {
        self.entries.get_mut(email)
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Evict tokens past their expiry, used or not. Returns the eviction count.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, token| now <= token.expires_at);
        before - self.entries.len()
    }
}
