use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::clock::Clock;
use crate::models::ResetToken;

use super::store::ResetCodeStore;

/// Why a verification attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    NotFound,
    AlreadyUsed,
    Expired,
    Mismatch,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Deliberately vague: does not disclose whether the email has
            // an outstanding reset.
            VerifyError::NotFound => write!(f, "invalid or expired code"),
            VerifyError::AlreadyUsed => write!(f, "code already used"),
            VerifyError::Expired => write!(f, "code expired"),
            VerifyError::Mismatch => write!(f, "invalid code"),
        }
    }
}

/// Issues reset codes and consumes them on successful verification.
pub struct ResetService {
    store: ResetCodeStore,
}

impl ResetService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: ResetCodeStore::new(clock),
        }
    }

    /// Issue a token for `email`, superseding any existing one.
    pub fn issue(&self, email: &str) -> ResetToken {
        self.store.issue(email)
    }

    /// Check `submitted` against the current token for `email` and mark the
    /// token used on success.
    ///
    /// Check order is load-bearing: a used token answers `AlreadyUsed` even
    /// past its expiry, and an expired token answers `Expired` even when the
    /// submitted code is wrong. The whole sequence runs under the store's
    /// per-entry lock, so concurrent attempts for one email serialize and
    /// only one can consume the token.
    pub fn verify(&self, email: &str, submitted: &str) -> Result<(), VerifyError> {
        let now = self.store.now();

        let Some(mut token) = self.store.entry_mut(email) else {
            return Err(VerifyError::NotFound);
        };

        if token.used {
            return Err(VerifyError::AlreadyUsed);
        }

        if now > token.expires_at {
            // Entry lock must be released before removal.
            drop(token);
            self.store.delete(email);
            return Err(VerifyError::Expired);
        }

        if !bool::from(token.code.as_bytes().ct_eq(submitted.as_bytes())) {
            return Err(VerifyError::Mismatch);
        }

        token.used = true;
        Ok(())
    }

    /// Evict expired tokens. Returns the eviction count.
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep_expired()
    }

    pub fn store(&self) -> &ResetCodeStore {
        &self.store
    }
}
