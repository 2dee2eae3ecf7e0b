//! Denylist of revoked token strings with expiry-bounded retention

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::token_digest;

/// Revoked token strings, each retained until the instant the token would
/// have expired on its own
#[derive(Debug, Default)]
pub struct Denylist {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl Denylist {
    /// Create an empty denylist
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny `token` until `expires_at`
    ///
    /// Re-denying an already listed token keeps the later of the two expiries.
    /// An expiry already in the past records nothing.
    pub fn insert(&self, token: &str, expires_at: DateTime<Utc>) {
        if expires_at <= Utc::now() {
            return;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let slot = entries.entry(token_digest(token)).or_insert(expires_at);
        if *slot < expires_at {
            *slot = expires_at;
        }
    }

    /// Whether `token` is currently denied
    ///
    /// Entries past their expiry no longer count, whether or not they have
    /// been purged yet.
    pub fn contains(&self, token: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&token_digest(token))
            .is_some_and(|expires_at| *expires_at > Utc::now())
    }

    /// Drop entries whose expiry has passed, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    /// Number of retained entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no entries are retained
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
