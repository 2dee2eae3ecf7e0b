//! Registry of outstanding refresh tokens

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::repositories::token_digest;

/// Registry entry for one outstanding refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredToken {
    /// Subject the refresh token was issued to
    pub subject: String,
}

/// Mapping from outstanding refresh tokens to their subject
///
/// A token is present exactly while it has been issued and neither consumed
/// nor revoked. Every method takes the lock for a single map operation, so
/// no caller can observe a half-applied change. The map itself is never
/// handed out.
#[derive(Debug, Default)]
pub struct RefreshTokenRegistry {
    entries: RwLock<HashMap<String, RegisteredToken>>,
}

impl RefreshTokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `token` as issued to `subject`
    ///
    /// Returns `false` if the token was already present; the existing entry
    /// is left untouched in that case.
    pub fn register(&self, token: &str, subject: &str) -> bool {
        let entry = RegisteredToken {
            subject: subject.to_string(),
        };

        match self.write().entry(token_digest(token)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    /// Whether `token` is currently registered
    pub fn contains(&self, token: &str) -> bool {
        self.read().contains_key(&token_digest(token))
    }

    /// Remove `token` if present, returning its entry
    ///
    /// Check and removal happen under one write lock: of any number of
    /// concurrent callers presenting the same token, exactly one gets `Some`.
    pub fn take(&self, token: &str) -> Option<RegisteredToken> {
        self.write().remove(&token_digest(token))
    }

    /// Put back an entry previously obtained from [`take`](Self::take)
    pub(crate) fn restore(&self, token: &str, entry: RegisteredToken) {
        self.write().entry(token_digest(token)).or_insert(entry);
    }

    /// Number of outstanding refresh tokens
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no refresh tokens are outstanding
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Each critical section is a single map call, so a panic elsewhere while
    // holding the lock cannot leave the map inconsistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, RegisteredToken>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, RegisteredToken>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
