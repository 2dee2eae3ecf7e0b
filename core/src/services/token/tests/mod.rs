//! Tests for the token manager and the cleanup service


use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::token::{Claims, ExtraClaims};
use crate::errors::{DomainResult, TokenError};
use crate::services::codec::{JwtCodec, TokenCodec};
use crate::services::token::{AuthManager, AuthManagerConfig};

pub(super) const TEST_SECRET: &str = "s1";

pub(super) fn test_config() -> AuthManagerConfig {
    AuthManagerConfig::new(TEST_SECRET, Duration::hours(1), Duration::hours(24))
}

pub(super) fn create_test_manager() -> AuthManager {
    AuthManager::new(test_config()).expect("Failed to create token manager")
}

pub(super) fn role_claims() -> ExtraClaims {
    let mut extra = ExtraClaims::new();
    extra.insert("role".to_string(), json!("admin"));
    extra
}

/// JWT codec whose operations can be made to fail on demand
pub(super) struct FlakyCodec {
    inner: JwtCodec,
    fail_encode: AtomicBool,
    fail_deny: AtomicBool,
    fail_purge: AtomicBool,
}

impl FlakyCodec {
    pub(super) fn new() -> Self {
        Self {
            inner: JwtCodec::new(TEST_SECRET.as_bytes(), Duration::hours(1)),
            fail_encode: AtomicBool::new(false),
            fail_deny: AtomicBool::new(false),
            fail_purge: AtomicBool::new(false),
        }
    }

    pub(super) fn set_fail_encode(&self, fail: bool) {
        self.fail_encode.store(fail, Ordering::SeqCst);
    }

    pub(super) fn set_fail_deny(&self, fail: bool) {
        self.fail_deny.store(fail, Ordering::SeqCst);
    }

    pub(super) fn set_fail_purge(&self, fail: bool) {
        self.fail_purge.store(fail, Ordering::SeqCst);
    }

    pub(super) fn inner(&self) -> &JwtCodec {
        &self.inner
    }
}

impl TokenCodec for FlakyCodec {
    fn encode(
        &self,
        subject: &str,
        extra: &ExtraClaims,
        ttl: Option<Duration>,
    ) -> DomainResult<String> {
        if self.fail_encode.load(Ordering::SeqCst) {
            return Err(TokenError::TokenGenerationFailed.into());
        }
        self.inner.encode(subject, extra, ttl)
    }

    fn decode(&self, token: &str) -> DomainResult<Claims> {
        self.inner.decode(token)
    }

    fn deny(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        if self.fail_deny.load(Ordering::SeqCst) {
            return Err(TokenError::DenylistFailed.into());
        }
        self.inner.deny(token, expires_at)
    }

    fn purge_denylist(&self) -> DomainResult<usize> {
        if self.fail_purge.load(Ordering::SeqCst) {
            return Err(TokenError::DenylistFailed.into());
        }
        self.inner.purge_denylist()
    }
}
