//! Token codec: signs claim sets into bearer strings and verifies them back
//!
//! The token manager only talks to a codec through [`TokenCodec`], so a host
//! can share one codec between several managers or substitute its own.
//! [`JwtCodec`] is the bundled implementation.

mod jwt;

pub use jwt::JwtCodec;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::token::{Claims, ExtraClaims};
use crate::errors::DomainResult;

/// Signing, verification and denylisting of bearer tokens
pub trait TokenCodec: Send + Sync {
    /// Sign `{subject, extra}` into a token valid for `ttl`
    ///
    /// `None` uses the codec's default lifetime.
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenGenerationFailed` - Signing failed
    fn encode(&self, subject: &str, extra: &ExtraClaims, ttl: Option<Duration>)
        -> DomainResult<String>;

    /// Verify `token` and decode its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenInvalid` - Bad signature or malformed token
    /// * `TokenError::TokenExpired` - The token's lifetime has elapsed
    /// * `TokenError::TokenRevoked` - The exact string is on the denylist
    fn decode(&self, token: &str) -> DomainResult<Claims>;

    /// Put the raw `token` string on the denylist until `expires_at`
    ///
    /// # Errors
    ///
    /// * `TokenError::DenylistFailed` - The entry could not be recorded
    fn deny(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()>;

    /// Drop denylist entries whose expiry has passed
    ///
    /// # Returns
    ///
    /// Number of entries removed
    fn purge_denylist(&self) -> DomainResult<usize>;
}
