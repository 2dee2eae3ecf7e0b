//! Configuration for the token manager

use chrono::Duration;
use tl_shared::JwtConfig;

use crate::errors::{DomainError, DomainResult};

/// Longest accepted token lifetime, in days (about 100 years)
pub const MAX_TOKEN_TTL_DAYS: i64 = 36_500;

/// Configuration for the token manager
#[derive(Clone)]
pub struct AuthManagerConfig {
    /// JWT signing secret
    pub secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Emit tracing events; never affects control flow
    pub logging_enabled: bool,
}

impl AuthManagerConfig {
    /// Creates a configuration with logging disabled
    pub fn new(
        secret: impl Into<String>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl,
            refresh_token_ttl,
            logging_enabled: false,
        }
    }

    /// Enable or disable tracing output
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Checks that both lifetimes are strictly positive and at most
    /// [`MAX_TOKEN_TTL_DAYS`]
    pub fn validate_lifetimes(&self) -> DomainResult<()> {
        check_ttl("access", self.access_token_ttl)?;
        check_ttl("refresh", self.refresh_token_ttl)
    }

    /// Checks lifetimes and that the signing secret is not empty
    pub fn validate(&self) -> DomainResult<()> {
        if self.secret.is_empty() {
            return Err(DomainError::Validation {
                message: "signing secret must not be empty".to_string(),
            });
        }
        self.validate_lifetimes()
    }
}

impl Default for AuthManagerConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self::new(jwt.secret, Duration::minutes(15), Duration::days(7))
            .with_logging(jwt.logging_enabled)
    }
}

impl TryFrom<&JwtConfig> for AuthManagerConfig {
    type Error = DomainError;

    /// Converts lifetimes in seconds to `Duration`s
    ///
    /// Fails with `DomainError::Validation` when a second count cannot be
    /// represented as a `Duration`. Range checks happen in [`validate`](Self::validate).
    fn try_from(config: &JwtConfig) -> DomainResult<Self> {
        Ok(Self {
            secret: config.secret.clone(),
            access_token_ttl: ttl_from_seconds("access", config.access_token_expiry)?,
            refresh_token_ttl: ttl_from_seconds("refresh", config.refresh_token_expiry)?,
            logging_enabled: config.logging_enabled,
        })
    }
}

fn ttl_from_seconds(kind: &str, seconds: i64) -> DomainResult<Duration> {
    Duration::try_seconds(seconds).ok_or_else(|| DomainError::Validation {
        message: format!("{} token TTL of {} seconds is out of range", kind, seconds),
    })
}

fn check_ttl(kind: &str, ttl: Duration) -> DomainResult<()> {
    if ttl <= Duration::zero() {
        return Err(DomainError::Validation {
            message: format!("{} token TTL must be positive", kind),
        });
    }
    if ttl > Duration::days(MAX_TOKEN_TTL_DAYS) {
        return Err(DomainError::Validation {
            message: format!("{} token TTL must not exceed {} days", kind, MAX_TOKEN_TTL_DAYS),
        });
    }
    Ok(())
}

impl std::fmt::Debug for AuthManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManagerConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("logging_enabled", &self.logging_enabled)
            .finish()
    }
}
