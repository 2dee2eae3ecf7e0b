//! Token manager: issues, rotates and revokes access/refresh token pairs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tl_shared::JwtConfig;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{
    without_refresh_marker, Claims, ExtraClaims, TokenPair, REFRESH_TOKEN_TYPE, TOKEN_TYPE_CLAIM,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{token_digest, RefreshTokenRegistry};
use crate::services::codec::{JwtCodec, TokenCodec};

use super::cleanup::{DenylistCleanupConfig, DenylistCleanupService};
use super::config::AuthManagerConfig;

/// Issues token pairs and tracks which refresh tokens are still usable
///
/// Access tokens are stateless: once issued they stay valid until they
/// expire. Refresh tokens are single-use and live in the registry from
/// issuance until they are exchanged or revoked.
///
/// All methods take `&self`; share one manager between threads with `Arc`.
pub struct AuthManager<C: TokenCodec = JwtCodec> {
    codec: Arc<C>,
    registry: RefreshTokenRegistry,
    config: AuthManagerConfig,
    logging_enabled: AtomicBool,
}

impl AuthManager<JwtCodec> {
    /// Creates a manager backed by an HS256 [`JwtCodec`]
    ///
    /// The codec is keyed with `config.secret` and uses the access token
    /// lifetime as its default.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - Empty secret, or a lifetime that is not
    ///   positive or exceeds [`MAX_TOKEN_TTL_DAYS`](super::config::MAX_TOKEN_TTL_DAYS)
    pub fn new(config: AuthManagerConfig) -> DomainResult<Self> {
        config.validate()?;
        let codec = JwtCodec::new(config.secret.as_bytes(), config.access_token_ttl);
        Ok(Self::from_parts(Arc::new(codec), config))
    }

    /// Creates a manager from the shared JWT configuration
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - As for [`new`](Self::new), or a lifetime in
    ///   seconds too large to represent
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        Self::new(AuthManagerConfig::try_from(config)?)
    }
}

impl<C: TokenCodec> AuthManager<C> {
    /// Creates a manager around an existing codec
    ///
    /// `config.secret` is not used; the codec already owns its keys.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - A lifetime out of range
    pub fn with_codec(codec: Arc<C>, config: AuthManagerConfig) -> DomainResult<Self> {
        config.validate_lifetimes()?;
        Ok(Self::from_parts(codec, config))
    }

    fn from_parts(codec: Arc<C>, config: AuthManagerConfig) -> Self {
        let logging_enabled = AtomicBool::new(config.logging_enabled);
        Self {
            codec,
            registry: RefreshTokenRegistry::new(),
            config,
            logging_enabled,
        }
    }

    /// Generates a new token pair for `subject`
    ///
    /// The access token carries `extra` as given. The refresh token carries
    /// `extra` plus the refresh marker, and is registered as usable.
    ///
    /// # Arguments
    ///
    /// * `subject` - Identity the pair is bound to; must not be empty
    /// * `extra` - Opaque claims copied into both tokens
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens, with the refresh token registered
    /// * `Err(TokenError::InvalidSubject)` - `subject` was empty; nothing was minted
    /// * `Err(TokenError::TokenGenerationFailed)` - The codec failed to sign
    pub fn generate_token_pair(&self, subject: &str, extra: &ExtraClaims) -> DomainResult<TokenPair> {
        if subject.is_empty() {
            if self.logging_enabled() {
                warn!("Rejected token pair request with empty subject");
            }
            return Err(TokenError::InvalidSubject.into());
        }

        // A caller-supplied refresh marker never reaches the access token
        let access_extra = without_refresh_marker(extra);
        let mut refresh_extra = access_extra.clone();
        refresh_extra.insert(
            TOKEN_TYPE_CLAIM.to_string(),
            Value::String(REFRESH_TOKEN_TYPE.to_string()),
        );

        let access_token =
            self.codec
                .encode(subject, &access_extra, Some(self.config.access_token_ttl))?;
        let refresh_token =
            self.codec
                .encode(subject, &refresh_extra, Some(self.config.refresh_token_ttl))?;

        if !self.registry.register(&refresh_token, subject) {
            if self.logging_enabled() {
                warn!(
                    subject,
                    token = %token_ref(&refresh_token),
                    "Codec produced a refresh token that is already registered"
                );
            }
            return Err(TokenError::TokenGenerationFailed.into());
        }

        if self.logging_enabled() {
            info!(
                subject,
                refresh_token = %token_ref(&refresh_token),
                "Issued token pair"
            );
        }

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl,
            self.config.refresh_token_ttl,
        ))
    }

    /// Exchanges a refresh token for a new token pair (with rotation)
    ///
    /// The presented refresh token is consumed: it is removed from the
    /// registry in the same critical section that checks it, before the new
    /// pair is minted. Of several concurrent calls with the same token, only
    /// one succeeds. If minting fails, the old token is put back and stays
    /// usable.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - A refresh token previously returned by this manager
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair for the same subject and extra claims
    /// * `Err(TokenError::TokenInvalid)` - Bad signature or malformed token
    /// * `Err(TokenError::TokenExpired)` - The refresh token's lifetime elapsed
    /// * `Err(TokenError::NotARefreshToken)` - The token lacks the refresh marker
    /// * `Err(TokenError::RefreshTokenNotFound)` - Never issued, already used, or revoked
    pub fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.codec.decode(refresh_token).map_err(|err| match err {
            // A denylisted string is indistinguishable from a revoked one
            DomainError::Token(TokenError::TokenRevoked) => TokenError::RefreshTokenNotFound.into(),
            other => other,
        })?;

        if !claims.is_refresh_token() {
            if self.logging_enabled() {
                debug!(subject = claims.subject(), "Refresh attempted with a non-refresh token");
            }
            return Err(TokenError::NotARefreshToken.into());
        }

        let entry = match self.registry.take(refresh_token) {
            Some(entry) => entry,
            None => {
                if self.logging_enabled() {
                    warn!(
                        subject = claims.subject(),
                        token = %token_ref(refresh_token),
                        "Refresh token not registered; unknown, reused or revoked"
                    );
                }
                return Err(TokenError::RefreshTokenNotFound.into());
            }
        };

        match self.generate_token_pair(&entry.subject, &claims.caller_extra()) {
            Ok(pair) => {
                if self.logging_enabled() {
                    info!(
                        subject = %entry.subject,
                        old_token = %token_ref(refresh_token),
                        new_token = %token_ref(&pair.refresh_token),
                        "Rotated refresh token"
                    );
                }
                Ok(pair)
            }
            Err(err) => {
                if self.logging_enabled() {
                    warn!(
                        subject = %entry.subject,
                        error = %err,
                        "Rotation failed, old refresh token kept"
                    );
                }
                self.registry.restore(refresh_token, entry);
                Err(err)
            }
        }
    }

    /// Revokes a specific refresh token
    ///
    /// Removes it from the registry and asks the codec to denylist the raw
    /// string until it would have expired anyway.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The refresh token to revoke
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Token revoked
    /// * `Err(TokenError::RefreshTokenNotFound)` - Not registered (including already revoked)
    /// * `Err(TokenError::DenylistFailed)` - Removed from the registry, but the codec
    ///   could not record the denylist entry
    pub fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<()> {
        let entry = match self.registry.take(refresh_token) {
            Some(entry) => entry,
            None => {
                if self.logging_enabled() {
                    debug!(token = %token_ref(refresh_token), "Revocation of unknown refresh token");
                }
                return Err(TokenError::RefreshTokenNotFound.into());
            }
        };

        let deny_until = Utc::now()
            .checked_add_signed(self.config.refresh_token_ttl)
            .ok_or(TokenError::DenylistFailed)?;
        self.codec.deny(refresh_token, deny_until)?;

        if self.logging_enabled() {
            info!(
                subject = %entry.subject,
                token = %token_ref(refresh_token),
                until = %deny_until,
                "Revoked refresh token"
            );
        }

        Ok(())
    }

    /// Verifies an access token and returns the claims
    ///
    /// Access tokens are not tracked, so this is a pure codec check.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenInvalid)` - Bad signature, malformed or denylisted
    /// * `Err(TokenError::TokenExpired)` - The access token's lifetime elapsed
    pub fn validate_access_token(&self, access_token: &str) -> DomainResult<Claims> {
        self.codec.decode(access_token).map_err(|err| match err {
            DomainError::Token(TokenError::TokenRevoked) => TokenError::TokenInvalid.into(),
            other => other,
        })
    }

    /// Number of refresh tokens currently usable
    pub fn active_refresh_tokens(&self) -> usize {
        self.registry.len()
    }

    /// Whether `refresh_token` is currently registered
    ///
    /// Only registry membership; a registered token may still have expired.
    pub fn is_refresh_token_active(&self, refresh_token: &str) -> bool {
        self.registry.contains(refresh_token)
    }

    /// The codec this manager signs and verifies with
    pub fn codec(&self) -> &Arc<C> {
        &self.codec
    }

    /// The configuration the manager was built with
    pub fn config(&self) -> &AuthManagerConfig {
        &self.config
    }

    /// Turn tracing output on or off
    pub fn set_logging(&self, enabled: bool) {
        self.logging_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether tracing output is on
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled.load(Ordering::Relaxed)
    }

    /// Builds a cleanup service that purges this manager's codec denylist
    pub fn denylist_cleanup(&self, config: DenylistCleanupConfig) -> DenylistCleanupService<C> {
        DenylistCleanupService::new(Arc::clone(&self.codec), config)
    }
}

impl<C: TokenCodec> std::fmt::Debug for AuthManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("config", &self.config)
            .field("active_refresh_tokens", &self.registry.len())
            .field("logging_enabled", &self.logging_enabled())
            .finish()
    }
}

/// Short, non-reversible reference to a token for log lines
fn token_ref(token: &str) -> String {
    let mut digest = token_digest(token);
    digest.truncate(12);
    digest
}
