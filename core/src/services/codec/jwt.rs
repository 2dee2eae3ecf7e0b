//! HS256 JSON Web Token codec with an in-memory denylist

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, ExtraClaims};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::Denylist;

use super::TokenCodec;

/// JWT codec signing with a shared secret
///
/// Expiry is checked with zero leeway. `exp` and `sub` must be present.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
    denylist: Denylist,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("validation", &self.validation)
            .field("default_ttl", &self.default_ttl)
            .field("denylist_len", &self.denylist.len())
            .finish()
    }
}

impl JwtCodec {
    /// Creates a codec for `secret`
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC signing secret
    /// * `default_ttl` - Lifetime used when `encode` is called without one
    pub fn new(secret: &[u8], default_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl,
            denylist: Denylist::new(),
        }
    }

    /// Lifetime applied when no explicit one is given
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The denylist this codec consults on every decode
    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Encodes prepared claims into a JWT
    pub fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }
}

impl TokenCodec for JwtCodec {
    fn encode(
        &self,
        subject: &str,
        extra: &ExtraClaims,
        ttl: Option<Duration>,
    ) -> DomainResult<String> {
        let claims = Claims::new(subject, extra.clone(), ttl.unwrap_or(self.default_ttl))
            .ok_or(TokenError::TokenGenerationFailed)?;
        self.encode_claims(&claims)
    }

    fn decode(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::TokenInvalid,
            })?;

        // Signature first, so arbitrary strings never reach the denylist lookup
        if self.denylist.contains(token) {
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(token_data.claims)
    }

    fn deny(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        self.denylist.insert(token, expires_at);
        Ok(())
    }

    fn purge_denylist(&self) -> DomainResult<usize> {
        Ok(self.denylist.purge_expired())
    }
}
