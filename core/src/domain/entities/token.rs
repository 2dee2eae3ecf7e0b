//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Caller-supplied claims carried alongside the subject
pub type ExtraClaims = serde_json::Map<String, Value>;

/// Reserved extra-claim key distinguishing refresh tokens from access tokens
pub const TOKEN_TYPE_CLAIM: &str = "token_type";

/// Value of [`TOKEN_TYPE_CLAIM`] on refresh tokens
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity the token was issued for
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Extra claims, including the refresh marker on refresh tokens
    #[serde(rename = "ext", default, skip_serializing_if = "ExtraClaims::is_empty")]
    pub extra: ExtraClaims,
}

impl Claims {
    /// Creates claims for `subject` that expire `ttl` from now
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity the token is bound to
    /// * `extra` - Extra claims to embed verbatim
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    ///
    /// A new `Claims` instance with a fresh JWT ID, or `None` if `now + ttl`
    /// is not a representable instant
    pub fn new(subject: impl Into<String>, extra: ExtraClaims, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let expiry = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
            extra,
        })
    }

    /// The subject identity
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// The extra claims exactly as decoded
    pub fn extra(&self) -> &ExtraClaims {
        &self.extra
    }

    /// Issued-at as a `DateTime<Utc>`
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiration as a `DateTime<Utc>`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Whether the refresh marker is present
    pub fn is_refresh_token(&self) -> bool {
        self.extra.get(TOKEN_TYPE_CLAIM).and_then(Value::as_str) == Some(REFRESH_TOKEN_TYPE)
    }

    /// The extra claims with the refresh marker removed
    ///
    /// For a refresh token this is the bag the caller supplied when the pair
    /// was issued, minus any `token_type` key of their own.
    pub fn caller_extra(&self) -> ExtraClaims {
        without_refresh_marker(&self.extra)
    }
}

/// Copies `extra` without a `token_type = "refresh"` entry
///
/// Any other `token_type` value is ordinary caller data and is kept.
pub fn without_refresh_marker(extra: &ExtraClaims) -> ExtraClaims {
    extra
        .iter()
        .filter(|(key, value)| {
            key.as_str() != TOKEN_TYPE_CLAIM || value.as_str() != Some(REFRESH_TOKEN_TYPE)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Token pair returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    ///
    /// # Arguments
    ///
    /// * `access_token` - The JWT access token
    /// * `refresh_token` - The JWT refresh token
    /// * `access_ttl` - Lifetime the access token was minted with
    /// * `refresh_ttl` - Lifetime the refresh token was minted with
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extra_with_role() -> ExtraClaims {
        let mut extra = ExtraClaims::new();
        extra.insert("role".to_string(), json!("admin"));
        extra
    }

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("u1", extra_with_role(), Duration::hours(1)).unwrap();

        assert_eq!(claims.subject(), "u1");
        assert_eq!(claims.extra().get("role"), Some(&json!("admin")));
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
        assert!(!claims.is_refresh_token());
        assert!(claims.expires_at().unwrap() > claims.issued_at().unwrap());
    }

    #[test]
    fn test_claims_have_unique_ids() {
        let a = Claims::new("u1", ExtraClaims::new(), Duration::hours(1)).unwrap();
        let b = Claims::new("u1", ExtraClaims::new(), Duration::hours(1)).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("u1", ExtraClaims::new(), Duration::hours(1)).unwrap();
        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_refresh_marker_detection() {
        let mut extra = extra_with_role();
        extra.insert(TOKEN_TYPE_CLAIM.to_string(), json!(REFRESH_TOKEN_TYPE));
        let claims = Claims::new("u1", extra, Duration::days(1)).unwrap();

        assert!(claims.is_refresh_token());
        assert_eq!(claims.caller_extra(), extra_with_role());
    }

    #[test]
    fn test_refresh_marker_must_be_exact_string() {
        let mut extra = ExtraClaims::new();
        extra.insert(TOKEN_TYPE_CLAIM.to_string(), json!("access"));
        assert!(!Claims::new("u1", extra, Duration::days(1)).unwrap().is_refresh_token());

        let mut extra = ExtraClaims::new();
        extra.insert(TOKEN_TYPE_CLAIM.to_string(), json!(true));
        assert!(!Claims::new("u1", extra, Duration::days(1)).unwrap().is_refresh_token());
    }

    #[test]
    fn test_empty_extra_is_omitted_on_the_wire() {
        let claims = Claims::new("u1", ExtraClaims::new(), Duration::minutes(5)).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("ext").is_none());
        let decoded: Claims = serde_json::from_value(json).unwrap();
        assert!(decoded.extra.is_empty());
    }

    #[test]
    fn test_extra_does_not_collide_with_registered_claims() {
        let mut extra = ExtraClaims::new();
        extra.insert("sub".to_string(), json!("someone-else"));
        let claims = Claims::new("u1", extra, Duration::minutes(5)).unwrap();

        let json = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.subject(), "u1");
        assert_eq!(decoded.extra().get("sub"), Some(&json!("someone-else")));
    }

    #[test]
    fn test_unrepresentable_expiry_yields_none() {
        // about 270,000 years, past the last representable instant
        let ttl = Duration::days(100_000_000);
        assert!(Claims::new("u1", ExtraClaims::new(), ttl).is_none());
        assert!(Claims::new("u1", ExtraClaims::new(), Duration::milliseconds(i64::MAX)).is_none());
    }

    #[test]
    fn test_non_refresh_token_type_is_caller_data() {
        let mut extra = extra_with_role();
        extra.insert(TOKEN_TYPE_CLAIM.to_string(), json!("access"));

        assert_eq!(without_refresh_marker(&extra), extra);

        let mut marked = extra_with_role();
        marked.insert(TOKEN_TYPE_CLAIM.to_string(), json!(REFRESH_TOKEN_TYPE));
        assert_eq!(without_refresh_marker(&marked), extra_with_role());
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new(
            "access".to_string(),
            "refresh".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        );

        assert_eq!(pair.access_token, "access");
        assert_eq!(pair.refresh_token, "refresh");
        assert_eq!(pair.access_expires_in, 15 * 60);
        assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    }
}
