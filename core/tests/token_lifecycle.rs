//! Integration tests for the token lifecycle through the public API

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use tl_core::{
    AuthManager, AuthManagerConfig, DomainError, ErrorCategory, ExtraClaims, TokenError,
};
use tl_shared::{IntoErrorResponse, JwtConfig};

fn manager() -> AuthManager {
    AuthManager::new(AuthManagerConfig::new(
        "s1",
        Duration::hours(1),
        Duration::hours(24),
    ))
    .expect("valid configuration")
}

fn token_error(err: DomainError) -> TokenError {
    err.as_token_error().cloned().expect("token error")
}

#[test]
fn full_lifecycle_issue_refresh_revoke() {
    let manager = manager();
    let mut extra = ExtraClaims::new();
    extra.insert("role".to_string(), json!("admin"));

    let issued = manager.generate_token_pair("u1", &extra).unwrap();
    let claims = manager.validate_access_token(&issued.access_token).unwrap();
    assert_eq!(claims.subject(), "u1");
    assert_eq!(claims.extra(), &extra);

    let rotated = manager.refresh_access_token(&issued.refresh_token).unwrap();
    let claims = manager.validate_access_token(&rotated.access_token).unwrap();
    assert_eq!(claims.subject(), "u1");
    assert_eq!(claims.extra(), &extra);

    manager.revoke_refresh_token(&rotated.refresh_token).unwrap();
    assert_eq!(manager.active_refresh_tokens(), 0);

    for stale in [&issued.refresh_token, &rotated.refresh_token] {
        let err = manager.refresh_access_token(stale).unwrap_err();
        assert_eq!(token_error(err), TokenError::RefreshTokenNotFound);
    }
}

#[test]
fn state_errors_hide_their_cause() {
    let manager = manager();
    let consumed = manager.generate_token_pair("u1", &ExtraClaims::new()).unwrap();
    let revoked = manager.generate_token_pair("u1", &ExtraClaims::new()).unwrap();
    manager.refresh_access_token(&consumed.refresh_token).unwrap();
    manager.revoke_refresh_token(&revoked.refresh_token).unwrap();

    let consumed_err = manager.refresh_access_token(&consumed.refresh_token).unwrap_err();
    let revoked_err = manager.refresh_access_token(&revoked.refresh_token).unwrap_err();

    assert_eq!(consumed_err.to_string(), revoked_err.to_string());
    assert_eq!(
        consumed_err.to_error_response().error,
        revoked_err.to_error_response().error
    );
    assert_eq!(token_error(revoked_err).category(), ErrorCategory::State);
}

#[test]
fn error_responses_use_stable_codes() {
    let manager = manager();

    let err = manager
        .generate_token_pair("", &ExtraClaims::new())
        .unwrap_err();
    assert_eq!(err.to_error_response().error, "INVALID_SUBJECT");

    let pair = manager.generate_token_pair("u1", &ExtraClaims::new()).unwrap();
    let err = manager.refresh_access_token(&pair.access_token).unwrap_err();
    assert_eq!(err.to_error_response().error, "NOT_A_REFRESH_TOKEN");

    let err = manager.validate_access_token("not-a-jwt").unwrap_err();
    assert_eq!(err.to_error_response().error, "TOKEN_INVALID");
}

#[test]
fn manager_is_shareable_across_threads() {
    let manager = Arc::new(AuthManager::from_jwt_config(&JwtConfig::new("shared-secret")).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let subject = format!("user-{}", i);
                let pair = manager
                    .generate_token_pair(&subject, &ExtraClaims::new())
                    .unwrap();
                let pair = manager.refresh_access_token(&pair.refresh_token).unwrap();
                let claims = manager.validate_access_token(&pair.access_token).unwrap();
                assert_eq!(claims.subject(), subject);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.active_refresh_tokens(), 4);
}
