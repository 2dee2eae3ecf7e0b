//! Token lifecycle error types
//!
//! Every failure the manager or a codec can report is a `TokenError` variant.
//! The stable string codes live in `tl_shared::error_codes`.

use thiserror::Error;
use tl_shared::error_codes;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Subject must not be empty")]
    InvalidSubject,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token is not a refresh token")]
    NotARefreshToken,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Failed to denylist token")]
    DenylistFailed,
}

/// Broad class of a [`TokenError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected input, detected before any state change or codec call
    Validation,
    /// Reported by the token codec
    Codec,
    /// Wrong kind of token for the operation
    Protocol,
    /// Registry state does not allow the operation
    State,
}

impl TokenError {
    /// Which class of failure this is
    pub fn category(&self) -> ErrorCategory {
        match self {
            TokenError::InvalidSubject => ErrorCategory::Validation,
            TokenError::TokenInvalid
            | TokenError::TokenExpired
            | TokenError::TokenRevoked
            | TokenError::TokenGenerationFailed
            | TokenError::DenylistFailed => ErrorCategory::Codec,
            TokenError::NotARefreshToken => ErrorCategory::Protocol,
            TokenError::RefreshTokenNotFound => ErrorCategory::State,
        }
    }

    /// Stable error code for callers
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidSubject => error_codes::INVALID_SUBJECT,
            TokenError::TokenInvalid => error_codes::TOKEN_INVALID,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::TokenRevoked => error_codes::TOKEN_REVOKED,
            TokenError::NotARefreshToken => error_codes::NOT_A_REFRESH_TOKEN,
            TokenError::RefreshTokenNotFound => error_codes::REFRESH_TOKEN_NOT_FOUND,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
            TokenError::DenylistFailed => error_codes::DENYLIST_FAILED,
        }
    }
}
