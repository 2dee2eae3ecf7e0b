//! Domain-specific error types and error handling.

mod types;

pub use types::{ErrorCategory, TokenError};

use thiserror::Error;
use tl_shared::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The wrapped token error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let code = match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Token(err) => err.code(),
        };
        ErrorResponse::new(code, self.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
