//! # Token Lifecycle Core
//!
//! Issues paired access and refresh tokens for a subject, tracks which
//! refresh tokens are still usable, rotates them on use and revokes them on
//! request.
//!
//! ```no_run
//! use chrono::Duration;
//! use tl_core::{AuthManager, AuthManagerConfig, ExtraClaims};
//!
//! # fn main() -> Result<(), tl_core::DomainError> {
//! let manager = AuthManager::new(AuthManagerConfig::new(
//!     "s1",
//!     Duration::hours(1),
//!     Duration::hours(24),
//! ))?;
//!
//! let pair = manager.generate_token_pair("u1", &ExtraClaims::new())?;
//! let claims = manager.validate_access_token(&pair.access_token)?;
//! assert_eq!(claims.subject(), "u1");
//!
//! let rotated = manager.refresh_access_token(&pair.refresh_token)?;
//! manager.revoke_refresh_token(&rotated.refresh_token)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, ExtraClaims, TokenPair, REFRESH_TOKEN_TYPE, TOKEN_TYPE_CLAIM};
pub use errors::{DomainError, DomainResult, ErrorCategory, TokenError};
pub use repositories::{Denylist, RefreshTokenRegistry};
pub use services::{
    AuthManager, AuthManagerConfig, CleanupResult, DenylistCleanupConfig, DenylistCleanupService,
    JwtCodec, TokenCodec, MAX_TOKEN_TTL_DAYS,
};
