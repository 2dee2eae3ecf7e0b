//! Services containing the token lifecycle logic.

pub mod codec;
pub mod token;

// Re-export commonly used types
pub use codec::{JwtCodec, TokenCodec};
pub use token::{
    AuthManager, AuthManagerConfig, CleanupResult, DenylistCleanupConfig, DenylistCleanupService,
    MAX_TOKEN_TTL_DAYS,
};
