//! Domain entities representing issued tokens and their payloads.

pub mod token;

// Re-export commonly used types
pub use token::{
    without_refresh_marker, Claims, ExtraClaims, TokenPair, REFRESH_TOKEN_TYPE, TOKEN_TYPE_CLAIM,
};
