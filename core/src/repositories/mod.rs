//! In-memory stores backing the token manager and the JWT codec.

pub mod denylist;
pub mod token;

pub use denylist::Denylist;
pub use token::{RefreshTokenRegistry, RegisteredToken};

use sha2::{Digest, Sha256};

/// Hashes a token string for use as a storage key
///
/// Stores never hold raw bearer strings; lookups hash the presented string
/// the same way, so keying by digest behaves exactly like keying by the string.
pub(crate) fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
