//! Refresh-token registry: the authoritative record of usable refresh tokens.

mod registry;

pub use registry::{RefreshTokenRegistry, RegisteredToken};
