//! Token manager module
//!
//! This module handles the token pair lifecycle:
//! - Issuing access + refresh token pairs
//! - Single-use refresh token rotation
//! - Refresh token revocation backed by the codec denylist
//! - Background purge of expired denylist entries

mod cleanup;
mod config;
mod manager;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, DenylistCleanupConfig, DenylistCleanupService};
pub use config::{AuthManagerConfig, MAX_TOKEN_TTL_DAYS};
pub use manager::AuthManager;
