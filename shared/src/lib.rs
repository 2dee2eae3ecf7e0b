//! Shared configuration and common types for the token lifecycle workspace
//!
//! This crate provides functionality used by the core crate and any host
//! service embedding it:
//! - Configuration types (JWT settings, environment, logging)
//! - Tracing subscriber bootstrap
//! - Error response structures and stable error codes

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use logging::init_tracing;
