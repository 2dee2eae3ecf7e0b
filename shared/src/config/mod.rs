//! Configuration module
//!
//! - `auth` - Token signing secret and token lifetimes
//! - `environment` - Environment detection, `.env` loading and logging configuration

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete configuration for a process hosting the token manager
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            jwt: JwtConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// The environment-specific `.env` file (e.g. `.env.production`) is loaded
    /// first when present; variables already set in the process win.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        env.load_env_file();

        Self {
            environment: env,
            jwt: JwtConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.level, "debug");
        assert!(config.jwt.is_using_default_secret());
    }

    #[test]
    fn test_app_config_deserialize_with_default_logging() {
        let json = r#"{
            "environment": "production",
            "jwt": {
                "secret": "prod-secret",
                "access_token_expiry": 600,
                "refresh_token_expiry": 86400
            }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.jwt.access_token_expiry, 600);
        assert!(!config.jwt.logging_enabled);
        assert_eq!(config.logging.level, "info");
    }
}
