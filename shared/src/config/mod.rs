//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Mail dispatch provider settings
//! - `server` - HTTP server configuration
//! - `verification` - Verification code lifetime, resend and sweep settings

pub mod environment;
pub mod mail;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::ServerConfig;
pub use verification::{VerificationConfig, MAX_CODE_TTL_MINUTES};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Mail dispatch configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            verification: VerificationConfig::from_env(),
            mail: MailConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }

    /// Check settings that would make the service misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification.code_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "VERIFICATION_CODE_TTL_MINUTES",
                reason: "must be positive".to_string(),
            });
        }
        if self.verification.code_ttl_minutes > MAX_CODE_TTL_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "VERIFICATION_CODE_TTL_MINUTES",
                reason: format!("must be at most {}", MAX_CODE_TTL_MINUTES),
            });
        }
        if self.verification.resend_cooldown_seconds < 0 {
            return Err(ConfigError::InvalidValue {
                field: "VERIFICATION_RESEND_COOLDOWN_SECONDS",
                reason: "must not be negative".to_string(),
            });
        }
        if self.verification.resend_cooldown_seconds > self.verification.code_ttl_minutes * 60 {
            return Err(ConfigError::InvalidValue {
                field: "VERIFICATION_RESEND_COOLDOWN_SECONDS",
                reason: "must not exceed the code lifetime".to_string(),
            });
        }
        if self.verification.sweep_enabled && self.verification.sweep_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "VERIFICATION_SWEEP_INTERVAL_SECONDS",
                reason: "must be positive when the sweep is enabled".to_string(),
            });
        }
        if self.mail.provider == MailProvider::Http {
            if self.mail.api_url.is_none() {
                return Err(ConfigError::Missing("MAIL_API_URL"));
            }
            if self.mail.api_key.is_none() {
                return Err(ConfigError::Missing("MAIL_API_KEY"));
            }
        }
        if self.environment.is_production() && self.mail.provider == MailProvider::Mock {
            return Err(ConfigError::InvalidValue {
                field: "MAIL_PROVIDER",
                reason: "mock provider is not allowed in production".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.verification.code_ttl_minutes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "VERIFICATION_CODE_TTL_MINUTES", .. })
        ));
    }

    #[test]
    fn test_ttl_upper_bound() {
        let mut config = AppConfig::default();
        config.verification.code_ttl_minutes = MAX_CODE_TTL_MINUTES;
        assert!(config.validate().is_ok());

        config.verification.code_ttl_minutes = 150_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "VERIFICATION_CODE_TTL_MINUTES", .. })
        ));
    }

    #[test]
    fn test_cooldown_bounded_by_ttl() {
        let mut config = AppConfig::default();
        config.verification.resend_cooldown_seconds = 600;
        assert!(config.validate().is_ok());

        for cooldown in [601, i64::MAX, -1] {
            config.verification.resend_cooldown_seconds = cooldown;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { field: "VERIFICATION_RESEND_COOLDOWN_SECONDS", .. })
            ));
        }
    }

    #[test]
    fn test_http_mail_requires_credentials() {
        let mut config = AppConfig::default();
        config.mail.provider = MailProvider::Http;
        assert_eq!(config.validate(), Err(ConfigError::Missing("MAIL_API_URL")));

        config.mail.api_url = Some("https://mail.example.com".to_string());
        assert_eq!(config.validate(), Err(ConfigError::Missing("MAIL_API_KEY")));

        config.mail.api_key = Some("key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_mail_rejected_in_production() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert!(config.validate().is_err());
    }
}
