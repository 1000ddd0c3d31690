//! Configuration for the verification service

use lh_shared::VerificationConfig;

use crate::domain::entities::verification_entry::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code resend requests (0 = replace on every request)
    pub resend_cooldown_seconds: i64,
    /// Sweep expired codes before issuing a new one
    pub sweep_on_issue: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 0,
            sweep_on_issue: true,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_ttl_minutes,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            sweep_on_issue: config.sweep_on_issue,
        }
    }
}
