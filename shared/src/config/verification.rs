//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Longest code lifetime accepted by validation (one day)
pub const MAX_CODE_TTL_MINUTES: i64 = 24 * 60;

/// Lifetime, resend and sweep settings for one-time verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a code stays valid after issuance
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Minimum seconds between two codes for the same recipient (0 = always replace)
    #[serde(default)]
    pub resend_cooldown_seconds: i64,

    /// Run the periodic expiry sweep
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,

    /// Seconds between periodic sweeps
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Sweep expired codes opportunistically whenever a code is issued
    #[serde(default = "default_true")]
    pub sweep_on_issue: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: default_code_ttl_minutes(),
            resend_cooldown_seconds: 0,
            sweep_enabled: true,
            sweep_interval_seconds: default_sweep_interval_seconds(),
            sweep_on_issue: true,
        }
    }
}

impl VerificationConfig {
    /// Load from `VERIFICATION_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unparseable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            code_ttl_minutes: parse_or(&lookup, "VERIFICATION_CODE_TTL_MINUTES", defaults.code_ttl_minutes),
            resend_cooldown_seconds: parse_or(
                &lookup,
                "VERIFICATION_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            sweep_enabled: parse_or(&lookup, "VERIFICATION_SWEEP_ENABLED", defaults.sweep_enabled),
            sweep_interval_seconds: parse_or(
                &lookup,
                "VERIFICATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            sweep_on_issue: parse_or(&lookup, "VERIFICATION_SWEEP_ON_ISSUE", defaults.sweep_on_issue),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn default_code_ttl_minutes() -> i64 {
    10
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_true() -> bool {
    true
}
