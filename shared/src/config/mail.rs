//! Mail dispatch configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Which mail backend delivers verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log messages instead of sending them
    Mock,
    /// Transactional mail HTTP API
    Http,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(MailProvider::Mock),
            "http" | "api" => Ok(MailProvider::Http),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// Mail service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider
    pub provider: MailProvider,
    /// Base URL of the mail HTTP API
    #[serde(default)]
    pub api_url: Option<String>,
    /// API key sent as a bearer token
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Sender address
    pub from_address: String,
    /// Maximum retry attempts for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            api_url: None,
            api_key: None,
            from_address: String::from("no-reply@localhunt.local"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MailConfig {
    /// Load from `MAIL_PROVIDER`, `MAIL_API_URL`, `MAIL_API_KEY` and `MAIL_FROM`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    ///
    /// An unset provider means mock; an unrecognised one is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match non_empty("MAIL_PROVIDER") {
            Some(value) => value.parse::<MailProvider>().map_err(|reason| ConfigError::InvalidValue {
                field: "MAIL_PROVIDER",
                reason,
            })?,
            None => defaults.provider,
        };

        Ok(Self {
            provider,
            api_url: non_empty("MAIL_API_URL"),
            api_key: non_empty("MAIL_API_KEY"),
            from_address: non_empty("MAIL_FROM").unwrap_or(defaults.from_address),
            max_retries: non_empty("MAIL_MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            ..defaults
        })
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}
