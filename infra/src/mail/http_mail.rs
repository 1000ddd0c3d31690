//! HTTP Mail Service Implementation
//!
//! Delivers mail through a transactional mail HTTP API. The API is expected
//! to accept a JSON body `{from, to, subject, text}` with bearer
//! authentication and answer with a JSON object carrying the message `id`.
//!
//! ## Features
//!
//! - Automatic retry with exponential backoff on 429, 5xx and transport errors
//! - No retry on other client errors
//! - Security: recipient masking in logs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use lh_shared::email::mask_email;
use lh_shared::MailConfig;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Upper bound on the wait between two delivery attempts
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Double the backoff, capped at [`MAX_RETRY_DELAY`]
pub(crate) fn next_retry_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY)
}

/// HTTP mail service configuration
#[derive(Debug, Clone)]
pub struct HttpMailConfig {
    /// Endpoint that accepts outgoing messages
    pub api_url: String,
    /// Bearer token for the API
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TryFrom<&MailConfig> for HttpMailConfig {
    type Error = InfrastructureError;

    fn try_from(config: &MailConfig) -> Result<Self, Self::Error> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_URL not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_KEY not set".to_string()))?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(InfrastructureError::Config(
                "MAIL_API_URL must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            api_key,
            from_address: config.from_address.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AcceptedMail {
    #[serde(default)]
    id: Option<String>,
}

/// HTTP mail service implementation
pub struct HttpMailService {
    client: reqwest::Client,
    config: HttpMailConfig,
}

impl HttpMailService {
    /// Create a new HTTP mail service
    pub fn new(config: HttpMailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            api_url = %config.api_url,
            from = %config.from_address,
            "HTTP mail service initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpMailConfig {
        &self.config
    }

    /// Send one message with retry logic
    async fn send_with_retry(&self, mail: &OutgoingMail<'_>) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms).min(MAX_RETRY_DELAY);
        let masked = mask_email(mail.to);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts, self.config.max_retries, masked
            );

            let response = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.config.api_key)
                .json(mail)
                .send()
                .await;

            let retryable_error = match response {
                Ok(response) if response.status().is_success() => {
                    // A body without an id still means the message was accepted
                    let message_id = response
                        .json::<AcceptedMail>()
                        .await
                        .ok()
                        .and_then(|accepted| accepted.id)
                        .unwrap_or_else(|| format!("http_{}", Uuid::new_v4()));

                    info!(
                        recipient = %masked,
                        message_id = %message_id,
                        "Mail accepted by provider"
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    if status.as_u16() != 429 && !status.is_server_error() {
                        error!(recipient = %masked, %status, "Mail provider rejected message");
                        return Err(InfrastructureError::Mail(format!(
                            "Mail provider rejected message with status {}",
                            status
                        )));
                    }
                    format!("status {}", status)
                }
                Err(e) => e.to_string(),
            };

            if attempts >= self.config.max_retries {
                error!(
                    recipient = %masked,
                    attempts,
                    error = %retryable_error,
                    "Giving up on mail delivery"
                );
                return Err(InfrastructureError::Mail(format!(
                    "Failed to send mail after {} attempts: {}",
                    attempts, retryable_error
                )));
            }

            warn!(
                "Mail delivery failed ({}), retrying after {:?}",
                retryable_error, delay
            );
            tokio::time::sleep(delay).await;
            delay = next_retry_delay(delay);
        }
    }
}

#[async_trait]
impl MailService for HttpMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let mail = OutgoingMail {
            from: &self.config.from_address,
            to,
            subject,
            text: body,
        };
        self.send_with_retry(&mail).await
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
