//! Mail Service Interface
//!
//! Defines the trait for mail service implementations that deliver
//! verification codes and other transactional email.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending transactional email
///
/// Implementations include:
/// - Transactional mail HTTP API
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient's email address
    /// * `subject` - Subject line
    /// * `body` - Plain-text message body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier of the accepted message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code by email
    ///
    /// Formats the code with the application's standard wording and
    /// delegates to [`send_mail`](Self::send_mail).
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let subject = verification_subject();
        let body = verification_body(code, expires_in_minutes);
        self.send_mail(to, &subject, &body).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

pub(crate) fn verification_subject() -> String {
    "Your LocalHunt verification code".to_string()
}

pub(crate) fn verification_body(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your LocalHunt verification code is: {}\n\n\
         This code will expire in {} minutes. If you did not request it, you can ignore this email.",
        code, expires_in_minutes
    )
}
