//! Traits for mail service integration

use async_trait::async_trait;

/// Trait for mail dispatch integration
///
/// The dispatcher only delivers a code it is handed; issuing and storing
/// codes stays with the store.
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a verification code by email, returning the provider message id
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;

    /// Check if the email address has a deliverable shape
    fn is_valid_email(&self, email: &str) -> bool {
        lh_shared::email::is_valid_email(email)
    }

    /// Whether the dispatcher can currently accept messages
    async fn is_available(&self) -> bool {
        true
    }
}
