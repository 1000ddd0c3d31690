//! Mail Service Trait Adapter
//!
//! Bridges any infrastructure [`MailService`] into the core
//! `MailServiceTrait` consumed by the verification service.

use async_trait::async_trait;
use lh_core::services::verification::MailServiceTrait;

use super::mail_service::MailService;

/// Adapter that implements the core `MailServiceTrait` for a mail service
pub struct MailServiceAdapter<T: MailService + ?Sized> {
    inner: Box<T>,
}

impl<T: MailService + ?Sized> MailServiceAdapter<T> {
    pub fn new(inner: Box<T>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl<T: MailService + ?Sized> MailServiceTrait for MailServiceAdapter<T> {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(email, code, expires_in_minutes)
            .await
            .map_err(|e| e.to_string())
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}
