//! Mock Mail Service Implementation
//!
//! A mock implementation of the mail service for development and testing.
//! Messages are logged instead of sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use lh_shared::email::{is_valid_email, mask_email};

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Mock mail service for development and testing
///
/// This implementation:
/// - Logs messages instead of delivering them
/// - Rejects malformed addresses
/// - Generates mock message IDs
/// - Remembers the last verification code per recipient
///
/// Clones share their counters, so a test can keep one clone while the
/// application owns another.
#[derive(Clone)]
pub struct MockMailService {
    /// Number of messages accepted
    message_count: Arc<AtomicU64>,
    /// Last verification code sent to each recipient
    last_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
    /// Whether to log the full message body, code included
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Last verification code sent to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.codes().get(email).cloned()
    }

    fn codes(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.last_codes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid email address: {}",
                mask_email(to)
            )));
        }

        let masked = mask_email(to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(recipient = %masked, "Mock mail service simulating failure");
            return Err(InfrastructureError::Mail(
                "Simulated mail sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            info!(
                target: "mail_service",
                message_number = count,
                to = %to,
                subject = %subject,
                body = %body,
                "Mock mail message"
            );
        }

        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %masked,
            message_id = %message_id,
            message_length = body.len(),
            "Mail sent successfully (mock)"
        );

        Ok(message_id)
    }

    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let subject = super::mail_service::verification_subject();
        let body = super::mail_service::verification_body(code, expires_in_minutes);
        let message_id = self.send_mail(to, &subject, &body).await?;
        self.codes().insert(to.to_string(), code.to_string());
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
