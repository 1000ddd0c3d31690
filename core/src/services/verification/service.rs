//! Main verification service implementation

use chrono::Duration;
use lh_shared::email::{mask_email, normalize_email};
use std::sync::Arc;

use crate::domain::entities::verification_entry::DEFAULT_EXPIRATION_MINUTES;
use crate::domain::value_objects::VerifyOutcome;
use crate::errors::{AuthError, DomainResult, ValidationError};

use super::clock::{Clock, SystemClock};
use super::config::VerificationServiceConfig;
use super::store::VerificationCodeStore;
use super::traits::MailServiceTrait;
use super::types::SendCodeResult;

/// Verification service for email one-time codes
///
/// Owns no code state itself: codes live in the shared
/// [`VerificationCodeStore`], and the mail service only delivers them.
pub struct VerificationService<M: MailServiceTrait, K: Clock = SystemClock> {
    /// Mail service for delivering codes
    mail_service: Arc<M>,
    /// Store holding the live codes
    store: Arc<VerificationCodeStore<K>>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<M: MailServiceTrait> VerificationService<M, SystemClock> {
    /// Create a service with its own store on the system clock
    ///
    /// # Arguments
    ///
    /// * `mail_service` - Mail service implementation
    /// * `config` - Service configuration
    pub fn new(mail_service: Arc<M>, config: VerificationServiceConfig) -> Self {
        let ttl = Duration::try_minutes(config.code_expiration_minutes)
            .unwrap_or_else(|| Duration::minutes(DEFAULT_EXPIRATION_MINUTES));
        let store = Arc::new(VerificationCodeStore::new(ttl));
        Self::with_store(mail_service, store, config)
    }
}

impl<M: MailServiceTrait, K: Clock> VerificationService<M, K> {
    /// Create a service over an existing store
    ///
    /// The store's TTL wins over `config.code_expiration_minutes`.
    pub fn with_store(
        mail_service: Arc<M>,
        store: Arc<VerificationCodeStore<K>>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            mail_service,
            store,
            config,
        }
    }

    /// Issue a code for `email` and mail it
    ///
    /// This method:
    /// 1. Normalizes and validates the address
    /// 2. Sweeps expired codes when configured to
    /// 3. Issues a code, replacing any previous one unless the resend cooldown is active
    /// 4. Hands the code to the mail service
    ///
    /// If delivery fails the just-issued code is revoked, so a code the
    /// recipient never received cannot be verified.
    pub async fn send_verification_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let recipient = normalize_email(email);

        if recipient.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }

        if !self.mail_service.is_valid_email(&recipient) {
            tracing::debug!(
                recipient = %mask_email(&recipient),
                "Rejected malformed email address"
            );
            return Err(ValidationError::InvalidEmail.into());
        }

        if self.config.sweep_on_issue {
            let removed = self.store.sweep_expired();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired verification codes before issuing");
            }
        }

        // A live code never outlasts the TTL, so a longer cooldown is the TTL
        let ttl = self.store.ttl();
        let cooldown = Duration::try_seconds(self.config.resend_cooldown_seconds)
            .unwrap_or(ttl)
            .clamp(Duration::zero(), ttl);
        let issued = self.store.try_issue(&recipient, cooldown).map_err(|cooldown| {
            tracing::warn!(
                recipient = %mask_email(&recipient),
                retry_after_seconds = cooldown.retry_after_seconds,
                event = "rate_limit_exceeded",
                "Verification code requested during resend cooldown"
            );
            AuthError::RateLimitExceeded {
                seconds: cooldown.retry_after_seconds,
            }
        })?;

        tracing::info!(
            recipient = %mask_email(&recipient),
            expires_at = %issued.expires_at,
            event = "otp_issued",
            "Issued verification code"
        );

        let expires_in_minutes = ttl.num_minutes();
        let message_id = match self
            .mail_service
            .send_verification_code(&recipient, &issued.code, expires_in_minutes)
            .await
        {
            Ok(message_id) => message_id,
            Err(e) => {
                let revoked = self.store.revoke(&recipient, &issued.code);
                tracing::error!(
                    recipient = %mask_email(&recipient),
                    error = %e,
                    revoked,
                    event = "otp_dispatch_failed",
                    "Failed to deliver verification code"
                );
                return Err(AuthError::MailServiceFailure.into());
            }
        };

        tracing::info!(
            recipient = %mask_email(&recipient),
            message_id = %message_id,
            event = "otp_sent",
            "Verification code delivered to mail service"
        );

        let next_resend_at = self
            .store
            .now()
            .checked_add_signed(cooldown)
            .unwrap_or(issued.expires_at);

        Ok(SendCodeResult {
            recipient,
            expires_at: issued.expires_at,
            message_id,
            next_resend_at,
        })
    }

    /// Check a code submitted for `email`
    ///
    /// The address is normalized the same way as when sending, so
    /// `Shopper@Example.com` verifies a code sent to `shopper@example.com`.
    pub fn verify_code(&self, email: &str, candidate: &str) -> VerifyOutcome {
        let recipient = normalize_email(email);
        let outcome = self.store.verify(&recipient, candidate);

        match outcome {
            VerifyOutcome::Verified => tracing::info!(
                recipient = %mask_email(&recipient),
                event = "otp_verified",
                "Verification code accepted"
            ),
            other => tracing::warn!(
                recipient = %mask_email(&recipient),
                outcome = %other,
                event = "otp_rejected",
                "Verification code rejected"
            ),
        }

        outcome
    }

    /// Remove expired codes now, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep_expired()
    }

    /// The store backing this service
    pub fn store(&self) -> &Arc<VerificationCodeStore<K>> {
        &self.store
    }

    /// Whether the mail dispatcher currently accepts messages
    pub async fn mail_available(&self) -> bool {
        self.mail_service.is_available().await
    }
}
