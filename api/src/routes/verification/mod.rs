//! Email verification route handlers
//!
//! - Sending a one-time code to an email address
//! - Verifying a submitted code

pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use lh_core::services::verification::{Clock, MailServiceTrait, SystemClock, VerificationService};

/// Application state that holds shared services
pub struct AppState<M, K = SystemClock>
where
    M: MailServiceTrait,
    K: Clock,
{
    pub verification_service: Arc<VerificationService<M, K>>,
}

impl<M, K> AppState<M, K>
where
    M: MailServiceTrait,
    K: Clock,
{
    pub fn new(verification_service: Arc<VerificationService<M, K>>) -> Self {
        Self {
            verification_service,
        }
    }
}
