//! Types for verification store and service results

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A code handed out by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// The 6-digit code to deliver to the recipient
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Reissue refused because the recipient's current code is too recent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a code was issued recently; retry in {retry_after_seconds} seconds")]
pub struct CooldownActive {
    /// Whole seconds until a new code may be issued
    pub retry_after_seconds: i64,
}

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Normalized recipient the code was issued for
    pub recipient: String,
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,
    /// The message ID from the mail provider
    pub message_id: String,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}
