//! Verification module for email one-time codes
//!
//! This module provides the complete verification code workflow:
//! - An in-memory store that issues, verifies and expires codes
//! - The service that issues a code and hands it to the mail dispatcher
//! - A background sweeper that reclaims abandoned codes
//! - A clock abstraction so expiry can be tested without sleeping

mod cleanup;
mod clock;
mod config;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{SweepResult, SweeperConfig, VerificationSweeper};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use store::VerificationCodeStore;
pub use traits::MailServiceTrait;
pub use types::{CooldownActive, IssuedCode, SendCodeResult};
