//! Mail Service Module
//!
//! This module provides mail service implementations for delivering
//! verification codes.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Logged output for development
//! - **HTTP Support**: Production delivery via a transactional mail API
//! - **Security**: Recipient masking in logs

pub mod http_mail;
pub mod mail_service;
pub mod mail_trait_adapter;
pub mod mock_mail;

// Re-export commonly used types
pub use http_mail::{HttpMailConfig, HttpMailService};
pub use lh_shared::email::mask_email;
pub use mail_service::MailService;
pub use mail_trait_adapter::MailServiceAdapter;
pub use mock_mail::MockMailService;

use lh_shared::{MailConfig, MailProvider};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create a mail service based on configuration
///
/// A misconfigured HTTP provider is an error; there is no fallback to the mock.
pub fn create_mail_service(config: &MailConfig) -> Result<Box<dyn MailService>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock => {
            tracing::warn!("Using mock mail service; verification codes are only logged");
            Ok(Box::new(MockMailService::new()))
        }
        MailProvider::Http => {
            let http_config = HttpMailConfig::try_from(config)?;
            Ok(Box::new(HttpMailService::new(http_config)?))
        }
    }
}
