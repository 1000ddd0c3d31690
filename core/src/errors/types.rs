//! Error types for the verification issuing path

use lh_shared::error_codes;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Mail service failure")]
    MailServiceFailure,

    #[error("Rate limit exceeded: retry in {seconds} seconds")]
    RateLimitExceeded { seconds: i64 },
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MailServiceFailure => error_codes::MAIL_SERVICE_FAILURE,
            AuthError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => error_codes::VALIDATION_ERROR,
            ValidationError::InvalidEmail => error_codes::INVALID_EMAIL,
        }
    }
}
