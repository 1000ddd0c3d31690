//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Verification outcomes are not errors; this type only covers failures of
/// the issuing path (bad input, resend cooldown, mail dispatch).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Auth(err) => err.code(),
            DomainError::Validation(err) => err.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
