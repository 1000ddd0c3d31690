//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the LocalHunt
//! verification flow. It provides the concrete mail dispatchers that
//! deliver one-time codes issued by the core store.
//!
//! ## Architecture
//!
//! - **Mail**: a mock dispatcher for development and an HTTP dispatcher for
//!   a transactional mail API, both bridged into the core
//!   `MailServiceTrait` by an adapter

// Re-export core types for convenience
pub use lh_core::errors::*;

/// Mail service module - verification code delivery
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),
}
