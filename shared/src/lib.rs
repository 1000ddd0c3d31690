//! Shared utilities and common types for the LocalHunt server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error and response structures
//! - Utility functions (email normalisation and validation)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, MailConfig, MailProvider,
    ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::HealthResponse;
pub use utils::email;
