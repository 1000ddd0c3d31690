//! # LocalHunt Core
//!
//! Core business logic for the LocalHunt email verification flow.
//! This crate contains the verification entry entity, the verification
//! outcome value object, the in-memory code store, the verification
//! service and its expiry sweeper, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
