//! Value objects representing immutable domain concepts.

pub mod verify_outcome;

// Re-export commonly used types
pub use verify_outcome::VerifyOutcome;
