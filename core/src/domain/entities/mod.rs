//! Domain entities representing core business objects.

pub mod verification_entry;

// Re-export commonly used types
pub use verification_entry::{
    VerificationEntry, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
};
