//! Result of a verification attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of checking a candidate code against the store
///
/// These are ordinary results, not errors: every expected condition a
/// verification attempt can run into is one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyOutcome {
    /// Code matched a live entry; the entry has been consumed
    Verified,
    /// Candidate was not exactly six characters
    InvalidFormat,
    /// No live entry for the recipient
    NotFound,
    /// Entry existed but was past expiry; it has been removed
    Expired,
    /// Entry is live but the candidate did not match; the entry is kept
    Mismatch,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Whether the caller may retry with the same recipient without reissuing
    pub fn is_retryable(&self) -> bool {
        matches!(self, VerifyOutcome::InvalidFormat | VerifyOutcome::Mismatch)
    }

    /// Stable machine-readable code
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "VERIFIED",
            VerifyOutcome::InvalidFormat => "INVALID_FORMAT",
            VerifyOutcome::NotFound => "NOT_FOUND",
            VerifyOutcome::Expired => "EXPIRED",
            VerifyOutcome::Mismatch => "MISMATCH",
        }
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_verified_is_success() {
        assert!(VerifyOutcome::Verified.is_verified());
        for outcome in [
            VerifyOutcome::InvalidFormat,
            VerifyOutcome::NotFound,
            VerifyOutcome::Expired,
            VerifyOutcome::Mismatch,
        ] {
            assert!(!outcome.is_verified());
        }
    }

    #[test]
    fn test_retryable() {
        assert!(VerifyOutcome::Mismatch.is_retryable());
        assert!(VerifyOutcome::InvalidFormat.is_retryable());
        assert!(!VerifyOutcome::Expired.is_retryable());
        assert!(!VerifyOutcome::NotFound.is_retryable());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&VerifyOutcome::InvalidFormat).unwrap();
        assert_eq!(json, "\"INVALID_FORMAT\"");
        assert_eq!(VerifyOutcome::Expired.to_string(), "EXPIRED");
    }
}
