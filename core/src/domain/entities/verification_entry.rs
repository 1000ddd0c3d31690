//! Verification entry entity for email-based one-time codes.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued (leading digit is never zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A live one-time code held for a single recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// Recipient identity (normalized email address), the store key
    pub recipient: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Creates an entry with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `recipient` - The identity the code is scoped to
    /// * `issued_at` - Issuance time, usually the store clock's `now`
    /// * `ttl` - How long the code stays valid
    pub fn new(recipient: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(recipient, Self::generate_code(), issued_at, ttl)
    }

    /// Creates an entry holding a caller-supplied code
    pub fn with_code(
        recipient: String,
        code: String,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            recipient,
            code,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Generates a 6-digit code uniformly over `CODE_MIN..=CODE_MAX`
    ///
    /// Uses the OS CSPRNG. The leading digit is never zero, so the code is
    /// always exactly `CODE_LENGTH` characters without padding.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Whether the entry is past its expiry at `now`
    ///
    /// The boundary instant itself still counts as valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a candidate against the stored code
    ///
    /// Both sides are trimmed and compared as strings in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        let stored = self.code.trim();
        let candidate = candidate.trim();
        stored.len() == candidate.len() && constant_time_eq(stored.as_bytes(), candidate.as_bytes())
    }

    /// Time remaining until expiration, or zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn entry(code: &str) -> VerificationEntry {
        VerificationEntry::with_code(
            "shopper@example.com".to_string(),
            code.to_string(),
            Utc::now(),
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
        )
    }

    #[test]
    fn test_new_entry() {
        let issued_at = Utc::now();
        let entry = VerificationEntry::new(
            "shopper@example.com".to_string(),
            issued_at,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
        );

        assert_eq!(entry.recipient, "shopper@example.com");
        assert_eq!(entry.code.len(), CODE_LENGTH);
        assert_eq!(entry.issued_at, issued_at);
        assert_eq!(entry.expires_at, issued_at + Duration::minutes(10));
    }

    #[test]
    fn test_oversized_ttl_saturates_expiry() {
        let entry = VerificationEntry::new("a@b.com".to_string(), Utc::now(), Duration::MAX);
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..1_000 {
            let code = VerificationEntry::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));

            let num: u32 = code.parse().expect("Generated code should be a valid number");
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: HashSet<String> = (0..100).map(|_| VerificationEntry::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = entry("482913");

        assert!(!entry.is_expired_at(entry.issued_at));
        assert!(!entry.is_expired_at(entry.expires_at));
        assert!(entry.is_expired_at(entry.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_matches_trims_and_compares_strings() {
        let entry = entry("482913");

        assert!(entry.matches("482913"));
        assert!(entry.matches(" 482913 "));
        assert!(!entry.matches("482914"));
        assert!(!entry.matches("48291"));
        assert!(!entry.matches("4829130"));
    }

    #[test]
    fn test_time_until_expiration() {
        let entry = entry("482913");

        assert_eq!(entry.time_until_expiration(entry.issued_at), Duration::minutes(10));
        assert_eq!(
            entry.time_until_expiration(entry.expires_at + Duration::seconds(5)),
            Duration::zero()
        );
    }

    #[test]
    fn test_serialization() {
        let entry = entry("482913");
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: VerificationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
