//! In-memory store of one-time verification codes

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::verification_entry::{
    VerificationEntry, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
use crate::domain::value_objects::VerifyOutcome;

use super::clock::{Clock, SystemClock};
use super::types::{CooldownActive, IssuedCode};

/// Holds at most one live code per recipient
///
/// Every operation takes the single map lock for its whole read-then-write,
/// so operations on the same recipient are atomic with respect to each
/// other. Operations on different recipients serialize on the same lock;
/// that is the throughput ceiling of this store. It is in-process only: a
/// deployment with several server processes must route a recipient's send
/// and verify requests to the same process.
pub struct VerificationCodeStore<K: Clock = SystemClock> {
    entries: Mutex<HashMap<String, VerificationEntry>>,
    clock: K,
    ttl: Duration,
}

impl VerificationCodeStore<SystemClock> {
    /// Create a store on the system clock with the given code lifetime
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(SystemClock, ttl)
    }
}

impl Default for VerificationCodeStore<SystemClock> {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_EXPIRATION_MINUTES))
    }
}

impl<K: Clock> VerificationCodeStore<K> {
    /// Create a store driven by an explicit clock
    pub fn with_clock(clock: K, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Issue a fresh code for `recipient`, replacing any code it already holds
    ///
    /// Recipient format is not checked here; callers validate and
    /// normalize the identity before issuing.
    pub fn issue(&self, recipient: &str) -> IssuedCode {
        let now = self.clock.now();
        let mut entries = self.lock();
        self.insert_new(&mut entries, recipient, now)
    }

    /// Issue a fresh code unless the recipient's live code is younger than `cooldown`
    ///
    /// The check and the insert happen under one lock acquisition. A zero
    /// or negative cooldown behaves exactly like [`issue`](Self::issue).
    pub fn try_issue(&self, recipient: &str, cooldown: Duration) -> Result<IssuedCode, CooldownActive> {
        let now = self.clock.now();
        let mut entries = self.lock();

        if cooldown > Duration::zero() {
            if let Some(existing) = entries.get(recipient) {
                let ready_at = existing
                    .issued_at
                    .checked_add_signed(cooldown)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                if !existing.is_expired_at(now) && now < ready_at {
                    let remaining_ms = (ready_at - now).num_milliseconds();
                    return Err(CooldownActive {
                        retry_after_seconds: ((remaining_ms + 999) / 1000).max(1),
                    });
                }
            }
        }

        Ok(self.insert_new(&mut entries, recipient, now))
    }

    /// Check `candidate` against the code held for `recipient`
    ///
    /// Checks run in order and the first failure wins: length, presence,
    /// expiry, equality. `Expired` and `Verified` consume the entry;
    /// `Mismatch` leaves it in place for a retry.
    pub fn verify(&self, recipient: &str, candidate: &str) -> VerifyOutcome {
        if candidate.chars().count() != CODE_LENGTH {
            return VerifyOutcome::InvalidFormat;
        }

        let now = self.clock.now();
        let mut entries = self.lock();

        let outcome = match entries.get(recipient) {
            None => VerifyOutcome::NotFound,
            Some(entry) if entry.is_expired_at(now) => VerifyOutcome::Expired,
            Some(entry) if entry.matches(candidate) => VerifyOutcome::Verified,
            Some(_) => VerifyOutcome::Mismatch,
        };

        if matches!(outcome, VerifyOutcome::Verified | VerifyOutcome::Expired) {
            entries.remove(recipient);
        }

        outcome
    }

    /// Remove every entry past its expiry, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Remove the recipient's entry only if it still holds `code`
    ///
    /// Used to roll back an issuance whose delivery failed without
    /// discarding a newer code issued in the meantime.
    pub fn revoke(&self, recipient: &str, code: &str) -> bool {
        let mut entries = self.lock();
        match entries.get(recipient) {
            Some(entry) if entry.code == code => {
                entries.remove(recipient);
                true
            }
            _ => false,
        }
    }

    /// Number of entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether an entry is held for the recipient, expired or not
    pub fn contains(&self, recipient: &str) -> bool {
        self.lock().contains_key(recipient)
    }

    /// Expiry of the recipient's current entry
    pub fn expires_at(&self, recipient: &str) -> Option<DateTime<Utc>> {
        self.lock().get(recipient).map(|entry| entry.expires_at)
    }

    /// Lifetime given to newly issued codes
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn insert_new(
        &self,
        entries: &mut HashMap<String, VerificationEntry>,
        recipient: &str,
        now: DateTime<Utc>,
    ) -> IssuedCode {
        let entry = VerificationEntry::new(recipient.to_string(), now, self.ttl);
        let issued = IssuedCode {
            code: entry.code.clone(),
            expires_at: entry.expires_at,
        };
        entries.insert(recipient.to_string(), entry);
        issued
    }

    // Entries are independent of each other, so a panic in another holder
    // cannot leave the map in a state worth refusing to read.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, VerificationEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
