//! Unit tests for the verification code store

use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::verification_entry::{CODE_LENGTH, CODE_MAX, CODE_MIN};
use crate::domain::value_objects::VerifyOutcome;
use crate::services::verification::{Clock, ManualClock, VerificationCodeStore};

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

fn store_at_manual_clock() -> (VerificationCodeStore<ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc::now());
    let store = VerificationCodeStore::with_clock(clock.clone(), Duration::minutes(10));
    (store, clock)
}

// A six-character candidate guaranteed to differ from `code`
fn wrong_code(code: &str) -> String {
    if code == "111111" {
        "222222".to_string()
    } else {
        "111111".to_string()
    }
}

#[test]
fn test_issued_code_is_six_digits_in_range() {
    let (store, _) = store_at_manual_clock();

    for i in 0..200 {
        let issued = store.issue(&format!("user{}@example.com", i));
        assert_eq!(issued.code.len(), CODE_LENGTH);
        let value: u32 = issued.code.parse().unwrap();
        assert!((CODE_MIN..=CODE_MAX).contains(&value));
    }
}

#[test]
fn test_issue_sets_expiry_from_ttl() {
    let (store, clock) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    assert_eq!(issued.expires_at, clock.now() + Duration::minutes(10));
    assert_eq!(store.expires_at(ALICE), Some(issued.expires_at));
    assert_eq!(store.ttl(), Duration::minutes(10));
}

#[test]
fn test_verify_correct_code_then_replay_is_not_found() {
    let (store, _) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::Verified);
    assert!(!store.contains(ALICE));
    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::NotFound);
}

#[test]
fn test_mismatch_keeps_entry_for_retry() {
    let (store, _) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    assert_eq!(store.verify(ALICE, &wrong_code(&issued.code)), VerifyOutcome::Mismatch);
    assert!(store.contains(ALICE));
    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::Verified);
}

#[test]
fn test_reissue_replaces_previous_code() {
    let (store, _) = store_at_manual_clock();
    let first = store.issue(ALICE);
    let mut second = store.issue(ALICE);
    while second.code == first.code {
        second = store.issue(ALICE);
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.verify(ALICE, &first.code), VerifyOutcome::Mismatch);
    assert_eq!(store.verify(ALICE, &second.code), VerifyOutcome::Verified);
}

#[test]
fn test_expired_entry_is_reported_once_then_not_found() {
    let (store, clock) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    clock.advance(Duration::minutes(11));

    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::Expired);
    assert!(!store.contains(ALICE));
    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::NotFound);
}

#[test]
fn test_expired_wins_over_mismatch() {
    let (store, clock) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    clock.advance(Duration::minutes(11));

    assert_eq!(store.verify(ALICE, &wrong_code(&issued.code)), VerifyOutcome::Expired);
    assert!(store.is_empty());
}

#[test]
fn test_code_valid_at_exact_expiry_instant() {
    let (store, clock) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    clock.set(issued.expires_at);
    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::Verified);
}

#[test]
fn test_invalid_format_checked_before_lookup() {
    let (store, _) = store_at_manual_clock();

    // Unknown recipient still reports the format problem first
    assert_eq!(store.verify(BOB, "12345"), VerifyOutcome::InvalidFormat);
    assert_eq!(store.verify(BOB, "1234567"), VerifyOutcome::InvalidFormat);
    assert_eq!(store.verify(BOB, ""), VerifyOutcome::InvalidFormat);

    let issued = store.issue(ALICE);
    assert_eq!(store.verify(ALICE, "12345"), VerifyOutcome::InvalidFormat);
    assert!(store.contains(ALICE));
    assert_eq!(store.verify(ALICE, &issued.code), VerifyOutcome::Verified);
}

#[test]
fn test_format_check_counts_characters_not_digits() {
    let (store, _) = store_at_manual_clock();
    store.issue(ALICE);

    // Six characters that are not digits pass the length check and mismatch
    assert_eq!(store.verify(ALICE, "abcdef"), VerifyOutcome::Mismatch);
    // Padding counts toward the length before trimming
    assert_eq!(store.verify(ALICE, " 12345 "), VerifyOutcome::InvalidFormat);
}

#[test]
fn test_unknown_recipient_is_not_found() {
    let (store, _) = store_at_manual_clock();
    store.issue(ALICE);

    assert_eq!(store.verify(BOB, "123456"), VerifyOutcome::NotFound);
}

#[test]
fn test_recipients_are_isolated() {
    let (store, _) = store_at_manual_clock();
    let alice = store.issue(ALICE);
    let bob = store.issue(BOB);

    assert_eq!(store.verify(ALICE, &alice.code), VerifyOutcome::Verified);
    assert!(store.contains(BOB));
    assert_eq!(store.verify(BOB, &bob.code), VerifyOutcome::Verified);
}

#[test]
fn test_sweep_removes_only_expired_entries() {
    let (store, clock) = store_at_manual_clock();
    store.issue(ALICE);
    clock.advance(Duration::minutes(6));
    let bob = store.issue(BOB);
    clock.advance(Duration::minutes(5));

    assert_eq!(store.sweep_expired(), 1);
    assert!(!store.contains(ALICE));
    assert_eq!(store.len(), 1);
    assert_eq!(store.verify(BOB, &bob.code), VerifyOutcome::Verified);
}

#[test]
fn test_sweep_on_empty_store() {
    let (store, _) = store_at_manual_clock();
    assert_eq!(store.sweep_expired(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_revoke_requires_matching_code() {
    let (store, _) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    assert!(!store.revoke(ALICE, &wrong_code(&issued.code)));
    assert!(store.contains(ALICE));
    assert!(store.revoke(ALICE, &issued.code));
    assert!(!store.contains(ALICE));
    assert!(!store.revoke(ALICE, &issued.code));
}

#[test]
fn test_try_issue_respects_cooldown() {
    let (store, clock) = store_at_manual_clock();
    let cooldown = Duration::seconds(60);

    let first = store.try_issue(ALICE, cooldown).unwrap();

    clock.advance(Duration::milliseconds(20_500));
    let refused = store.try_issue(ALICE, cooldown).unwrap_err();
    assert_eq!(refused.retry_after_seconds, 40);
    assert_eq!(store.verify(ALICE, &first.code), VerifyOutcome::Verified);

    // Once the previous code is consumed there is nothing to wait for
    assert!(store.try_issue(ALICE, cooldown).is_ok());

    clock.advance(Duration::seconds(60));
    assert!(store.try_issue(ALICE, cooldown).is_ok());
}

#[test]
fn test_try_issue_without_cooldown_always_replaces() {
    let (store, _) = store_at_manual_clock();

    assert!(store.try_issue(ALICE, Duration::zero()).is_ok());
    assert!(store.try_issue(ALICE, Duration::zero()).is_ok());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_try_issue_ignores_expired_entry() {
    let clock = ManualClock::new(Utc::now());
    let store = VerificationCodeStore::with_clock(clock.clone(), Duration::seconds(30));

    store.try_issue(ALICE, Duration::seconds(60)).unwrap();
    clock.advance(Duration::seconds(31));

    assert!(store.try_issue(ALICE, Duration::seconds(60)).is_ok());
}

#[test]
fn test_default_store_uses_ten_minute_ttl() {
    let store = VerificationCodeStore::default();
    assert_eq!(store.ttl(), Duration::minutes(10));
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_issue_and_verify_for_distinct_recipients() {
    let (store, _) = store_at_manual_clock();
    let verified = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for i in 0..16 {
            let store = &store;
            let verified = &verified;
            scope.spawn(move || {
                let recipient = format!("user{}@example.com", i);
                for _ in 0..50 {
                    let issued = store.issue(&recipient);
                    if store.verify(&recipient, &issued.code) == VerifyOutcome::Verified {
                        verified.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(verified.load(Ordering::SeqCst), 16 * 50);
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_verify_of_same_code_succeeds_once() {
    let (store, _) = store_at_manual_clock();
    let issued = store.issue(ALICE);

    let outcomes: Vec<VerifyOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| store.verify(ALICE, &issued.code)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let verified = outcomes.iter().filter(|o| o.is_verified()).count();
    assert_eq!(verified, 1);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, VerifyOutcome::Verified | VerifyOutcome::NotFound)));
}

#[test]
fn test_generated_codes_vary() {
    let (store, _) = store_at_manual_clock();
    let codes: HashSet<String> = (0..50).map(|_| store.issue(ALICE).code).collect();
    assert!(codes.len() > 1);
}
