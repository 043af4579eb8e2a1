// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cooldown gate behavior.

use chrono::{DateTime, Duration, Utc};
use zoltar::config::CooldownPolicy;
use zoltar::services::CooldownGate;
use zoltar::store::keys;

mod common;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("valid test timestamp")
}

fn daily_gate() -> CooldownGate {
    CooldownGate::new(common::test_store(), CooldownPolicy::NextCalendarDay, false)
}

#[test]
fn test_no_last_timestamp_allows() {
    let eval = daily_gate().evaluate_at(Utc::now(), None, false);
    assert!(eval.allowed);
    assert!(eval.wait_message.is_none());
    assert!(eval.unlock_at.is_none());
}

#[test]
fn test_expired_cooldown_allows() {
    let gate = daily_gate();
    // Any last timestamp older than the window unlocks the gate
    for hours_ago in [25, 48, 24 * 30] {
        let now = Utc::now();
        let eval = gate.evaluate_at(now, Some(now - Duration::hours(hours_ago)), false);
        assert!(eval.allowed, "{} hours ago should be allowed", hours_ago);
    }
}

#[test]
fn test_within_window_denies_with_unlock_time() {
    let gate = daily_gate();

    // Reference example: request at 10:00 UTC, checked at 15:00 the same day
    let last = ts("2024-01-01T10:00:00Z");
    let now = ts("2024-01-01T15:00:00Z");

    let eval = gate.evaluate_at(now, Some(last), false);
    assert!(!eval.allowed);
    assert_eq!(eval.unlock_at, Some(ts("2024-01-02T00:00:00Z")));

    let message = eval.wait_message.expect("denied evaluation carries a wait message");
    assert!(message.starts_with("Your fate changes at "));
    assert!(message.contains("Jan 2"), "unexpected message: {}", message);
}

#[test]
fn test_just_past_unlock_allows() {
    let gate = daily_gate();
    let last = ts("2024-01-01T10:00:00Z");

    // Exactly at the unlock instant still denies; one second later allows
    let at_unlock = gate.evaluate_at(ts("2024-01-02T00:00:00Z"), Some(last), false);
    assert!(!at_unlock.allowed);

    let after = gate.evaluate_at(ts("2024-01-02T00:00:01Z"), Some(last), false);
    assert!(after.allowed);
}

#[test]
fn test_fixed_policy_unlocks_after_duration() {
    let gate = CooldownGate::new(common::test_store(), CooldownPolicy::FixedSeconds(30), false);
    let last = ts("2024-01-01T10:00:00Z");

    assert_eq!(gate.unlock_time(last), ts("2024-01-01T10:00:30Z"));
    assert!(!gate.evaluate_at(ts("2024-01-01T10:00:15Z"), Some(last), false).allowed);
    assert!(gate.evaluate_at(ts("2024-01-01T10:00:31Z"), Some(last), false).allowed);
}

#[test]
fn test_unlimited_flag_takes_priority() {
    let gate = CooldownGate::new(common::test_store(), CooldownPolicy::NextCalendarDay, true);

    // Even a timestamp seconds old is ignored
    let now = Utc::now();
    let eval = gate.evaluate_at(now, Some(now - Duration::seconds(5)), false);
    assert!(eval.allowed);
    assert!(eval.wait_message.is_none());
}

#[test]
fn test_skip_wait_allows_within_window() {
    let gate = daily_gate();
    let last = ts("2024-01-01T10:00:00Z");

    let eval = gate.evaluate_at(ts("2024-01-01T15:00:00Z"), Some(last), true);
    assert!(eval.allowed);
    // The pending unlock time is still reported
    assert_eq!(eval.unlock_at, Some(ts("2024-01-02T00:00:00Z")));
}

#[tokio::test]
async fn test_check_reads_armed_timestamp() {
    let store = common::test_store();
    let gate = CooldownGate::new(store, CooldownPolicy::NextCalendarDay, false);

    assert!(gate.check(false).await.allowed);

    gate.arm(Utc::now()).await.expect("arm should persist");
    let eval = gate.check(false).await;
    assert!(!eval.allowed);
    assert!(eval.unlock_at.is_some());
}

#[tokio::test]
async fn test_unparsable_timestamp_fails_open() {
    let store = common::test_store();
    store
        .set(keys::LAST_FORTUNE_USE, "not a timestamp")
        .await
        .expect("store write");

    let gate = CooldownGate::new(store, CooldownPolicy::NextCalendarDay, false);
    assert!(gate.check(false).await.allowed);
}

#[tokio::test]
async fn test_skip_wait_does_not_touch_timestamp() {
    let store = common::test_store();
    let gate = CooldownGate::new(store.clone(), CooldownPolicy::NextCalendarDay, false);

    let armed_at = Utc::now();
    gate.arm(armed_at).await.expect("arm should persist");
    let stored_before = store.get(keys::LAST_FORTUNE_USE).await.unwrap();

    assert!(gate.check(true).await.allowed);

    let stored_after = store.get(keys::LAST_FORTUNE_USE).await.unwrap();
    assert_eq!(stored_before, stored_after);
}
