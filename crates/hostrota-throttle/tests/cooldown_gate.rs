//! Integration tests for the keyed cooldown gate.
//!
//! Uses `start_paused` so the tokio clock only moves when we advance it.

use std::time::Duration;

use hostrota_throttle::CooldownGate;

const FIVE_SECS: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn test_first_message_is_admitted() {
    let mut gate = CooldownGate::new();
    assert!(gate.admit("status", FIVE_SECS));
    assert_eq!(gate.suppressed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeat_within_interval_is_suppressed() {
    let mut gate = CooldownGate::new();
    assert!(gate.admit("status", FIVE_SECS));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!gate.admit("status", FIVE_SECS));
    assert_eq!(gate.suppressed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_repeat_after_interval_is_admitted() {
    let mut gate = CooldownGate::new();
    assert!(gate.admit("status", FIVE_SECS));

    tokio::time::advance(FIVE_SECS).await;
    assert!(gate.admit("status", FIVE_SECS));
    assert_eq!(gate.suppressed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_suppressed_send_does_not_extend_window() {
    let mut gate = CooldownGate::new();
    assert!(gate.admit("status", FIVE_SECS));

    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(!gate.admit("status", FIVE_SECS));

    // The window is measured from the last *admitted* send.
    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(gate.admit("status", FIVE_SECS));
}

#[tokio::test(start_paused = true)]
async fn test_keys_are_independent() {
    let mut gate = CooldownGate::new();
    assert!(gate.admit("a", FIVE_SECS));
    assert!(gate.admit("b", FIVE_SECS));
    assert!(!gate.admit("a", FIVE_SECS));
}

#[test]
fn test_zero_interval_never_suppresses() {
    let mut gate = CooldownGate::new();
    let now = tokio::time::Instant::now();
    assert!(gate.admit_at("k", Duration::ZERO, now));
    assert!(gate.admit_at("k", Duration::ZERO, now));
}
