#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

const MS: Duration = Duration::from_millis(1);

#[test]
fn test_once_fires_once() {
    let start = Instant::now();
    let mut alarm = Alarm::once(10 * MS, start);

    assert_eq!(alarm.deadline(), Some(start + 10 * MS));
    assert_eq!(alarm.poll_due(start + 9 * MS), None);
    assert_eq!(alarm.poll_due(start + 10 * MS), Some(start + 10 * MS));
    assert!(!alarm.is_pending());
    assert_eq!(alarm.poll_due(start + 20 * MS), None);
}

#[test]
fn test_disarm_reports_pending() {
    let start = Instant::now();
    let mut alarm = Alarm::once(10 * MS, start);

    assert!(alarm.disarm());
    assert!(!alarm.disarm());
    assert_eq!(alarm.poll_due(start + 10 * MS), None);
}

#[test]
fn test_rearm_after_fire_reports_not_pending() {
    let start = Instant::now();
    let mut alarm = Alarm::once(10 * MS, start);

    assert!(alarm.rearm(5 * MS, start + 2 * MS));
    assert_eq!(alarm.deadline(), Some(start + 7 * MS));

    assert!(alarm.poll_due(start + 7 * MS).is_some());
    assert!(!alarm.rearm(5 * MS, start + 8 * MS));
    assert!(alarm.is_pending());
}

#[test]
fn test_repeating_schedules_next_tick() {
    let start = Instant::now();
    let mut alarm = Alarm::repeating(10 * MS, start);

    assert_eq!(alarm.poll_due(start + 10 * MS), Some(start + 10 * MS));
    assert_eq!(alarm.deadline(), Some(start + 20 * MS));
    assert_eq!(alarm.poll_due(start + 20 * MS), Some(start + 20 * MS));
    assert_eq!(alarm.deadline(), Some(start + 30 * MS));
}

#[test]
fn test_repeating_skips_missed_ticks() {
    let start = Instant::now();
    let mut alarm = Alarm::repeating(10 * MS, start);

    // the latest due tick, not the wake-up time
    assert_eq!(alarm.poll_due(start + 35 * MS), Some(start + 30 * MS));
    assert_eq!(alarm.deadline(), Some(start + 40 * MS));
}

#[test]
fn test_rearm_changes_ticker_period() {
    let start = Instant::now();
    let mut alarm = Alarm::repeating(10 * MS, start);

    alarm.rearm(4 * MS, start + MS);
    assert_eq!(alarm.poll_due(start + 5 * MS), Some(start + 5 * MS));
    assert_eq!(alarm.deadline(), Some(start + 9 * MS));
}

#[test]
fn test_late_wake_reports_due_instant() {
    let start = Instant::now();
    let mut once = Alarm::once(10 * MS, start);
    assert_eq!(once.poll_due(start + 13 * MS), Some(start + 10 * MS));

    let mut ticker = Alarm::repeating(10 * MS, start);
    assert_eq!(ticker.poll_due(start + 12 * MS), Some(start + 10 * MS));
    assert_eq!(ticker.poll_due(start + 21 * MS), Some(start + 20 * MS));
}

#[test]
fn test_zero_period_is_clamped() {
    let start = Instant::now();
    let mut alarm = Alarm::repeating(Duration::ZERO, start);

    assert_eq!(alarm.deadline(), Some(start + MIN_PERIOD));
    assert_eq!(alarm.poll_due(start + MS), Some(start + MS));
    assert!(alarm.deadline().unwrap() > start + MS);
}

#[test]
fn test_huge_duration_does_not_overflow() {
    let start = Instant::now();
    let alarm = Alarm::once(Duration::MAX, start);
    assert!(alarm.deadline().unwrap() > start);
}

#[tokio::test(start_paused = true)]
async fn test_sleep_until_deadline() {
    let start = Instant::now();
    sleep_until(Some(start + 50 * MS)).await;
    assert!(Instant::now() >= start + 50 * MS);
}

#[tokio::test(start_paused = true)]
async fn test_sleep_until_none_pends() {
    let result = tokio::time::timeout(Duration::from_secs(60), sleep_until(None)).await;
    assert!(result.is_err());
}
