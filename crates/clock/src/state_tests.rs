#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[test]
fn test_default_is_not_ready() {
    let lifecycle = Lifecycle::default();
    assert_eq!(lifecycle.get(), LifecycleState::NotReady);
}

#[test]
fn test_start_then_finish() {
    let lifecycle = Lifecycle::default();

    let mut ran = false;
    lifecycle.start(|| ran = true).unwrap();
    assert!(ran);
    assert!(lifecycle.get().is_started());

    assert_eq!(lifecycle.finish(), LifecycleState::Started);
    assert!(lifecycle.get().is_stopped());
}

#[test]
fn test_start_twice_is_refused() {
    let lifecycle = Lifecycle::default();
    lifecycle.start(|| {}).unwrap();

    let mut ran = false;
    assert_eq!(
        lifecycle.start(|| ran = true),
        Err(LifecycleError::AlreadyStarted {
            state: LifecycleState::Started
        })
    );
    assert!(!ran);
    assert!(lifecycle.get().is_started());
}

#[test]
fn test_stopped_is_terminal() {
    let lifecycle = Lifecycle::default();
    lifecycle.start(|| {}).unwrap();
    lifecycle.finish();

    assert!(lifecycle.start(|| {}).is_err());
    assert_eq!(lifecycle.finish(), LifecycleState::Stopped);
    assert!(lifecycle.get().is_stopped());
}

#[test]
fn test_while_started_error() {
    let lifecycle = Lifecycle::default();
    let err = lifecycle.while_started("now", || ()).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::NotStarted {
            op: "now",
            state: LifecycleState::NotReady
        }
    );

    lifecycle.start(|| {}).unwrap();
    assert!(lifecycle.while_started("now", || ()).is_ok());
    assert!(lifecycle.require_stopped("calls").is_err());
}

#[test]
fn test_while_started_runs_only_when_started() {
    let lifecycle = Lifecycle::default();
    assert!(matches!(
        lifecycle.while_started("now", || 1),
        Err(LifecycleError::NotStarted {
            op: "now",
            state: LifecycleState::NotReady
        })
    ));

    lifecycle.start(|| {}).unwrap();
    assert_eq!(lifecycle.while_started("now", || 2), Ok(2));

    lifecycle.finish();
    let mut ran = false;
    assert!(lifecycle.while_started("now", || ran = true).is_err());
    assert!(!ran);
}

#[test]
fn test_require_stopped() {
    let lifecycle = Lifecycle::default();
    lifecycle.start(|| {}).unwrap();
    lifecycle.finish();

    assert!(lifecycle.require_stopped("times").is_ok());
    assert!(matches!(
        lifecycle.while_started("new_timer", || ()),
        Err(LifecycleError::NotStarted {
            state: LifecycleState::Stopped,
            ..
        })
    ));
}

#[test]
fn test_error_messages() {
    let err = LifecycleError::NotStopped {
        op: "calls",
        state: LifecycleState::Started,
    };
    assert_eq!(
        err.to_string(),
        "MockClock::calls() requires a stopped clock; call stop() first (clock is started)"
    );
}

#[rstest]
#[case(LifecycleState::NotReady, "not ready", false, false)]
#[case(LifecycleState::Started, "started", true, false)]
#[case(LifecycleState::Stopped, "stopped", false, true)]
fn test_state_display(
    #[case] state: LifecycleState,
    #[case] text: &str,
    #[case] started: bool,
    #[case] stopped: bool,
) {
    assert_eq!(state.to_string(), text);
    assert_eq!(state.is_started(), started);
    assert_eq!(state.is_stopped(), stopped);
}
