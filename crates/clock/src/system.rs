// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Real clock using system time and Tokio timers.

use crate::alarm::{self, Alarm};
use crate::clock::{Clock, Ticker, TickerControl, Timer, TimerControl};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Real clock using system time.
///
/// Timers and tickers each run a small Tokio task, so they must be created
/// from within a Tokio runtime. The task ends when the handle is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn new_timer(&self, d: Duration) -> Timer {
        let (control, rx) = RealAlarm::spawn(Alarm::once(d, Instant::now()));
        Timer::new(control, rx)
    }

    fn new_ticker(&self, d: Duration) -> Ticker {
        let (control, rx) = RealAlarm::spawn(Alarm::repeating(d, Instant::now()));
        Ticker::new(control, rx)
    }
}

struct Shared {
    alarm: Mutex<Alarm>,
    rearmed: Notify,
}

/// Control half of a real timer or ticker
struct RealAlarm {
    shared: Arc<Shared>,
    _task: DropGuard,
}

impl RealAlarm {
    fn spawn(alarm: Alarm) -> (Self, mpsc::Receiver<DateTime<Utc>>) {
        let (tx, rx) = mpsc::channel(1);
        let shared = Arc::new(Shared {
            alarm: Mutex::new(alarm),
            rearmed: Notify::new(),
        });
        let token = CancellationToken::new();
        tokio::spawn(run(Arc::clone(&shared), tx, token.clone()));
        let control = Self {
            shared,
            _task: token.drop_guard(),
        };
        (control, rx)
    }

    fn disarm(&self) -> bool {
        let was_pending = self.shared.alarm.lock().disarm();
        self.shared.rearmed.notify_one();
        was_pending
    }

    fn rearm(&self, d: Duration) -> bool {
        let was_pending = self.shared.alarm.lock().rearm(d, Instant::now());
        self.shared.rearmed.notify_one();
        was_pending
    }
}

async fn run(shared: Arc<Shared>, tx: mpsc::Sender<DateTime<Utc>>, token: CancellationToken) {
    loop {
        let deadline = shared.alarm.lock().deadline();
        tokio::select! {
            _ = token.cancelled() => break,
            _ = shared.rearmed.notified() => continue,
            _ = alarm::sleep_until(deadline) => {
                let due = shared.alarm.lock().poll_due(Instant::now()).is_some();
                if due {
                    // full slot: the receiver has not drained the last fire
                    let _ = tx.try_send(Utc::now());
                }
            }
        }
    }
}

impl TimerControl for RealAlarm {
    fn stop(&self) -> bool {
        self.disarm()
    }

    fn reset(&self, d: Duration) -> bool {
        self.rearm(d)
    }
}

impl TickerControl for RealAlarm {
    fn stop(&self) {
        self.disarm();
    }

    fn reset(&self, d: Duration) {
        self.rearm(d);
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
