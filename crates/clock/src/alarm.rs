// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Armed real timers and tickers.
//!
//! An [`Alarm`] is the bookkeeping half of a real timer: when it is due next,
//! whether it repeats, and whether it is still pending. The task that owns it
//! sleeps on [`sleep_until`] and calls [`Alarm::poll_due`] when it wakes.

use std::time::Duration;
use tokio::time::Instant;

/// Stand-in deadline for durations too large to represent
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Shortest ticker period accepted
const MIN_PERIOD: Duration = Duration::from_nanos(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Alarm {
    next: Option<Instant>,
    period: Option<Duration>,
}

fn deadline(now: Instant, after: Duration) -> Instant {
    now.checked_add(after).unwrap_or(now + FAR_FUTURE)
}

impl Alarm {
    /// Fires once, `after` from `now`
    pub(crate) fn once(after: Duration, now: Instant) -> Self {
        Self {
            next: Some(deadline(now, after)),
            period: None,
        }
    }

    /// Fires every `period`, first at `now + period`
    pub(crate) fn repeating(period: Duration, now: Instant) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            next: Some(deadline(now, period)),
            period: Some(period),
        }
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.next
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    /// Cancel any pending fire. Returns whether one was pending.
    pub(crate) fn disarm(&mut self) -> bool {
        self.next.take().is_some()
    }

    /// Arm again for `after` from `now`; a ticker also takes `after` as its
    /// new period. Returns whether a fire was pending.
    pub(crate) fn rearm(&mut self, after: Duration, now: Instant) -> bool {
        let was_pending = self.is_pending();
        *self = match self.period {
            Some(_) => Self::repeating(after, now),
            None => Self::once(after, now),
        };
        was_pending
    }

    /// Consume a fire if one is due at `now`, returning the instant it was due.
    ///
    /// A one-shot alarm goes idle. A ticker schedules its next tick, skipping
    /// ticks that were missed entirely; the returned instant is then the latest
    /// tick at or before `now`.
    pub(crate) fn poll_due(&mut self, now: Instant) -> Option<Instant> {
        let next = self.next?;
        if next > now {
            return None;
        }
        let Some(period) = self.period else {
            self.next = None;
            return Some(next);
        };
        let late = now.duration_since(next).as_nanos();
        let skipped = u64::try_from(late - late % period.as_nanos()).unwrap_or(u64::MAX);
        let due = deadline(next, Duration::from_nanos(skipped));
        self.next = Some(deadline(due, period));
        Some(due)
    }
}

/// Sleep until `deadline`, or forever when there is none
pub(crate) async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
