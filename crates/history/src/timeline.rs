// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual time and its record.
//!
//! A [`Timeline`] holds the current virtual instant together with every value
//! it has taken, behind a single lock, so an update and its log entry are one
//! atomic step. Time only moves forward.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::time::Duration;

/// Add a std duration to a timestamp, saturating at the maximum representable time.
pub fn saturating_add(t: DateTime<Utc>, d: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(d)
        .ok()
        .and_then(|delta| t.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Debug)]
struct TimelineState {
    now: DateTime<Utc>,
    times: Vec<DateTime<Utc>>,
}

/// Monotonic virtual time with an append-only record of produced values
#[derive(Debug)]
pub struct Timeline {
    state: Mutex<TimelineState>,
}

impl Timeline {
    /// Create a timeline positioned at `origin` with an empty record
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(TimelineState {
                now: origin,
                times: Vec::new(),
            }),
        }
    }

    /// Create a timeline at the Unix epoch
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Reposition the timeline before any value has been produced.
    ///
    /// Returns false (and changes nothing) once the record is non-empty,
    /// since moving the origin then could take time backwards.
    pub fn set_origin(&self, origin: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        if !state.times.is_empty() {
            return false;
        }
        state.now = origin;
        true
    }

    /// Current virtual time, without recording it
    pub fn now(&self) -> DateTime<Utc> {
        self.state.lock().now
    }

    /// Move forward by `d`, record and return the new time
    pub fn advance(&self, d: Duration) -> DateTime<Utc> {
        let mut state = self.state.lock();
        state.now = saturating_add(state.now, d);
        let now = state.now;
        state.times.push(now);
        now
    }

    /// Move to `t` if it is later than the current time.
    ///
    /// Returns whether time moved; only a move is recorded.
    pub fn advance_to(&self, t: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        if t <= state.now {
            return false;
        }
        state.now = t;
        state.times.push(t);
        true
    }

    /// Snapshot of every recorded value, oldest first
    pub fn times(&self) -> Vec<DateTime<Utc>> {
        self.state.lock().times.clone()
    }

    /// Number of recorded values
    pub fn len(&self) -> usize {
        self.state.lock().times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().times.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::at_epoch()
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
