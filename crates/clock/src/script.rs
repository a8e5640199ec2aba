// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripts: how far a call moves virtual time and how fast real timers run.

use mockclock_history::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Virtual time added by a call whose script leaves `now` unset
pub const DEFAULT_SCRIPT_NOW: Duration = Duration::from_millis(1);

/// Speed-up applied to real timers and tickers when a script leaves `ratio` unset
pub const DEFAULT_SCRIPT_RATIO: u32 = 100;

/// Effect of one call on virtual time and on real-timer speed.
///
/// Zero fields mean "use the default"; see [`Script::canon`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Virtual time added by the call
    #[serde(default, with = "duration_serde")]
    pub now: Duration,

    /// Divisor applied to the requested duration before arming the real timer
    #[serde(default)]
    pub ratio: u32,
}

impl Script {
    pub const fn new(now: Duration, ratio: u32) -> Self {
        Self { now, ratio }
    }

    /// Replace unset fields with [`DEFAULT_SCRIPT_NOW`] and [`DEFAULT_SCRIPT_RATIO`].
    pub fn canon(self) -> Self {
        Self {
            now: if self.now.is_zero() {
                DEFAULT_SCRIPT_NOW
            } else {
                self.now
            },
            ratio: if self.ratio == 0 {
                DEFAULT_SCRIPT_RATIO
            } else {
                self.ratio
            },
        }
    }

    /// Real duration to arm for a requested duration `d`
    pub fn scale(&self, d: Duration) -> Duration {
        d / self.canon().ratio
    }
}

/// Position within one instance's script sequence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptCursor {
    consumed: usize,
}

impl ScriptCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries taken so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Resolve the script for the next call of instance `instance` (1-based).
///
/// Takes the next entry of `sequences[instance - 1]` when one remains,
/// advancing the cursor; otherwise yields `default`. Always canonical.
pub fn resolve(
    sequences: &[Vec<Script>],
    instance: usize,
    cursor: &mut ScriptCursor,
    default: Script,
) -> Script {
    let next = instance
        .checked_sub(1)
        .and_then(|index| sequences.get(index))
        .and_then(|sequence| sequence.get(cursor.consumed));
    match next {
        Some(script) => {
            cursor.consumed += 1;
            script.canon()
        }
        None => default.canon(),
    }
}

/// Resolve how far the next `now()` call advances virtual time.
///
/// The cursor counts every call; the i-th call uses `now_scripts[i]` when it
/// exists and is non-zero.
pub fn resolve_now(now_scripts: &[Duration], cursor: &mut ScriptCursor, default: Script) -> Duration {
    let index = cursor.consumed;
    cursor.consumed += 1;
    match now_scripts.get(index) {
        Some(d) if !d.is_zero() => *d,
        _ => default.canon().now,
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
