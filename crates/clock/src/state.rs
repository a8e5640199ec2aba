// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mock clock lifecycle.

use crate::error::LifecycleError;
use parking_lot::Mutex;
use std::fmt;

/// Lifecycle of a mock clock: `NotReady → Started → Stopped`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    NotReady,
    Started,
    Stopped,
}

impl LifecycleState {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotReady => "not ready",
            Self::Started => "started",
            Self::Stopped => "stopped",
        })
    }
}

/// Lock-guarded lifecycle state with the access checks the clock needs
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    state: Mutex<LifecycleState>,
}

impl Lifecycle {
    pub(crate) fn get(&self) -> LifecycleState {
        *self.state.lock()
    }

    /// `NotReady → Started`, running `on_start` before the transition is
    /// visible. Any other state is refused unchanged.
    pub(crate) fn start(&self, on_start: impl FnOnce()) -> Result<(), LifecycleError> {
        let mut state = self.state.lock();
        match *state {
            LifecycleState::NotReady => {
                on_start();
                *state = LifecycleState::Started;
                Ok(())
            }
            other => Err(LifecycleError::AlreadyStarted { state: other }),
        }
    }

    /// Enter the terminal state. Returns the previous state.
    pub(crate) fn finish(&self) -> LifecycleState {
        std::mem::replace(&mut *self.state.lock(), LifecycleState::Stopped)
    }

    /// Run `f` while holding the state as `Started`.
    ///
    /// `finish` waits for `f` to return, so anything `f` records lands before
    /// the clock is stopped.
    pub(crate) fn while_started<T>(
        &self,
        op: &'static str,
        f: impl FnOnce() -> T,
    ) -> Result<T, LifecycleError> {
        let state = self.state.lock();
        if !state.is_started() {
            return Err(LifecycleError::NotStarted { op, state: *state });
        }
        Ok(f())
    }

    pub(crate) fn require_stopped(&self, op: &'static str) -> Result<(), LifecycleError> {
        let state = self.get();
        if state.is_stopped() {
            Ok(())
        } else {
            Err(LifecycleError::NotStopped { op, state })
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
