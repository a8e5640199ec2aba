// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable virtual clock.

use crate::bridge::TimeBridge;
use crate::clock::{Clock, Ticker, Timer};
use crate::config::MockConfig;
use crate::error::LifecycleError;
use crate::handle::{MockTicker, MockTimer};
use crate::script::{self, ScriptCursor};
use crate::state::{Lifecycle, LifecycleState};
use chrono::{DateTime, Utc};
use mockclock_history::{Call, CallLog, InstanceKind, Timeline};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Instances owned by a clock, in creation order
#[derive(Default)]
struct Registry {
    timers: usize,
    tickers: usize,
    bridges: Vec<Arc<TimeBridge>>,
    /// Set when `stop()` begins; no instance may be created after that
    closed: bool,
}

impl Registry {
    fn next_seq(&mut self, kind: InstanceKind) -> usize {
        let counter = match kind {
            InstanceKind::Timer => &mut self.timers,
            InstanceKind::Ticker => &mut self.tickers,
        };
        *counter += 1;
        *counter
    }
}

/// State shared between a clock and its bridges
pub(crate) struct Core {
    pub(crate) config: MockConfig,
    pub(crate) timeline: Timeline,
    pub(crate) calls: CallLog,
    lifecycle: Lifecycle,
    now_cursor: Mutex<ScriptCursor>,
    registry: Mutex<Registry>,
}

/// Mock clock for testing with scripted, accelerated time.
///
/// Virtual time starts at the instant given to [`start`](Self::start) and only
/// moves forward: each [`now`](Clock::now) adds a scripted step, each timer or
/// ticker creation and reset adds its script's `now`, and every real fire of an
/// accelerated timer adds the real time elapsed multiplied by the ratio.
///
/// Everything done through the clock is recorded. Once [`stop`](Self::stop)
/// has returned, [`calls`](Self::calls) and [`times`](Self::times) give the
/// full history for assertions.
///
/// Timers and tickers run Tokio tasks, so they must be created from within a
/// Tokio runtime.
pub struct MockClock {
    core: Arc<Core>,
}

impl MockClock {
    pub fn new(config: MockConfig) -> Self {
        Self {
            core: Arc::new(Core {
                config,
                timeline: Timeline::default(),
                calls: CallLog::new(),
                lifecycle: Lifecycle::default(),
                now_cursor: Mutex::new(ScriptCursor::new()),
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.core.config
    }

    pub fn state(&self) -> LifecycleState {
        self.core.lifecycle.get()
    }

    /// Start mocking with virtual time set to `t`.
    ///
    /// A clock starts once; starting a started or stopped clock is refused.
    pub fn start(&self, t: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.core.lifecycle.start(|| {
            // nothing records before start, so the timeline is still empty
            let placed = self.core.timeline.set_origin(t);
            debug_assert!(placed, "timeline written before start");
        })?;
        debug!(origin = %t, "mock clock started");
        Ok(())
    }

    /// Stop every timer and ticker and freeze the history.
    ///
    /// Waits for all bridge tasks to finish, so nothing is recorded after
    /// this returns. Idempotent.
    pub async fn stop(&self) {
        let bridges = {
            let mut registry = self.core.registry.lock();
            registry.closed = true;
            std::mem::take(&mut registry.bridges)
        };
        let tasks: Vec<_> = bridges.iter().flat_map(|bridge| bridge.halt()).collect();
        for task in tasks {
            if let Err(err) = task.await {
                if err.is_panic() {
                    warn!(error = %err, "time bridge task panicked");
                }
            }
        }

        let previous = self.core.lifecycle.finish();
        debug!(
            %previous,
            instances = bridges.len(),
            calls = self.core.calls.len(),
            "mock clock stopped"
        );
    }

    /// Current virtual time, advanced by the next scripted step
    pub fn try_now(&self) -> Result<DateTime<Utc>, LifecycleError> {
        let now = self.core.lifecycle.while_started("now", || {
            let step = script::resolve_now(
                &self.core.config.now_scripts,
                &mut self.core.now_cursor.lock(),
                self.core.config.default,
            );
            self.core.calls.record(Call::Now);
            self.core.timeline.advance(step)
        })?;
        trace!(virtual_time = %now, "now");
        Ok(now)
    }

    /// New accelerated one-shot timer for a virtual duration `d`
    pub fn try_new_timer(&self, d: Duration) -> Result<Timer, LifecycleError> {
        let (bridge, rx) = self.create(InstanceKind::Timer, "new_timer", d)?;
        Ok(Timer::new(MockTimer::new(bridge), rx))
    }

    /// New accelerated ticker for a virtual period `d`
    pub fn try_new_ticker(&self, d: Duration) -> Result<Ticker, LifecycleError> {
        let (bridge, rx) = self.create(InstanceKind::Ticker, "new_ticker", d)?;
        Ok(Ticker::new(MockTicker::new(bridge), rx))
    }

    fn create(
        &self,
        kind: InstanceKind,
        op: &'static str,
        d: Duration,
    ) -> Result<(Arc<TimeBridge>, mpsc::Receiver<DateTime<Utc>>), LifecycleError> {
        let mut registry = self.core.registry.lock();
        if registry.closed {
            return Err(LifecycleError::NotStarted {
                op,
                state: self.core.lifecycle.get(),
            });
        }
        let (bridge, rx) = self.core.lifecycle.while_started(op, || {
            let seq = registry.next_seq(kind);
            TimeBridge::spawn(Arc::clone(&self.core), kind, seq, d)
        })?;
        registry.bridges.push(Arc::clone(&bridge));
        Ok((bridge, rx))
    }

    /// Descriptors of every call made, in order. Requires a stopped clock.
    pub fn calls(&self) -> Result<Vec<String>, LifecycleError> {
        self.core.lifecycle.require_stopped("calls")?;
        Ok(self.core.calls.descriptors())
    }

    /// Typed form of [`calls`](Self::calls)
    pub fn call_records(&self) -> Result<Vec<Call>, LifecycleError> {
        self.core.lifecycle.require_stopped("call_records")?;
        Ok(self.core.calls.calls())
    }

    /// Every virtual time produced, in order. Requires a stopped clock.
    ///
    /// This covers `now()` results, creations and resets, and timer or
    /// ticker fires that moved time forward.
    pub fn times(&self) -> Result<Vec<DateTime<Utc>>, LifecycleError> {
        self.core.lifecycle.require_stopped("times")?;
        Ok(self.core.timeline.times())
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl Drop for MockClock {
    fn drop(&mut self) {
        let bridges = std::mem::take(&mut self.core.registry.lock().bridges);
        for bridge in bridges {
            // detached; each task exits on its next poll
            drop(bridge.halt());
        }
    }
}

impl std::fmt::Debug for MockClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClock")
            .field("state", &self.state())
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

// Misuse is fatal here: the trait has no error channel, and a test that
// drives a clock outside its lifecycle must abort.
#[allow(clippy::panic)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.try_now().unwrap_or_else(|err| panic!("{err}"))
    }

    fn new_timer(&self, d: Duration) -> Timer {
        self.try_new_timer(d).unwrap_or_else(|err| panic!("{err}"))
    }

    fn new_ticker(&self, d: Duration) -> Ticker {
        self.try_new_ticker(d).unwrap_or_else(|err| panic!("{err}"))
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
