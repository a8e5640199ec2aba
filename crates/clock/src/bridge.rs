// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-instance bridge from accelerated real time to virtual time.
//!
//! Every mock timer or ticker owns a [`TimeBridge`]. Its task waits on a real
//! [`Alarm`] armed at `d / ratio`; each fire is scaled back up by `ratio`,
//! pushed into the clock's timeline as a forward-only update and offered to
//! the instance's one-slot channel. A full slot drops the value.

use crate::alarm::{self, Alarm};
use crate::mock::Core;
use crate::script::{self, ScriptCursor};
use chrono::{DateTime, Utc};
use mockclock_history::{duration, saturating_add, Call, InstanceKind};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

struct Task {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

struct BridgeState {
    cursor: ScriptCursor,
    ratio: u32,
    virtual_anchor: DateTime<Utc>,
    real_anchor: Instant,
    alarm: Alarm,
    task: Option<Task>,
    /// Tasks ended by the instance's own stop, joined when the clock stops
    retired: Vec<JoinHandle<()>>,
    /// Set once the owning clock has stopped
    halted: bool,
}

pub(crate) struct TimeBridge {
    kind: InstanceKind,
    seq: usize,
    core: Arc<Core>,
    state: Mutex<BridgeState>,
    rearmed: Notify,
    tx: mpsc::Sender<DateTime<Utc>>,
}

impl TimeBridge {
    /// Create instance `seq` of `kind` for a requested duration `d` and start its task.
    ///
    /// Resolves the creation script, records the creation call and advances
    /// virtual time before arming.
    pub(crate) fn spawn(
        core: Arc<Core>,
        kind: InstanceKind,
        seq: usize,
        d: Duration,
    ) -> (Arc<Self>, mpsc::Receiver<DateTime<Utc>>) {
        let mut cursor = ScriptCursor::new();
        let script = script::resolve(
            core.config.scripts_for(kind),
            seq,
            &mut cursor,
            core.config.default,
        );
        core.calls.record(Call::Create { kind, duration: d });
        let virtual_anchor = core.timeline.advance(script.now);

        let real_anchor = Instant::now();
        let alarm = match kind {
            InstanceKind::Timer => Alarm::once(script.scale(d), real_anchor),
            InstanceKind::Ticker => Alarm::repeating(script.scale(d), real_anchor),
        };

        let (tx, rx) = mpsc::channel(1);
        let bridge = Arc::new(Self {
            kind,
            seq,
            core,
            state: Mutex::new(BridgeState {
                cursor,
                ratio: script.ratio,
                virtual_anchor,
                real_anchor,
                alarm,
                task: None,
                retired: Vec::new(),
                halted: false,
            }),
            rearmed: Notify::new(),
            tx,
        });
        let task = bridge.launch();
        bridge.state.lock().task = Some(task);

        debug!(
            %kind,
            seq,
            duration = %duration::format(d),
            ratio = script.ratio,
            virtual_time = %virtual_anchor,
            "instance created"
        );
        (bridge, rx)
    }

    fn launch(self: &Arc<Self>) -> Task {
        let token = CancellationToken::new();
        let handle = tokio::spawn(Arc::clone(self).run(token.clone()));
        Task { token, handle }
    }

    async fn run(self: Arc<Self>, token: CancellationToken) {
        loop {
            let deadline = self.state.lock().alarm.deadline();
            tokio::select! {
                _ = token.cancelled() => break,
                _ = self.rearmed.notified() => continue,
                _ = alarm::sleep_until(deadline) => self.fire(&token),
            }
        }
        trace!(kind = %self.kind, seq = self.seq, "bridge task finished");
    }

    fn fire(&self, token: &CancellationToken) {
        let mut state = self.state.lock();
        // cancellation happens under this lock, so nothing is written after it
        if token.is_cancelled() {
            return;
        }
        // elapsed runs to the instant the alarm was due, not to the wake-up
        let Some(fired_at) = state.alarm.poll_due(Instant::now()) else {
            return;
        };

        let elapsed = fired_at.saturating_duration_since(state.real_anchor);
        let virtual_now = saturating_add(state.virtual_anchor, elapsed.saturating_mul(state.ratio));
        state.virtual_anchor = virtual_now;
        state.real_anchor = fired_at;
        self.core.timeline.advance_to(virtual_now);

        match self.tx.try_send(virtual_now) {
            Ok(()) => trace!(
                kind = %self.kind,
                seq = self.seq,
                virtual_time = %virtual_now,
                "delivered"
            ),
            Err(TrySendError::Full(_)) => debug!(
                kind = %self.kind,
                seq = self.seq,
                virtual_time = %virtual_now,
                "delivery dropped, slot still occupied"
            ),
            Err(TrySendError::Closed(_)) => trace!(
                kind = %self.kind,
                seq = self.seq,
                "delivery skipped, receiver dropped"
            ),
        }
    }

    /// Re-arm for a requested duration `d`. Returns whether a fire was pending.
    ///
    /// An instance previously stopped on its own gets a fresh task.
    pub(crate) fn reset(self: &Arc<Self>, d: Duration) -> bool {
        let mut state = self.state.lock();
        if state.halted {
            warn!(
                kind = %self.kind,
                seq = self.seq,
                "reset ignored, owning clock already stopped"
            );
            return false;
        }

        let script = script::resolve(
            self.core.config.scripts_for(self.kind),
            self.seq,
            &mut state.cursor,
            self.core.config.default,
        );
        state.ratio = script.ratio;
        state.virtual_anchor = self.core.timeline.advance(script.now);
        let now = Instant::now();
        let was_pending = state.alarm.rearm(script.scale(d), now);
        state.real_anchor = now;
        if state.task.is_none() {
            state.task = Some(self.launch());
        }
        self.core.calls.record(Call::Reset {
            kind: self.kind,
            seq: self.seq,
            duration: d,
        });
        let virtual_time = state.virtual_anchor;
        drop(state);
        self.rearmed.notify_one();

        debug!(
            kind = %self.kind,
            seq = self.seq,
            duration = %duration::format(d),
            ratio = script.ratio,
            %virtual_time,
            was_pending,
            "instance reset"
        );
        was_pending
    }

    /// Disarm and end the task. Returns whether a fire was pending.
    pub(crate) fn stop(&self) -> bool {
        let mut state = self.state.lock();
        if state.halted {
            warn!(
                kind = %self.kind,
                seq = self.seq,
                "stop ignored, owning clock already stopped"
            );
            return false;
        }

        self.core.calls.record(Call::Stop {
            kind: self.kind,
            seq: self.seq,
        });
        let was_pending = state.alarm.disarm();
        if let Some(task) = state.task.take() {
            task.token.cancel();
            state.retired.retain(|handle| !handle.is_finished());
            state.retired.push(task.handle);
        }

        debug!(kind = %self.kind, seq = self.seq, was_pending, "instance stopped");
        was_pending
    }

    /// Final shutdown by the owning clock; returns the tasks to join.
    ///
    /// Idempotent: a halted bridge yields nothing.
    pub(crate) fn halt(&self) -> Vec<JoinHandle<()>> {
        let mut state = self.state.lock();
        if state.halted {
            return Vec::new();
        }
        state.halted = true;
        state.alarm.disarm();

        let mut handles = std::mem::take(&mut state.retired);
        if let Some(task) = state.task.take() {
            task.token.cancel();
            handles.push(task.handle);
        }
        handles
    }

    pub(crate) fn kind(&self) -> InstanceKind {
        self.kind
    }

    pub(crate) fn seq(&self) -> usize {
        self.seq
    }
}

impl std::fmt::Debug for TimeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeBridge")
            .field("kind", &self.kind)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}
