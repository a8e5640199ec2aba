// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Control halves handed out by the mock clock.

use crate::bridge::TimeBridge;
use crate::clock::{TickerControl, TimerControl};
use std::sync::Arc;
use std::time::Duration;

pub(crate) struct MockTimer(Arc<TimeBridge>);

impl MockTimer {
    pub(crate) fn new(bridge: Arc<TimeBridge>) -> Self {
        Self(bridge)
    }
}

impl TimerControl for MockTimer {
    fn stop(&self) -> bool {
        self.0.stop()
    }

    fn reset(&self, d: Duration) -> bool {
        self.0.reset(d)
    }
}

pub(crate) struct MockTicker(Arc<TimeBridge>);

impl MockTicker {
    pub(crate) fn new(bridge: Arc<TimeBridge>) -> Self {
        Self(bridge)
    }
}

impl TickerControl for MockTicker {
    fn stop(&self) {
        self.0.stop();
    }

    fn reset(&self, d: Duration) {
        self.0.reset(d);
    }
}

impl std::fmt::Debug for MockTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockTimer({}-{})", self.0.kind(), self.0.seq())
    }
}

impl std::fmt::Debug for MockTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockTicker({}-{})", self.0.kind(), self.0.seq())
    }
}
