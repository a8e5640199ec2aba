// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic testing.
//!
//! Application code asks a [`Clock`] for the current time, timers and tickers.
//! Production wiring passes a [`SystemClock`](crate::SystemClock); tests pass a
//! [`MockClock`](crate::MockClock) and assert on what it recorded.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Clock trait for time abstraction
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;

    /// One-shot timer firing once after `d`
    fn new_timer(&self, d: Duration) -> Timer;

    /// Ticker firing every `d`
    fn new_ticker(&self, d: Duration) -> Ticker;
}

/// Control half of a timer
pub trait TimerControl: Send + Sync {
    /// Cancel the timer. Returns false if it had already fired or been stopped.
    fn stop(&self) -> bool;

    /// Re-arm the timer for `d`. Returns whether it was still pending.
    fn reset(&self, d: Duration) -> bool;
}

/// Control half of a ticker
pub trait TickerControl: Send + Sync {
    /// Stop ticking
    fn stop(&self);

    /// Tick every `d` from now on
    fn reset(&self, d: Duration);
}

/// One-shot timer handle.
///
/// Fire times arrive on a one-slot channel; a fire that finds the slot full
/// is dropped.
pub struct Timer {
    control: Box<dyn TimerControl>,
    fired: mpsc::Receiver<DateTime<Utc>>,
}

impl Timer {
    pub fn new(control: impl TimerControl + 'static, fired: mpsc::Receiver<DateTime<Utc>>) -> Self {
        Self {
            control: Box::new(control),
            fired,
        }
    }

    /// See [`TimerControl::stop`]
    pub fn stop(&self) -> bool {
        self.control.stop()
    }

    /// See [`TimerControl::reset`]
    pub fn reset(&self, d: Duration) -> bool {
        self.control.reset(d)
    }

    /// Wait for the next fire time.
    ///
    /// Returns `None` only once the sending side is gone.
    pub async fn recv(&mut self) -> Option<DateTime<Utc>> {
        self.fired.recv().await
    }

    /// Take a fire time if one is waiting
    pub fn try_recv(&mut self) -> Result<DateTime<Utc>, TryRecvError> {
        self.fired.try_recv()
    }

    /// The underlying channel, for use in `select!`
    pub fn receiver(&mut self) -> &mut mpsc::Receiver<DateTime<Utc>> {
        &mut self.fired
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer").finish_non_exhaustive()
    }
}

/// Repeating ticker handle, with the same one-slot delivery as [`Timer`]
pub struct Ticker {
    control: Box<dyn TickerControl>,
    ticks: mpsc::Receiver<DateTime<Utc>>,
}

impl Ticker {
    pub fn new(control: impl TickerControl + 'static, ticks: mpsc::Receiver<DateTime<Utc>>) -> Self {
        Self {
            control: Box::new(control),
            ticks,
        }
    }

    /// See [`TickerControl::stop`]
    pub fn stop(&self) {
        self.control.stop()
    }

    /// See [`TickerControl::reset`]
    pub fn reset(&self, d: Duration) {
        self.control.reset(d)
    }

    /// Wait for the next tick
    pub async fn recv(&mut self) -> Option<DateTime<Utc>> {
        self.ticks.recv().await
    }

    /// Take a tick if one is waiting
    pub fn try_recv(&mut self) -> Result<DateTime<Utc>, TryRecvError> {
        self.ticks.try_recv()
    }

    /// The underlying channel, for use in `select!`
    pub fn receiver(&mut self) -> &mut mpsc::Receiver<DateTime<Utc>> {
        &mut self.ticks
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker").finish_non_exhaustive()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn new_timer(&self, d: Duration) -> Timer {
        (**self).new_timer(d)
    }

    fn new_ticker(&self, d: Duration) -> Ticker {
        (**self).new_ticker(d)
    }
}
