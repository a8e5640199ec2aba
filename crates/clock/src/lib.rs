// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable virtual clock for testing time-dependent code.
//!
//! Code under test takes a [`Clock`]. In production that is a [`SystemClock`];
//! in tests it is a [`MockClock`], whose virtual time advances by scripted
//! steps and whose timers and tickers run on real timers sped up by a ratio.
//! After the clock stops, its call and time histories are available for
//! assertions.
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use mockclock::{Clock, MockClock};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), mockclock::LifecycleError> {
//! let clock = MockClock::default();
//! clock.start(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())?;
//!
//! let mut timer = clock.new_timer(Duration::from_secs(1));
//! timer.recv().await;
//!
//! clock.stop().await;
//! assert_eq!(clock.calls()?, ["timer 1s"]);
//! # Ok(())
//! # }
//! ```

mod alarm;
mod bridge;
mod clock;
mod config;
mod error;
mod handle;
mod mock;
mod script;
mod state;
mod system;

pub use clock::{Clock, Ticker, TickerControl, Timer, TimerControl};
pub use config::MockConfig;
pub use error::{ConfigError, LifecycleError};
pub use mock::MockClock;
pub use script::{
    resolve, resolve_now, Script, ScriptCursor, DEFAULT_SCRIPT_NOW, DEFAULT_SCRIPT_RATIO,
};
pub use state::LifecycleState;
pub use system::SystemClock;

pub use mockclock_history as history;
pub use mockclock_history::{Call, InstanceKind};
