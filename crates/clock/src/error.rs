// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types.

use crate::state::LifecycleState;
use thiserror::Error;

/// Misuse of the mock clock lifecycle.
///
/// This is a programming error in the test using the mock, never a condition
/// to retry. The [`Clock`](crate::Clock) implementation turns it into a panic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("MockClock::{op}() requires a started clock; call start() first (clock is {state})")]
    NotStarted {
        op: &'static str,
        state: LifecycleState,
    },

    #[error("MockClock::{op}() requires a stopped clock; call stop() first (clock is {state})")]
    NotStopped {
        op: &'static str,
        state: LifecycleState,
    },

    #[error("MockClock::start() called on a clock that is already {state}")]
    AlreadyStarted { state: LifecycleState },
}

/// Errors that can occur when loading a mock configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
