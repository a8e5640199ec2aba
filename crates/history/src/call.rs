// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call descriptors recorded by the mock clock.

use crate::duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which primitive an instance emulates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    Timer,
    Ticker,
}

impl InstanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Ticker => "ticker",
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation performed against the mock clock.
///
/// The [`Display`](fmt::Display) form is the descriptor text tests assert on:
/// `now`, `timer 1s`, `ticker-2.stop`, `timer-1.reset 500ms`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    Now,
    Create {
        kind: InstanceKind,
        #[serde(with = "crate::duration_serde")]
        duration: Duration,
    },
    Stop {
        kind: InstanceKind,
        seq: usize,
    },
    Reset {
        kind: InstanceKind,
        seq: usize,
        #[serde(with = "crate::duration_serde")]
        duration: Duration,
    },
}

impl Call {
    /// Instance this call targets, if any
    pub fn instance(&self) -> Option<(InstanceKind, usize)> {
        match self {
            Self::Stop { kind, seq } | Self::Reset { kind, seq, .. } => Some((*kind, *seq)),
            Self::Now | Self::Create { .. } => None,
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Now => f.write_str("now"),
            Self::Create { kind, duration } => {
                write!(f, "{} {}", kind, duration::format(*duration))
            }
            Self::Stop { kind, seq } => write!(f, "{kind}-{seq}.stop"),
            Self::Reset {
                kind,
                seq,
                duration,
            } => write!(f, "{}-{}.reset {}", kind, seq, duration::format(*duration)),
        }
    }
}

impl PartialEq<str> for Call {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Call {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
