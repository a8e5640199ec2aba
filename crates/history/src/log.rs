// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only call log.

use crate::call::{Call, InstanceKind};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered record of every call made against a mock clock.
///
/// Clones share the same underlying record. Entries are only ever appended;
/// readers get snapshots.
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Create an empty call log
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a call
    pub fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Snapshot of all recorded calls
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Snapshot of all recorded calls as descriptor strings
    pub fn descriptors(&self) -> Vec<String> {
        self.calls.lock().iter().map(Call::to_string).collect()
    }

    /// Get the last N calls
    pub fn last(&self, n: usize) -> Vec<Call> {
        let all = self.calls.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count calls matching a predicate
    pub fn count<F: Fn(&Call) -> bool>(&self, pred: F) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Calls that targeted one instance, in the order they were made
    pub fn for_instance(&self, kind: InstanceKind, seq: usize) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.instance() == Some((kind, seq)))
            .cloned()
            .collect()
    }

    /// Get the total number of calls
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CallLog {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl std::fmt::Debug for CallLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLog")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
