// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mock clock configuration, in code or from TOML/JSON files.

use crate::error::ConfigError;
use crate::script::Script;
use mockclock_history::{duration_serde, InstanceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Scripts directing a [`MockClock`](crate::MockClock).
///
/// Every field is optional; an empty configuration advances `now()` by
/// [`DEFAULT_SCRIPT_NOW`](crate::DEFAULT_SCRIPT_NOW) per call and runs real
/// timers [`DEFAULT_SCRIPT_RATIO`](crate::DEFAULT_SCRIPT_RATIO) times faster.
///
/// ```toml
/// now_scripts = ["100ms", "0s"]
/// default = { now = "1ms", ratio = 100 }
/// timer_scripts = [[], [{ now = "2ms", ratio = 200 }, {}]]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MockConfig {
    /// How far each successive `now()` call advances time (zero = default)
    #[serde(default, with = "duration_serde::seq")]
    pub now_scripts: Vec<Duration>,

    /// Per-timer script sequences, indexed by creation order
    #[serde(default)]
    pub timer_scripts: Vec<Vec<Script>>,

    /// Per-ticker script sequences, indexed by creation order
    #[serde(default)]
    pub ticker_scripts: Vec<Vec<Script>>,

    /// Fallback for anything unscripted
    #[serde(default)]
    pub default: Script,
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML or JSON file (by extension)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_now_scripts(mut self, scripts: impl IntoIterator<Item = Duration>) -> Self {
        self.now_scripts = scripts.into_iter().collect();
        self
    }

    pub fn with_timer_scripts(mut self, scripts: Vec<Vec<Script>>) -> Self {
        self.timer_scripts = scripts;
        self
    }

    pub fn with_ticker_scripts(mut self, scripts: Vec<Vec<Script>>) -> Self {
        self.ticker_scripts = scripts;
        self
    }

    pub fn with_default(mut self, default: Script) -> Self {
        self.default = default;
        self
    }

    /// Script sequences for one kind of instance
    pub fn scripts_for(&self, kind: InstanceKind) -> &[Vec<Script>] {
        match kind {
            InstanceKind::Timer => &self.timer_scripts,
            InstanceKind::Ticker => &self.ticker_scripts,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
