// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call and time records for mock clock assertions.
//!
//! This crate holds the append-only histories a mock clock produces: the
//! ordered call descriptors and the virtual timeline, plus the compact
//! duration notation used in descriptors and configuration files.

mod call;
pub mod duration;
pub mod duration_serde;
mod log;
mod timeline;

pub use call::{Call, InstanceKind};
pub use duration::DurationError;
pub use log::CallLog;
pub use timeline::{saturating_add, Timeline};
