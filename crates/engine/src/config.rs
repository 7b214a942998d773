// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker configuration

use std::time::Duration;

/// Default time a worker waits for a trigger before stopping itself.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Values a worker is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// How long an empty queue may stay empty before the worker stops
    pub idle_timeout: Duration,
    /// Handler budget for triggers that carry no timeout of their own
    pub default_timeout: Option<Duration>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            default_timeout: None,
        }
    }
}

impl WorkerConfig {
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}
